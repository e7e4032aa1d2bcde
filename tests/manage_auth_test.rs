mod common;

use axum::http::Method;
use common::TestApp;
use kickdex_api::auth::consts;
use serde_json::json;

fn sneaker_payload() -> serde_json::Value {
    json!({
        "name": "Air Max 1",
        "summary": "Visible air unit",
        "year_released": 1987
    })
}

#[tokio::test]
async fn unauthenticated_management_request_redirects_to_login() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/manage/create-sneaker", sneaker_payload(), None)
        .await;

    assert_eq!(response.status(), 303);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("redirect carries a location header");
    assert_eq!(location, "/accounts/login?next=/manage/create-sneaker");
}

#[tokio::test]
async fn stale_token_redirects_to_login_instead_of_erroring() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/manage/create-sneaker",
            sneaker_payload(),
            Some("not-a-real-token"),
        )
        .await;

    assert_eq!(response.status(), 303);
}

#[tokio::test]
async fn authenticated_user_without_capability_is_forbidden() {
    let app = TestApp::new().await;
    let token = app.token_with(&[consts::SNEAKERS_UPDATE]).await;

    let response = app
        .post_json("/manage/create-sneaker", sneaker_payload(), Some(&token))
        .await;

    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn each_operation_requires_its_own_capability() {
    let app = TestApp::new().await;
    let sneaker = app.seed_sneaker("Air Max 1", None, false).await;

    // A creator token cannot delete.
    let creator = app.token_with(&[consts::SNEAKERS_CREATE]).await;
    let response = app
        .request(
            Method::POST,
            &format!("/manage/delete-sneaker/{}", sneaker.id),
            None,
            Some(&creator),
        )
        .await;
    assert_eq!(response.status(), 403);

    // A deleter token can.
    let deleter = app.token_with(&[consts::SNEAKERS_DELETE]).await;
    let response = app
        .request(
            Method::POST,
            &format!("/manage/delete-sneaker/{}", sneaker.id),
            None,
            Some(&deleter),
        )
        .await;
    assert_eq!(response.status(), 303);
}

#[tokio::test]
async fn superuser_holds_every_capability() {
    let app = TestApp::new().await;
    // No explicit grants, only the superuser flag.
    let superuser = app.superuser_token().await;

    let response = app
        .post_json("/manage/create-sneaker", sneaker_payload(), Some(&superuser))
        .await;
    assert_eq!(response.status(), 303);
}
