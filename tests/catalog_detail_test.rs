mod common;

use common::{body_json, TestApp};
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use uuid::Uuid;

use kickdex_api::entities::sneaker_link;

async fn link(app: &TestApp, a: Uuid, b: Uuid) {
    for (from, to) in [(a, b), (b, a)] {
        sneaker_link::ActiveModel {
            sneaker_id: Set(from),
            related_sneaker_id: Set(to),
        }
        .insert(&*app.state.db)
        .await
        .expect("seed sneaker link");
    }
}

#[tokio::test]
async fn detail_includes_brand_and_related_sneakers() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Nike").await;
    let air_max = app.seed_sneaker("Air Max 1", Some(brand.id), false).await;
    let air_force = app.seed_sneaker("Air Force 1", Some(brand.id), false).await;
    link(&app, air_max.id, air_force.id).await;

    let body = body_json(app.get(&format!("/sneaker/{}", air_max.id)).await).await;
    assert_eq!(body["name"], "Air Max 1");
    assert_eq!(body["brand"]["name"], "Nike");

    let related = body["related_sneakers"].as_array().unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0]["name"], "Air Force 1");
}

#[tokio::test]
async fn related_listing_is_symmetric() {
    let app = TestApp::new().await;

    let a = app.seed_sneaker("Alpha", None, false).await;
    let b = app.seed_sneaker("Beta", None, false).await;
    link(&app, a.id, b.id).await;

    let from_b = body_json(app.get(&format!("/sneaker/{}", b.id)).await).await;
    let related = from_b["related_sneakers"].as_array().unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0]["name"], "Alpha");
}

#[tokio::test]
async fn deleted_related_sneakers_are_hidden() {
    let app = TestApp::new().await;

    let keep = app.seed_sneaker("Keeper", None, false).await;
    let gone = app.seed_sneaker("Gone", None, true).await;
    link(&app, keep.id, gone.id).await;

    let body = body_json(app.get(&format!("/sneaker/{}", keep.id)).await).await;
    assert_eq!(body["related_sneakers"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn detail_answers_not_found_for_deleted_and_unknown() {
    let app = TestApp::new().await;

    let deleted = app.seed_sneaker("Removed", None, true).await;

    let response = app.get(&format!("/sneaker/{}", deleted.id)).await;
    assert_eq!(response.status(), 404);

    let response = app.get(&format!("/sneaker/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), 404);
}
