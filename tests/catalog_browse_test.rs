mod common;

use common::{body_json, TestApp};
use kickdex_api::cache::keys;

#[tokio::test]
async fn browse_groups_active_sneakers_by_brand() {
    let app = TestApp::new().await;

    let nike = app.seed_brand("Nike").await;
    let adidas = app.seed_brand("Adidas").await;
    app.seed_brand("Empty Brand").await;

    app.seed_sneaker("Air Max 1", Some(nike.id), false).await;
    app.seed_sneaker("Air Force 1", Some(nike.id), false).await;
    app.seed_sneaker("Superstar", Some(adidas.id), false).await;
    app.seed_sneaker("Unbranded Runner", None, false).await;

    let response = app.get("/").await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;

    let listing = body.as_array().expect("listing is an array");
    // Brands with no active sneakers (and the brand-less sneaker) are absent.
    assert_eq!(listing.len(), 2);

    // Brands sorted by name, sneakers within each brand sorted by name.
    assert_eq!(listing[0]["name"], "Adidas");
    assert_eq!(listing[1]["name"], "Nike");

    let nike_sneakers: Vec<&str> = listing[1]["sneakers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(nike_sneakers, vec!["Air Force 1", "Air Max 1"]);
}

#[tokio::test]
async fn browse_orders_many_brands_by_name_not_by_key() {
    let app = TestApp::new().await;

    // Insertion order (and the random ids it produces) must not show
    // through in the listing order.
    let names = [
        "Vans", "Puma", "New Balance", "Asics", "Saucony", "Reebok", "Converse", "Brooks",
    ];
    for name in names {
        let brand = app.seed_brand(name).await;
        app.seed_sneaker(&format!("{} Runner", name), Some(brand.id), false).await;
    }

    let body = body_json(app.get("/").await).await;
    let listed: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        listed,
        vec!["Asics", "Brooks", "Converse", "New Balance", "Puma", "Reebok", "Saucony", "Vans"]
    );
}

#[tokio::test]
async fn browse_excludes_soft_deleted_sneakers() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Nike").await;
    app.seed_sneaker("Active One", Some(brand.id), false).await;
    app.seed_sneaker("Deleted One", Some(brand.id), true).await;

    let body = body_json(app.get("/").await).await;
    let sneakers = body[0]["sneakers"].as_array().unwrap();
    assert_eq!(sneakers.len(), 1);
    assert_eq!(sneakers[0]["name"], "Active One");
}

#[tokio::test]
async fn brand_with_only_deleted_sneakers_is_dropped_from_listing() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Ghost Brand").await;
    app.seed_sneaker("Gone", Some(brand.id), true).await;

    let body = body_json(app.get("/").await).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn browse_listing_stays_stale_until_cache_entry_expires() {
    let app = TestApp::new().await;

    let brand = app.seed_brand("Nike").await;
    app.seed_sneaker("Air Max 1", Some(brand.id), false).await;

    // First browse warms the cache.
    let first = body_json(app.get("/").await).await;
    assert_eq!(first[0]["sneakers"].as_array().unwrap().len(), 1);

    // New data lands after the cache was warmed.
    app.seed_sneaker("Air Force 1", Some(brand.id), false).await;

    // The listing is served from cache and does not reflect the new row.
    let second = body_json(app.get("/").await).await;
    assert_eq!(second, first);

    // Once the cache entry is gone, the listing is recomputed.
    app.state
        .cache
        .delete(keys::BRAND_LISTING)
        .await
        .expect("drop listing cache entry");
    let third = body_json(app.get("/").await).await;
    assert_eq!(third[0]["sneakers"].as_array().unwrap().len(), 2);
}
