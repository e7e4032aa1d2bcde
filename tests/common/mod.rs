use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use kickdex_api::{
    auth::{consts, AuthConfig, AuthService},
    cache::{CacheBackend, InMemoryCache},
    config::AppConfig,
    db,
    entities::{brand, sneaker, user},
    services::CatalogService,
    AppState,
};

const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only_32chars";

/// Helper harness for spinning up an application backed by a fresh
/// SQLite database file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    auth_service: Arc<AuthService>,
    db_file: std::path::PathBuf,
    media_dir: std::path::PathBuf,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let run_id = Uuid::new_v4().simple().to_string();
        let db_file = std::env::temp_dir().join(format!("kickdex_test_{run_id}.db"));
        let media_dir = std::env::temp_dir().join(format!("kickdex_media_{run_id}"));
        let _ = std::fs::remove_file(&db_file);

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_file.display()),
            TEST_JWT_SECRET.to_string(),
            3600,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.media_root = media_dir.display().to_string();

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let cache: Arc<dyn CacheBackend> = Arc::new(InMemoryCache::new());

        let catalog = Arc::new(CatalogService::new(
            db_arc.clone(),
            cache.clone(),
            media_dir.clone(),
            cfg.listing_cache_ttl(),
        ));

        let auth_service = Arc::new(AuthService::new(AuthConfig {
            jwt_secret: cfg.jwt_secret.clone(),
            issuer: cfg.auth_issuer.clone(),
            audience: cfg.auth_audience.clone(),
            token_expiration: Duration::from_secs(cfg.jwt_expiration as u64),
        }));

        let state = AppState {
            db: db_arc,
            config: cfg,
            cache,
            catalog,
        };

        let router = kickdex_api::app_router(state.clone(), auth_service.clone());

        Self {
            router,
            state,
            auth_service,
            db_file,
            media_dir,
        }
    }

    /// Insert a staff user row and return its id. Actors must exist in
    /// the store because the sneaker audit columns reference them.
    pub async fn seed_actor(&self) -> Uuid {
        let id = Uuid::new_v4();
        user::ActiveModel {
            id: Set(id),
            email: Set(format!("staff-{}@example.com", id.simple())),
            first_name: Set("Test".to_string()),
            last_name: Set("Staff".to_string()),
            password_hash: Set(String::new()),
            is_active: Set(true),
            is_staff: Set(true),
            is_superuser: Set(false),
            created_at: Set(Utc::now()),
            updated_at: Set(Some(Utc::now())),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed user for tests");
        id
    }

    /// Bearer token for a fresh staff user holding the given capabilities.
    pub async fn token_with(&self, permissions: &[&str]) -> String {
        let user_id = self.seed_actor().await;
        self.auth_service
            .issue_token(
                user_id,
                Some("staff@example.com".to_string()),
                true,
                false,
                permissions.iter().map(|p| p.to_string()).collect(),
            )
            .expect("issue test token")
    }

    /// Bearer token for a superuser with no explicit grants.
    pub async fn superuser_token(&self) -> String {
        let user_id = self.seed_actor().await;
        self.auth_service
            .issue_token(user_id, None, true, true, Vec::new())
            .expect("issue superuser token")
    }

    /// Bearer token holding every mutation capability.
    pub async fn editor_token(&self) -> String {
        self.token_with(&[
            consts::SNEAKERS_CREATE,
            consts::SNEAKERS_UPDATE,
            consts::SNEAKERS_DELETE,
        ])
        .await
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: Value,
        token: Option<&str>,
    ) -> axum::response::Response {
        self.request(Method::POST, uri, Some(body), token).await
    }

    /// Insert a brand directly into the store.
    pub async fn seed_brand(&self, name: &str) -> brand::Model {
        brand::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(format!("{} test brand", name)),
            country: Set(Some("USA".to_string())),
            year_founded: Set(Some(1964)),
            created_at: Set(Utc::now()),
            updated_at: Set(Some(Utc::now())),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed brand for tests")
    }

    /// Insert a sneaker directly into the store.
    pub async fn seed_sneaker(
        &self,
        name: &str,
        brand_id: Option<Uuid>,
        deleted: bool,
    ) -> sneaker::Model {
        let actor = if deleted {
            Some(self.seed_actor().await)
        } else {
            None
        };
        sneaker::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            summary: Set(format!("{} test summary", name)),
            designer: Set(Some("Test Designer".to_string())),
            year_released: Set(1989),
            brand_id: Set(brand_id),
            primary_image: Set(None),
            created_by: Set(None),
            last_updated_by: Set(None),
            deleted: Set(deleted),
            deleted_at: Set(actor.map(|_| Utc::now())),
            deleted_by: Set(actor),
            created_at: Set(Utc::now()),
            updated_at: Set(Some(Utc::now())),
        }
        .insert(&*self.state.db)
        .await
        .expect("seed sneaker for tests")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_file);
        let _ = std::fs::remove_dir_all(&self.media_dir);
    }
}

/// Read a response body into JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    use http_body_util::BodyExt;
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body is valid json")
}
