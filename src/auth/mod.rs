/*!
 * # Authentication and Authorization
 *
 * Validates bearer tokens issued by the identity layer and enforces the
 * catalog's three mutation capabilities (create, update, delete).
 *
 * Credential management (login forms, password resets, refresh tokens)
 * is delegated to the external identity service; this module only
 * validates its JWTs, resolves the acting user, and gates routes.
 * Requests without a valid token are redirected to the login page with a
 * `next` parameter; authenticated requests lacking the required
 * capability receive a forbidden response instead.
 */

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;

mod capabilities;

pub use capabilities::*;

/// Login page the management surface redirects unauthenticated users to.
/// The page itself is served by the external identity layer.
pub const LOGIN_URL: &str = "/accounts/login";

/// Claim structure for JWT tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,               // Subject (user ID)
    pub email: Option<String>,     // User's email
    pub is_staff: bool,            // Staff flag
    pub is_superuser: bool,        // Superusers hold every capability
    pub permissions: Vec<String>,  // Explicit capability grants
    pub jti: String,               // JWT ID
    pub iat: i64,                  // Issued at time
    pub exp: i64,                  // Expiration time
    pub iss: String,               // Issuer
    pub aud: String,               // Audience
}

/// Acting user resolved from a validated token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub permissions: Vec<String>,
}

impl AuthUser {
    pub fn has_permission(&self, capability: &str) -> bool {
        self.permissions.iter().any(|p| p == capability)
    }

    /// Capability check with the superuser bypass.
    pub fn can(&self, capability: &str) -> bool {
        self.is_superuser || self.has_permission(capability)
    }
}

impl TryFrom<Claims> for AuthUser {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::InvalidToken("subject is not a valid user id".to_string()))?;
        Ok(Self {
            user_id,
            email: claims.email,
            is_staff: claims.is_staff,
            is_superuser: claims.is_superuser,
            permissions: claims.permissions,
        })
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authentication")]
    MissingAuth,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token has expired")]
    ExpiredToken,
    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::InsufficientPermissions => {
                ServiceError::Forbidden("You do not have permission to perform this action".to_string())
                    .into_response()
            }
            other => ServiceError::Unauthorized(other.to_string()).into_response(),
        }
    }
}

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub audience: String,
    pub token_expiration: Duration,
}

/// Validates and issues catalog tokens.
///
/// Issuance exists for tests and operator tooling; production tokens come
/// from the identity service signing with the same secret.
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn issue_token(
        &self,
        user_id: Uuid,
        email: Option<String>,
        is_staff: bool,
        is_superuser: bool,
        permissions: Vec<String>,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email,
            is_staff,
            is_superuser,
            permissions,
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + self.config.token_expiration.as_secs() as i64,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.config.audience.clone()]);
        validation.set_issuer(&[self.config.issuer.clone()]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken(e.to_string()),
        })
    }
}

/// Resolve the acting user from request headers.
fn user_from_headers(headers: &HeaderMap, auth_service: &AuthService) -> Result<AuthUser, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingAuth)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingAuth)?
        .trim();

    let claims = auth_service.validate_token(token)?;
    AuthUser::try_from(claims)
}

/// Builds the login redirect for an unauthenticated management request.
pub fn login_redirect(next: &str) -> Response {
    Redirect::to(&format!("{}?next={}", LOGIN_URL, next)).into_response()
}

/// Authentication middleware for the management surface.
///
/// Unauthenticated (or stale-token) requests answer with a redirect to
/// the login page carrying the original path in `next`.
pub async fn manage_auth_middleware(mut request: Request, next: Next) -> Response {
    let auth_service = match request.extensions().get::<Arc<AuthService>>() {
        Some(service) => service.clone(),
        None => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication service not available",
            )
                .into_response();
        }
    };

    match user_from_headers(request.headers(), &auth_service) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            debug!(error = %err, path = %request.uri().path(), "Redirecting unauthenticated request to login");
            login_redirect(request.uri().path())
        }
    }
}

/// Capability middleware; runs after `manage_auth_middleware`.
pub async fn capability_middleware(
    State(required): State<String>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(AuthError::MissingAuth)?;

    if !user.can(&required) {
        debug!(user_id = %user.user_id, capability = %required, "Capability check failed");
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(request).await)
}

/// Extension methods for Router to gate management routes.
pub trait AuthRouterExt {
    fn with_capability(self, capability: &str) -> Self;
}

impl<S> AuthRouterExt for axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_capability(self, capability: &str) -> Self {
        // Auth layer is added last so it runs first and seeds the
        // AuthUser extension the capability check reads.
        self.layer(axum::middleware::from_fn_with_state(
            capability.to_string(),
            capability_middleware,
        ))
        .layer(axum::middleware::from_fn(manage_auth_middleware))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ServiceError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> AuthService {
        AuthService::new(AuthConfig {
            jwt_secret: secret.to_string(),
            issuer: "kickdex".to_string(),
            audience: "kickdex-api".to_string(),
            token_expiration: Duration::from_secs(3600),
        })
    }

    #[test]
    fn issued_token_round_trips() {
        let svc = service("a-test-secret-that-is-long-enough-for-hs256-signing");
        let user_id = Uuid::new_v4();
        let token = svc
            .issue_token(
                user_id,
                Some("staff@example.com".to_string()),
                true,
                false,
                vec![consts::SNEAKERS_DELETE.to_string()],
            )
            .unwrap();

        let claims = svc.validate_token(&token).unwrap();
        let user = AuthUser::try_from(claims).unwrap();
        assert_eq!(user.user_id, user_id);
        assert!(user.can(consts::SNEAKERS_DELETE));
        assert!(!user.can(consts::SNEAKERS_CREATE));
    }

    #[test]
    fn superuser_bypasses_explicit_grants() {
        let svc = service("a-test-secret-that-is-long-enough-for-hs256-signing");
        let token = svc
            .issue_token(Uuid::new_v4(), None, true, true, vec![])
            .unwrap();
        let user = AuthUser::try_from(svc.validate_token(&token).unwrap()).unwrap();
        assert!(user.can(consts::SNEAKERS_CREATE));
    }

    #[test]
    fn token_from_wrong_secret_is_rejected() {
        let issuer = service("a-test-secret-that-is-long-enough-for-hs256-signing");
        let verifier = service("a-different-secret-that-is-also-long-enough-here");
        let token = issuer
            .issue_token(Uuid::new_v4(), None, false, false, vec![])
            .unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }
}
