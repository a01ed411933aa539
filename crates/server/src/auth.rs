//! Authentication middleware
//!
//! Bearer JWT authentication (HS256). Token creation and verification
//! live here; identity providers (password login, OAuth) sit in front of
//! this service and are not its concern. Public paths (health probes,
//! token issuance) bypass the check.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{AppState, ServerError};

/// Warn about disabled auth only once.
static AUTH_DISABLED_WARNED: AtomicBool = AtomicBool::new(false);

/// Identity attached to every authenticated request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Issue a token for a user.
pub fn create_token(user_id: &str, secret: &str, ttl_hours: u64) -> Result<String, ServerError> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now() + Duration::hours(ttl_hours as i64)).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| ServerError::Auth(e.to_string()))
}

/// Verify a token; `None` on any failure (bad signature, expired,
/// malformed).
pub fn verify_token(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map(|data| data.claims)
        .ok()
}

/// Middleware enforcing bearer authentication on protected paths.
///
/// - `Authorization: Bearer <jwt>` is required when auth is enabled
/// - public paths pass through
/// - the verified user id lands in request extensions as [`AuthUser`]
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_config = &state.settings.server.auth;

    if !auth_config.enabled {
        if !AUTH_DISABLED_WARNED.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                "API authentication is DISABLED. Set FARM_ADVISOR__SERVER__AUTH__ENABLED=true for production."
            );
        }
        request.extensions_mut().insert(AuthUser("anonymous".to_string()));
        return next.run(request).await;
    }

    let path = request.uri().path();
    if auth_config.public_paths.iter().any(|p| path.starts_with(p)) {
        request.extensions_mut().insert(AuthUser("anonymous".to_string()));
        return next.run(request).await;
    }

    let Some(secret) = auth_config.jwt_secret.as_deref().filter(|s| !s.is_empty()) else {
        tracing::error!("auth is enabled but no JWT secret is configured");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Server authentication not configured")
            .into_response();
    };

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token.and_then(|t| verify_token(t, secret)) {
        Some(claims) => {
            request.extensions_mut().insert(AuthUser(claims.sub));
            next.run(request).await
        }
        None => (StatusCode::UNAUTHORIZED, "Invalid or missing token").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = create_token("farmer-1", "secret", 24).unwrap();
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "farmer-1");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("farmer-1", "secret", 24).unwrap();
        assert!(verify_token(&token, "other").is_none());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(verify_token("not-a-jwt", "secret").is_none());
    }
}
