//! HTTP Endpoints
//!
//! REST API for the farm advisor: chat, session CRUD, message listing,
//! token issuance, and health probes.

use axum::{
    extract::{Json, Path, State},
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use farm_advisor_core::Session;

use crate::auth::{auth_middleware, create_token, AuthUser};
use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );

    Router::new()
        // Auth
        .route("/auth/token", post(issue_token))

        // Session endpoints
        .route("/api/sessions", post(create_session))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/sessions/:id", delete(delete_session))

        // Messages
        .route("/api/messages/:session_id", get(list_messages))

        // Chat
        .route("/api/chat", post(chat))

        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))

        // Middleware
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins.
///
/// - disabled -> permissive (development only)
/// - no origins configured -> localhost:3000 for safety
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed.is_empty() {
        tracing::info!("No CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().expect("static origin"))
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed.len());
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(true)
}

/// Token request
#[derive(Debug, Deserialize)]
struct TokenRequest {
    user_id: String,
}

/// Issue a JWT for a user id. Fronting identity providers verify the
/// user before calling this.
async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let auth = &state.settings.server.auth;
    let Some(secret) = auth.jwt_secret.as_deref().filter(|s| !s.is_empty()) else {
        tracing::error!("token requested but no JWT secret is configured");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    };

    let token = create_token(&request.user_id, secret, auth.token_ttl_hours)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(serde_json::json!({ "access_token": token })))
}

/// Create a new session
async fn create_session(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let session = Session::new(uuid::Uuid::new_v4().to_string(), &user.0);
    state
        .sessions
        .insert(&session)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    tracing::info!(session_id = %session.id, user = %user.0, "session created");
    Ok(Json(serde_json::json!({ "session_id": session.id })))
}

/// List the caller's sessions
async fn list_sessions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let sessions = state
        .sessions
        .list_by_user(&user.0)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let items: Vec<serde_json::Value> = sessions
        .iter()
        .map(|s| serde_json::json!({ "id": s.id, "title": s.title }))
        .collect();

    Ok(Json(serde_json::json!({ "sessions": items, "count": items.len() })))
}

/// Get session info
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let session = state
        .sessions
        .find_by_id(&id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(serde_json::json!({
        "session_id": session.id,
        "title": session.title,
        "language": session.language.code(),
        "awaiting_followup": session.awaiting_followup,
        "updated_at": session.updated_at,
    })))
}

/// Delete a session and its messages
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    if state.sessions.delete(&id).await.is_err() {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    if state.messages.delete_by_session(&id).await.is_err() {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    StatusCode::NO_CONTENT
}

/// List a session's messages in order
async fn list_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let messages = state
        .messages
        .find_by_session(&session_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let items: Vec<serde_json::Value> = messages
        .iter()
        .map(|m| serde_json::json!({ "role": m.role.as_str(), "content": m.content }))
        .collect();

    Ok(Json(serde_json::json!({ "messages": items })))
}

/// Chat request
#[derive(Debug, Deserialize)]
struct ChatRequest {
    session_id: String,
    message: String,
}

/// Chat response
#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

/// Chat endpoint: one turn through the routing core.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    match state.chat.handle_turn(&request.session_id, &request.message).await {
        Ok(response) => Ok(Json(ChatResponse { response })),
        Err(e) => {
            tracing::error!(session_id = %request.session_id, error = %e, "chat turn failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check
async fn readiness_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ready" }))
}
