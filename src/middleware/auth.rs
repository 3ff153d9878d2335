//! Authentication middleware
//!
//! Guards the admin routes: a request passes only with a valid, unrevoked
//! bearer token, and the decoded claims are attached for the handler.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;
use crate::state::AppState;
use crate::utils::errors::{PereirinhaError, Result};

/// Require an admin session token on the request
pub async fn require_admin(State(state): State<AppState>, mut request: Request, next: Next) -> Result<Response> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| PereirinhaError::Authentication("Missing bearer token".to_string()))?;

    let claims = state.services.auth_service.verify_token(token)?;
    debug!(admin = %claims.sub, path = %request.uri().path(), "Admin request authorized");

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
