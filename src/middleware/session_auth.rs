use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::db::AppState;
use crate::error::AppError;
use crate::jwt::{SessionUser, decode_remember_me, verify_token};
use crate::util::splice_value;

use super::AuthMethod;

pub const REMEMBER_ME_COOKIE: &str = "remember_me";
pub const SESSION_COOKIE: &str = "session_token";

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user: SessionUser,
    pub auth_method: AuthMethod,
}

impl SessionContext {
    /// The caller's id as it goes into SQL text.
    pub fn user_id_raw(&self) -> String {
        splice_value(&self.user.id)
    }
}

/// Token from the `Authorization` header: the second space-separated word,
/// whatever the scheme.
fn header_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(' ').nth(1))
}

/// Resolve the caller from the request headers.
///
/// Tries the `Authorization` JWT first, then the `remember_me` cookie.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Option<SessionContext> {
    if let Some(token) = header_token(headers) {
        match verify_token(token, &state.config.jwt_secret) {
            Ok(user) => {
                return Some(SessionContext {
                    user,
                    auth_method: AuthMethod::Jwt,
                });
            }
            Err(e) => tracing::debug!("JWT rejected: {}", e),
        }
    }

    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(REMEMBER_ME_COOKIE) {
        match decode_remember_me(cookie.value()) {
            Ok(user) => {
                return Some(SessionContext {
                    user,
                    auth_method: AuthMethod::Cookie,
                });
            }
            Err(e) => tracing::debug!("remember_me cookie rejected: {}", e),
        }
    }

    None
}

pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = authenticate(&state, request.headers())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}
