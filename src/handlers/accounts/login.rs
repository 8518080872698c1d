use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::crypto::hash_password_input;
use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::{ClientIp, Json};
use crate::jwt::{self, SessionUser};
use crate::middleware::{REMEMBER_ME_COOKIE, SESSION_COOKIE};
use crate::models::{LogAction, LoginRequest, LoginResponse};
use crate::util::{splice, truthy};

const SESSION_COOKIE_MAX_AGE: Duration = Duration::hours(24);
const REMEMBER_ME_MAX_AGE: Duration = Duration::days(30);

/// Every failure other than bad credentials is reported as a database error.
pub async fn login(
    State(state): State<AppState>,
    ip: ClientIp,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<Response> {
    attempt_login(&state, &ip, jar, &req).map_err(|e| match e {
        AppError::Unauthorized(_) => e,
        other => AppError::Internal(format!("Database error: {}", other)),
    })
}

fn attempt_login(
    state: &AppState,
    ip: &ClientIp,
    jar: CookieJar,
    req: &LoginRequest,
) -> Result<Response> {
    let hashed = hash_password_input(req.password.as_ref())?;
    let username = splice(req.username.as_ref());

    let conn = state.db.get()?;
    let user = queries::find_user_by_credentials(&conn, &username, &hashed)?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    let claims = user.token_claims();
    let token = jwt::issue_token(&state.config.jwt_secret, claims.clone())?;

    // Readable from scripts: neither HttpOnly nor Secure
    let mut jar = jar.add(
        Cookie::build((SESSION_COOKIE, token.clone()))
            .path("/")
            .max_age(SESSION_COOKIE_MAX_AGE)
            .same_site(SameSite::Lax),
    );

    if truthy(req.remember.as_ref()) {
        let payload = jwt::encode_remember_me(&SessionUser::from(claims))?;
        jar = jar.add(
            Cookie::build((REMEMBER_ME_COOKIE, payload))
                .path("/")
                .max_age(REMEMBER_ME_MAX_AGE),
        );
    }

    queries::insert_log(
        &conn,
        LogAction::UserLogin,
        &format!("Login: {}", user.username),
        &ip.0,
    )?;

    tracing::info!("User {} logged in", user.username);

    let body = LoginResponse {
        success: true,
        token,
        user,
    };
    Ok((jar, Json(body)).into_response())
}
