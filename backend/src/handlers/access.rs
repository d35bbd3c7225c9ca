//! HTTP handler for unlocking a private deployment

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::{access_token, verify_access_token, ACCESS_COOKIE};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub passcode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UnlockResponse {
    pub ok: bool,
    pub token: String,
}

/// Exchange the passcode for an access token and cookie
pub async fn unlock(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<UnlockRequest>>,
) -> AppResult<(CookieJar, Json<UnlockResponse>)> {
    let incorrect = || AppError::Unauthorized("Incorrect passcode".to_string());

    let expected = state.config.access.passcode().ok_or_else(incorrect)?;
    let presented = body
        .and_then(|Json(request)| request.passcode)
        .filter(|passcode| !passcode.is_empty())
        .ok_or_else(incorrect)?;

    if !verify_access_token(expected, &access_token(&presented)?) {
        return Err(incorrect());
    }

    let token = access_token(expected)?;
    let cookie = Cookie::build((ACCESS_COOKIE, token.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(state.config.environment == "production");

    tracing::info!("Access unlocked");

    Ok((jar.add(cookie), Json(UnlockResponse { ok: true, token })))
}
