//! Passcode access gate
//!
//! A private deployment sets `access.passcode`. Unlocking hands out a token
//! derived from the passcode, carried back either in the `rt_unlocked` cookie
//! or as a Bearer token.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{AppError, AppResult};
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Cookie that marks an unlocked browser
pub const ACCESS_COOKIE: &str = "rt_unlocked";

const TOKEN_LABEL: &[u8] = b"roasted-access-v1";

/// Token granted for a passcode
pub fn access_token(passcode: &str) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(passcode.as_bytes())
        .map_err(|e| AppError::Internal(format!("Invalid access key: {}", e)))?;
    mac.update(TOKEN_LABEL);

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Constant-time check of a presented token against the passcode
pub fn verify_access_token(passcode: &str, token: &str) -> bool {
    let Ok(presented) = BASE64.decode(token.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(passcode.as_bytes()) else {
        return false;
    };
    mac.update(TOKEN_LABEL);

    mac.verify_slice(&presented).is_ok()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Reject requests without a valid access token while a passcode is set
pub async fn access_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let Some(passcode) = state.config.access.passcode() else {
        return next.run(request).await;
    };

    let presented = jar
        .get(ACCESS_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(request.headers()).map(str::to_string));

    match presented {
        Some(token) if verify_access_token(passcode, &token) => next.run(request).await,
        Some(_) => AppError::Unauthorized("Invalid access token".to_string()).into_response(),
        None => AppError::Unauthorized("Passcode required".to_string()).into_response(),
    }
}
