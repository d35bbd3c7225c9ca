//! HTTP handlers for the live roast timer
//!
//! Transition endpoints always answer 200 with the current snapshot; a
//! transition outside its phase simply leaves the timer unchanged.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use shared::TimerSnapshot;

use crate::error::{AppError, AppResult};
use crate::services::roast::{RoastService, RoastView, SaveSessionInput};
use crate::AppState;

/// Current timer state
pub async fn get_timer(State(state): State<AppState>) -> Json<TimerSnapshot> {
    Json(state.timer.snapshot().await)
}

pub async fn start_roast(State(state): State<AppState>) -> Json<TimerSnapshot> {
    Json(state.timer.start_roast().await)
}

pub async fn log_first_crack(State(state): State<AppState>) -> Json<TimerSnapshot> {
    Json(state.timer.log_first_crack().await)
}

pub async fn end_roast(State(state): State<AppState>) -> Json<TimerSnapshot> {
    Json(state.timer.end_roast().await)
}

pub async fn end_cooling(State(state): State<AppState>) -> Json<TimerSnapshot> {
    Json(state.timer.end_cooling().await)
}

pub async fn reset_roast(State(state): State<AppState>) -> Json<TimerSnapshot> {
    Json(state.timer.reset_roast().await)
}

#[derive(Debug, Serialize)]
pub struct SavedRoastResponse {
    pub roast: RoastView,
    pub timer: TimerSnapshot,
}

/// Store the completed session as a roast, then clear the timer
pub async fn save_roast(
    State(state): State<AppState>,
    Json(input): Json<SaveSessionInput>,
) -> AppResult<(StatusCode, Json<SavedRoastResponse>)> {
    let session = state.timer.claim_completed_session().await.ok_or_else(|| {
        AppError::InvalidStateTransition(
            "Roast timer is not complete or is already being saved".to_string(),
        )
    })?;

    let roast = match RoastService::new(state.db)
        .record_completed_session(&session, input)
        .await
    {
        Ok(roast) => roast,
        Err(e) => {
            state.timer.release_save(session.start_time).await;
            return Err(e);
        }
    };
    let timer = state.timer.clear_saved_session(session.start_time).await;

    Ok((StatusCode::CREATED, Json(SavedRoastResponse { roast, timer })))
}
