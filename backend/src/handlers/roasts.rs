//! HTTP handlers for roast history

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::{HistoryStats, PaginatedResponse, Pagination};

use crate::error::{AppError, AppResult};
use crate::services::roast::{CreateRoastInput, RoastService, RoastView};
use crate::AppState;

/// List roasts, newest first
pub async fn list_roasts(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<PaginatedResponse<RoastView>>> {
    let service = RoastService::new(state.db);
    let roasts = service.list_roasts(&pagination).await?;
    Ok(Json(roasts))
}

/// Enter a roast by hand
pub async fn create_roast(
    State(state): State<AppState>,
    Json(input): Json<CreateRoastInput>,
) -> AppResult<(StatusCode, Json<RoastView>)> {
    let service = RoastService::new(state.db);
    let roast = service.create_roast(input).await?;
    Ok((StatusCode::CREATED, Json(roast)))
}

/// Most recent roast
pub async fn latest_roast(State(state): State<AppState>) -> AppResult<Json<RoastView>> {
    let service = RoastService::new(state.db);
    let roast = service
        .latest_roast()
        .await?
        .ok_or_else(|| AppError::NotFound("Roast".to_string()))?;
    Ok(Json(roast))
}

/// History summary
pub async fn history_stats(State(state): State<AppState>) -> AppResult<Json<HistoryStats>> {
    let service = RoastService::new(state.db);
    let stats = service.history_stats().await?;
    Ok(Json(stats))
}

/// Get a roast by ID
pub async fn get_roast(
    State(state): State<AppState>,
    Path(roast_id): Path<Uuid>,
) -> AppResult<Json<RoastView>> {
    let service = RoastService::new(state.db);
    let roast = service.get_roast(roast_id).await?;
    Ok(Json(roast))
}

/// Delete a roast
pub async fn delete_roast(
    State(state): State<AppState>,
    Path(roast_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = RoastService::new(state.db);
    service.delete_roast(roast_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
