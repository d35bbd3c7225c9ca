//! HTTP handlers for green bean inventory

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use shared::{BeanRecord, InventoryAdjustment};

use crate::error::AppResult;
use crate::services::bean::{AdjustQuantityInput, AdjustmentOutcome, BeanService, CreateBeanInput};
use crate::AppState;

/// List all beans
pub async fn list_beans(State(state): State<AppState>) -> AppResult<Json<Vec<BeanRecord>>> {
    let service = BeanService::new(state.db);
    let beans = service.list_beans().await?;
    Ok(Json(beans))
}

/// Add a bean
pub async fn create_bean(
    State(state): State<AppState>,
    Json(input): Json<CreateBeanInput>,
) -> AppResult<(StatusCode, Json<BeanRecord>)> {
    let service = BeanService::new(state.db);
    let bean = service.create_bean(input).await?;
    Ok((StatusCode::CREATED, Json(bean)))
}

/// Get a bean by ID
pub async fn get_bean(
    State(state): State<AppState>,
    Path(bean_id): Path<Uuid>,
) -> AppResult<Json<BeanRecord>> {
    let service = BeanService::new(state.db);
    let bean = service.get_bean(bean_id).await?;
    Ok(Json(bean))
}

/// Adjust a bean's quantity
pub async fn adjust_quantity(
    State(state): State<AppState>,
    Path(bean_id): Path<Uuid>,
    Json(input): Json<AdjustQuantityInput>,
) -> AppResult<(StatusCode, Json<AdjustmentOutcome>)> {
    let service = BeanService::new(state.db);
    let outcome = service.adjust_quantity(bean_id, input).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// List a bean's adjustments
pub async fn list_adjustments(
    State(state): State<AppState>,
    Path(bean_id): Path<Uuid>,
) -> AppResult<Json<Vec<InventoryAdjustment>>> {
    let service = BeanService::new(state.db);
    let adjustments = service.list_adjustments(bean_id).await?;
    Ok(Json(adjustments))
}
