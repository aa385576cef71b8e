use axum::{
    extract::{rejection::JsonRejection, Path},
    Extension, Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::observer::ObserverContext;

use super::utils::{json_payload, parse_id};

/// GET /api/students/:id - show single record by id
pub async fn get(Extension(state): Extension<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&id)?;

    match state.store.get(id).await? {
        Some(student) => Ok(ApiResponse::success(state.serializer.to_representation(&student))),
        None => Err(ApiError::not_found("Not found.")),
    }
}

/// PUT /api/students/:id - full update, every writable required field must be present
pub async fn put(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    update(state, id, payload, false).await
}

/// PATCH /api/students/:id - partial update
pub async fn patch(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    update(state, id, payload, true).await
}

/// DELETE /api/students/:id
pub async fn delete(Extension(state): Extension<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id)?;

    let ctx = ObserverContext::delete(state.serializer.clone(), state.store.clone(), id);
    let ctx = state.pipeline.execute(ctx).await?;

    if !ctx.deleted {
        return Err(ApiError::not_found("Not found."));
    }
    Ok(ApiResponse::no_content())
}

async fn update(
    state: AppState,
    id: String,
    payload: Result<Json<Value>, JsonRejection>,
    partial: bool,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    let payload = json_payload(payload)?;

    let ctx = ObserverContext::update(state.serializer.clone(), state.store.clone(), id, payload, partial);
    let ctx = state.pipeline.execute(ctx).await?;

    let updated = ctx
        .result
        .ok_or_else(|| ApiError::internal_server_error("Update produced no record"))?;
    Ok(ApiResponse::success(state.serializer.to_representation(&updated)))
}
