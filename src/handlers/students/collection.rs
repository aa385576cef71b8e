use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::observer::ObserverContext;

use super::utils::{json_payload, query_params};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/students - list records in id order
pub async fn get(
    Extension(state): Extension<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Vec<Value>> {
    let query = query_params(query)?;
    let limit = state.config.effective_limit(query.limit);
    let offset = query.offset.map(|o| o.max(0));

    let students = state.store.list(limit, offset).await?;
    tracing::debug!("Listed {} students (limit={:?}, offset={:?})", students.len(), limit, offset);

    let data = students
        .iter()
        .map(|student| state.serializer.to_representation(student))
        .collect();
    Ok(ApiResponse::success(data))
}

/// POST /api/students - validate and create a record
pub async fn post(
    Extension(state): Extension<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_payload(payload)?;

    let ctx = ObserverContext::create(state.serializer.clone(), state.store.clone(), payload);
    let ctx = state.pipeline.execute(ctx).await?;

    let created = ctx
        .result
        .ok_or_else(|| ApiError::internal_server_error("Create produced no record"))?;
    Ok(ApiResponse::created(state.serializer.to_representation(&created)))
}
