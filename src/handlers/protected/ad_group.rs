use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::fetch::FetchParams;
use crate::database::models::{AdGroup, AdGroupUpdate, NewAdGroup};
use crate::handlers::AppState;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/v1/ad_group
pub async fn create(State(state): State<AppState>, Json(body): Json<NewAdGroup>) -> ApiResult<AdGroup> {
    let ad_group = state.ad_groups.create(body).await?;
    Ok(ApiResponse::created(ad_group))
}

/// GET /api/v1/ad_group/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<AdGroup> {
    Ok(ApiResponse::success(state.ad_groups.get(id).await?))
}

/// PUT /api/v1/ad_group/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AdGroupUpdate>,
) -> ApiResult<AdGroup> {
    Ok(ApiResponse::success(state.ad_groups.update(id, body).await?))
}

/// DELETE /api/v1/ad_group/:id - soft delete
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<AdGroup> {
    Ok(ApiResponse::success(state.ad_groups.delete(id).await?))
}

/// GET /api/v1/ad_group/fetch?fields=&filters=&limit=
pub async fn fetch(State(state): State<AppState>, Query(params): Query<FetchParams>) -> ApiResult<Vec<AdGroup>> {
    let request = params.into_request()?;
    let ad_groups = state.engine.fetch_ad_groups(&request).await?;
    Ok(ApiResponse::success(ad_groups))
}

/// GET /api/v1/ad_group/by_ks_name/:ks_name
pub async fn by_ks_name(State(state): State<AppState>, Path(ks_name): Path<String>) -> ApiResult<Vec<AdGroup>> {
    Ok(ApiResponse::success(state.ad_groups.find_not_deleted_by_ks_name(&ks_name).await?))
}
