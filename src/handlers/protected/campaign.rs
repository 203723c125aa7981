use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::fetch::FetchParams;
use crate::database::models::{Campaign, CampaignUpdate, NewCampaign};
use crate::fetch::FetchResult;
use crate::handlers::AppState;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/v1/campaign
pub async fn create(State(state): State<AppState>, Json(body): Json<NewCampaign>) -> ApiResult<Campaign> {
    let campaign = state.campaigns.create(body).await?;
    Ok(ApiResponse::created(campaign))
}

/// GET /api/v1/campaign/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Campaign> {
    Ok(ApiResponse::success(state.campaigns.get(id).await?))
}

/// PUT /api/v1/campaign/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<CampaignUpdate>,
) -> ApiResult<Campaign> {
    Ok(ApiResponse::success(state.campaigns.update(id, body).await?))
}

/// DELETE /api/v1/campaign/:id - soft delete
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Campaign> {
    Ok(ApiResponse::success(state.campaigns.delete(id).await?))
}

/// GET /api/v1/campaign/fetch?fields=&filters=&limit=
pub async fn fetch(State(state): State<AppState>, Query(params): Query<FetchParams>) -> ApiResult<Vec<FetchResult>> {
    let request = params.into_request()?;
    let results = state.engine.fetch_campaigns(&request).await?;
    Ok(ApiResponse::success(results))
}
