// handlers/mod.rs - HTTP surface
//
// Public (no auth) -> Protected (JWT auth when enabled)

pub mod protected;
pub mod public;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::PgJoinStore;
use crate::fetch::{FetchEngine, JoinStore};
use crate::middleware::{jwt_auth_middleware, request_trace_middleware};
use crate::services::{AdGroupService, CampaignService};

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub engine: FetchEngine,
    pub campaigns: CampaignService,
    pub ad_groups: AdGroupService,
    pub security: Arc<SecurityConfig>,
}

impl AppState {
    /// State backed by Postgres for both CRUD and dynamic fetches
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        let store: Arc<dyn JoinStore> = Arc::new(PgJoinStore::new(pool.clone()));
        Self::with_store(pool, store, config)
    }

    /// Same as [`AppState::new`] with a different join store behind the fetch engine
    pub fn with_store(pool: PgPool, store: Arc<dyn JoinStore>, config: &AppConfig) -> Self {
        Self {
            engine: FetchEngine::new(store, config.fetch.clone()),
            campaigns: CampaignService::new(pool.clone()),
            ad_groups: AdGroupService::new(pool.clone()),
            security: Arc::new(config.security.clone()),
            pool,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected API
        .merge(api_routes(&state))
        // Global middleware
        .layer(middleware::from_fn(request_trace_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes(state: &AppState) -> Router<AppState> {
    use protected::{ad_group, campaign};

    let routes = Router::new()
        .route("/api/v1/campaign", post(campaign::create))
        .route("/api/v1/campaign/fetch", get(campaign::fetch))
        .route(
            "/api/v1/campaign/:id",
            get(campaign::get).put(campaign::update).delete(campaign::delete),
        )
        .route("/api/v1/ad_group", post(ad_group::create))
        .route("/api/v1/ad_group/fetch", get(ad_group::fetch))
        .route("/api/v1/ad_group/by_ks_name/:ks_name", get(ad_group::by_ks_name))
        .route(
            "/api/v1/ad_group/:id",
            get(ad_group::get).put(ad_group::update).delete(ad_group::delete),
        );

    if state.security.enable_auth {
        routes.route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware))
    } else {
        routes
    }
}
