use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::{any, get, post};
use axum::Router;
use tower::Layer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::authz::PermissionTable;
use crate::config::GateConfig;
use crate::errors::AppError;
use crate::routes::{classify, health, pages, permissions};
use crate::routing::{route_access, RouteTable};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GateConfig>,
    pub routes: Arc<RouteTable>,
    pub permissions: Arc<PermissionTable>,
}

impl AppState {
    pub fn new(config: GateConfig, routes: RouteTable, permissions: PermissionTable) -> Self {
        Self {
            config: Arc::new(config),
            routes: Arc::new(routes),
            permissions: Arc::new(permissions),
        }
    }

    /// Job-board route and permission tables under `config`.
    pub fn job_board(config: GateConfig) -> Result<Self, AppError> {
        let routes = RouteTable::job_board(&config)?;
        Ok(Self::new(config, routes, PermissionTable::job_board()))
    }
}

pub fn create_app(config: GateConfig) -> Result<Router, AppError> {
    let state = AppState::job_board(config)?;
    Ok(build_router(state))
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    let cors = match state
        .config
        .cors_allow_origin
        .as_deref()
        .and_then(|origin| HeaderValue::from_str(origin).ok())
    {
        Some(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        None => cors.allow_origin(Any),
    };

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route("/permissions/check", post(permissions::check_permission))
        .route("/permissions/roles/:role", get(permissions::role_grants))
        .route("/routes/classify", get(classify::classify_route));

    let page_routes: Router = Router::new()
        .route(state.routes.not_found_path(), any(pages::not_found))
        .fallback(pages::render_page);

    // The gate wraps the page router as a service rather than as a route layer so that
    // rewriting the URI happens before the page router picks a handler.
    let gated_pages = axum::middleware::from_fn_with_state(state.clone(), route_access).layer(page_routes);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(gated_pages)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
