use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::app::AppState;
use crate::routing::RouteDecision;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassifyQuery {
    /// Page path, e.g. `/admin-dashboard`.
    pub path: String,
    #[serde(default)]
    pub authenticated: bool,
}

/// Shows what the page gate would do with a navigation, without performing it.
#[utoipa::path(
    get,
    path = "/api/routes/classify",
    tag = "Routes",
    params(ClassifyQuery),
    responses((status = 200, description = "Gate decision for the path", body = RouteDecision))
)]
pub async fn classify_route(
    State(state): State<AppState>,
    Query(query): Query<ClassifyQuery>,
) -> Json<RouteDecision> {
    Json(state.routes.classify(&query.path, query.authenticated))
}
