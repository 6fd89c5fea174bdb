use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::app::AppState;
use crate::authz::{GrantSummary, Permission, Role, User};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PermissionCheckRequest {
    /// Omit for a signed-out visitor.
    #[serde(default)]
    pub user: Option<User>,
    #[schema(example = "job")]
    pub resource: String,
    #[schema(example = "update")]
    pub action: String,
    /// Record the action targets, for rules that depend on it.
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionCheckResponse {
    pub resource: String,
    pub action: String,
    pub allowed: bool,
}

#[utoipa::path(
    post,
    path = "/api/permissions/check",
    tag = "Permissions",
    request_body = PermissionCheckRequest,
    responses(
        (status = 200, description = "Evaluation result", body = PermissionCheckResponse),
        (status = 400, description = "Unknown resource/action pair or malformed data"),
    )
)]
pub async fn check_permission(
    State(state): State<AppState>,
    Json(req): Json<PermissionCheckRequest>,
) -> AppResult<Json<PermissionCheckResponse>> {
    let permission = Permission::parse(&req.resource, &req.action).ok_or_else(|| {
        AppError::bad_request(format!("unknown permission '{}:{}'", req.resource, req.action))
    })?;

    let allowed = state
        .permissions
        .check(req.user.as_ref(), permission, req.data.as_ref())?;

    Ok(Json(PermissionCheckResponse {
        resource: permission.resource().to_string(),
        action: permission.action().to_string(),
        allowed,
    }))
}

#[utoipa::path(
    get,
    path = "/api/permissions/roles/{role}",
    tag = "Permissions",
    params(("role" = String, Path, description = "USER, ENTERPRISE or ADMIN")),
    responses(
        (status = 200, description = "Grants held by the role", body = Vec<GrantSummary>),
        (status = 404, description = "Unknown role"),
    )
)]
pub async fn role_grants(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> AppResult<Json<Vec<GrantSummary>>> {
    let role: Role = role.parse().map_err(AppError::not_found)?;
    Ok(Json(state.permissions.grants_for_role(role)))
}
