use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{authz, models, routes, routing};

#[derive(OpenApi)]
#[openapi(
	paths(
		routes::health::health,
		routes::permissions::check_permission,
		routes::permissions::role_grants,
		routes::classify::classify_route
	),
	components(
		schemas(
			routes::health::HealthResponse,
			routes::permissions::PermissionCheckRequest,
			routes::permissions::PermissionCheckResponse,
			authz::Role,
			authz::User,
			authz::GrantSummary,
			authz::RuleKind,
			routing::RouteDecision,
			routing::PassReason,
			routing::RouteCategory,
			models::job::JobPosting,
			models::job::JobStatus,
			models::job::JobApplication,
			models::job::ApplicationStatus,
			models::cv::CvDocument,
			models::notification::Notification
		)
	),
	tags(
		(name = "Health", description = "Service health"),
		(name = "Permissions", description = "Role/permission evaluation"),
		(name = "Routes", description = "Page access classification")
	)
)]
pub struct ApiDoc;

pub fn build_openapi(port: u16) -> anyhow::Result<utoipa::openapi::OpenApi> {
	let mut doc = serde_json::to_value(ApiDoc::openapi())?;

	add_examples(&mut doc);
	ensure_servers(&mut doc, port);

	Ok(serde_json::from_value(doc)?)
}

pub fn swagger_routes(doc: utoipa::openapi::OpenApi) -> anyhow::Result<Router> {
	let swagger_config = utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"])
		.try_it_out_enabled(true)
		.with_credentials(true);

	let doc_json = Arc::new(serde_json::to_value(&doc)?);

	let json_route = {
		let doc_json = Arc::clone(&doc_json);
		get(move || {
			let doc_json = Arc::clone(&doc_json);
			async move { Json((*doc_json).clone()) }
		})
	};

	Ok(Router::new()
		.route("/api-docs/openapi.json", json_route)
		.merge(SwaggerUi::new("/docs").config(swagger_config)))
}

fn add_examples(doc: &mut Value) {
	let Some(operation) = doc.pointer_mut("/paths/~1api~1permissions~1check/post") else { return; };
	let Some(app_json) = operation
		.pointer_mut("/requestBody/content/application~1json")
		.and_then(Value::as_object_mut)
	else {
		return;
	};

	app_json.entry("example").or_insert_with(|| {
		json!({
			"user": {
				"id": "11111111-1111-1111-1111-111111111111",
				"roles": ["ENTERPRISE"]
			},
			"resource": "job",
			"action": "update",
			"data": {
				"id": "22222222-2222-2222-2222-222222222222",
				"enterprise_id": "11111111-1111-1111-1111-111111111111",
				"title": "Senior Rust Engineer"
			}
		})
	});
}

fn ensure_servers(doc: &mut Value, port: u16) {
	let server_url = format!("http://localhost:{}", port);

	match doc.get_mut("servers") {
		Some(Value::Array(arr)) => {
			let has = arr.iter().any(|v| v.get("url").and_then(Value::as_str) == Some(server_url.as_str()));
			if !has {
				arr.push(json!({ "url": server_url }));
			}
		}
		_ => {
			doc["servers"] = json!([{ "url": server_url }]);
		}
	}
}
