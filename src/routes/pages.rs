//! Stand-in page server behind the route gate.

use axum::http::{StatusCode, Uri};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub page: String,
}

pub async fn render_page(uri: Uri) -> Json<PageResponse> {
    Json(PageResponse {
        page: uri.path().to_string(),
    })
}

pub async fn not_found(uri: Uri) -> (StatusCode, Json<PageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(PageResponse {
            page: uri.path().to_string(),
        }),
    )
}
