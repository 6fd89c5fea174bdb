use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::util::ServiceExt;

use jobboard_gate::{create_app, GateConfig};

fn app() -> Result<Router> {
    Ok(create_app(GateConfig::default())?)
}

async fn get(app: Router, uri: &str, cookie: Option<&str>) -> Result<Response> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    Ok(app.oneshot(builder.body(Body::empty())?).await?)
}

fn location(resp: &Response) -> Option<&str> {
    resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
}

async fn page(resp: Response) -> Result<String> {
    let bytes = body::to_bytes(resp.into_body(), 1_048_576).await?;
    let v: Value = serde_json::from_slice(&bytes)?;
    Ok(v["page"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn private_page_without_cookie_redirects_to_sign_in() -> Result<()> {
    let resp = get(app()?, "/admin-dashboard", None).await?;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/sign-in?redirect=%2Fadmin-dashboard"));
    Ok(())
}

#[tokio::test]
async fn private_page_with_cookie_is_served() -> Result<()> {
    let resp = get(app()?, "/admin-dashboard/users", Some("login=true")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(page(resp).await?, "/admin-dashboard/users");
    Ok(())
}

#[tokio::test]
async fn malformed_cookie_counts_as_signed_out() -> Result<()> {
    let resp = get(app()?, "/notifications", Some("login=yes")).await?;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/sign-in?redirect=%2Fnotifications"));
    Ok(())
}

#[tokio::test]
async fn sign_in_while_signed_in_goes_home() -> Result<()> {
    let resp = get(app()?, "/sign-in", Some("login=true")).await?;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp), Some("/"));

    let resp = get(app()?, "/sign-in", Some("login=false")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn public_page_needs_no_cookie() -> Result<()> {
    let resp = get(app()?, "/find-jobs", None).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(page(resp).await?, "/find-jobs");
    Ok(())
}

#[tokio::test]
async fn unknown_path_is_rewritten_to_not_found() -> Result<()> {
    let resp = get(app()?, "/some/random/unmapped/path", Some("login=true")).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(location(&resp).is_none(), "rewrite must not redirect");
    assert_eq!(page(resp).await?, "/not-found");
    Ok(())
}

#[tokio::test]
async fn non_get_to_unknown_path_is_not_found() -> Result<()> {
    let req = Request::builder()
        .method("POST")
        .uri("/some/unmapped/path")
        .body(Body::empty())?;
    let resp = app()?.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(location(&resp).is_none());
    assert_eq!(page(resp).await?, "/not-found");
    Ok(())
}

#[tokio::test]
async fn static_assets_skip_the_gate() -> Result<()> {
    let resp = get(app()?, "/_next/static/chunk.js", None).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(page(resp).await?, "/_next/static/chunk.js");
    Ok(())
}

#[tokio::test]
async fn custom_cookie_name_is_honoured() -> Result<()> {
    let config = GateConfig {
        auth_cookie_name: "signed_in".to_string(),
        ..GateConfig::default()
    };
    let app = create_app(config)?;

    let resp = get(app.clone(), "/upload-cv", Some("login=true")).await?;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    let resp = get(app, "/upload-cv", Some("signed_in=true")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}
