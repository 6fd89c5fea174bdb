use axum::extract::{Request, State};
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use super::table::RouteDecision;
use crate::app::AppState;
use crate::errors::AppError;

/// Reads the login flag. Anything but a literal `true` counts as signed out.
pub fn is_authenticated(jar: &CookieJar, cookie_name: &str) -> bool {
    jar.get(cookie_name)
        .and_then(|cookie| cookie.value().trim().parse::<bool>().ok())
        .unwrap_or(false)
}

/// Gate in front of the page server: classifies the path and either forwards,
/// redirects, or rewrites the request to the not-found page.
pub async fn route_access(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let authenticated = is_authenticated(&jar, &state.config.auth_cookie_name);
    let path = req.uri().path().to_owned();
    let decision = state.routes.classify(&path, authenticated);

    tracing::debug!(
        path = %path,
        authenticated,
        outcome = decision.label(),
        "route access decision"
    );

    match decision {
        RouteDecision::Pass { .. } => next.run(req).await,
        RouteDecision::RedirectHome { location } | RouteDecision::RedirectSignIn { location } => {
            Redirect::temporary(&location).into_response()
        }
        RouteDecision::RewriteNotFound { target } => match target.parse::<Uri>() {
            Ok(uri) => {
                *req.uri_mut() = uri;
                next.run(req).await
            }
            Err(err) => AppError::not_found(format!("{path} ({err})")).into_response(),
        },
    }
}
