use std::collections::{HashMap, HashSet};

use serde::Serialize;
use utoipa::ToSchema;

use super::pattern::RoutePattern;
use crate::config::{validate_location, GateConfig};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RouteCategory {
    /// Sign-in style pages; signed-in users are sent home.
    Auth,
    Public,
    Private,
}

/// Uncompiled route lists plus the reserved asset prefixes.
#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub public: Vec<String>,
    /// Exact paths, no `:param` or `*`.
    pub auth: Vec<String>,
    pub private: Vec<String>,
    pub static_prefixes: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RouteSpec {
    fn default() -> Self {
        Self {
            public: owned(&[
                "/",
                "/find-jobs",
                "/find-jobs/:id",
                "/companies",
                "/companies/:id",
                "/candidates/:id",
                "/about",
                "/not-found",
            ]),
            auth: owned(&["/sign-in", "/sign-up", "/forgot-password", "/reset-password"]),
            private: owned(&[
                "/profile/*",
                "/my-applications/*",
                "/notifications",
                "/upload-cv",
                "/post-job",
                "/jobs/:id/edit",
                "/jobs/:id/candidates",
                "/enterprise-dashboard/*",
                "/admin-dashboard/*",
            ]),
            static_prefixes: owned(&["/_next", "/static", "/images", "/favicon.ico"]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PassReason {
    StaticAsset,
    AuthPage,
    Public,
    Private,
    /// Matched some pattern, but not under the rule of its own category.
    Uncategorized,
}

/// The outcome for one navigation request. Every path maps to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteDecision {
    Pass { reason: PassReason },
    RedirectHome { location: String },
    RedirectSignIn { location: String },
    RewriteNotFound { target: String },
}

impl RouteDecision {
    pub fn label(&self) -> &'static str {
        match self {
            RouteDecision::Pass { .. } => "pass",
            RouteDecision::RedirectHome { .. } => "redirect_home",
            RouteDecision::RedirectSignIn { .. } => "redirect_sign_in",
            RouteDecision::RewriteNotFound { .. } => "rewrite_not_found",
        }
    }
}

/// Compiled routes, ordered auth -> public -> private.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<(RouteCategory, RoutePattern)>,
    auth_pages: HashSet<String>,
    static_prefixes: Vec<String>,
    home_path: String,
    sign_in_path: String,
    not_found_path: String,
}

impl RouteTable {
    /// Compiles `spec` and checks that its categories are well formed:
    /// auth pages are plain paths and no pattern is listed under two categories.
    /// The redirect and rewrite targets must be usable as a `Location` header.
    pub fn build(spec: &RouteSpec, config: &GateConfig) -> Result<Self, AppError> {
        validate_location("home path", &config.home_path)?;
        validate_location("sign-in path", &config.sign_in_path)?;
        validate_location("not-found path", &config.not_found_path)?;

        let mut seen: HashMap<&str, RouteCategory> = HashMap::new();
        let mut entries = Vec::with_capacity(spec.auth.len() + spec.public.len() + spec.private.len());

        let lists = [
            (RouteCategory::Auth, &spec.auth),
            (RouteCategory::Public, &spec.public),
            (RouteCategory::Private, &spec.private),
        ];

        for (category, sources) in lists {
            for source in sources.iter() {
                if category == RouteCategory::Auth && (source.contains(':') || source.contains('*')) {
                    return Err(AppError::configuration(format!(
                        "auth page '{source}' must be an exact path"
                    )));
                }

                if let Some(previous) = seen.insert(source.as_str(), category) {
                    return Err(AppError::configuration(format!(
                        "route '{source}' is listed as both {previous:?} and {category:?}"
                    )));
                }

                entries.push((category, RoutePattern::compile(source)?));
            }
        }

        tracing::debug!(routes = entries.len(), "route table compiled");

        Ok(Self {
            entries,
            auth_pages: spec.auth.iter().cloned().collect(),
            static_prefixes: spec.static_prefixes.clone(),
            home_path: config.home_path.clone(),
            sign_in_path: config.sign_in_path.clone(),
            not_found_path: config.not_found_path.clone(),
        })
    }

    pub fn job_board(config: &GateConfig) -> Result<Self, AppError> {
        Self::build(&RouteSpec::default(), config)
    }

    pub fn entries(&self) -> impl Iterator<Item = (RouteCategory, &RoutePattern)> {
        self.entries.iter().map(|(category, pattern)| (*category, pattern))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn not_found_path(&self) -> &str {
        &self.not_found_path
    }

    pub fn is_static_asset(&self, path: &str) -> bool {
        self.static_prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
            || (path.contains('.') && !path.ends_with('/'))
    }

    fn matches(&self, category: RouteCategory, path: &str) -> bool {
        self.entries
            .iter()
            .any(|(c, pattern)| *c == category && pattern.matches(path))
    }

    /// Decides what happens to a navigation to `path`.
    ///
    /// The sign-in `redirect` parameter is percent-encoded with every byte outside
    /// `A-Z a-z 0-9 - _ . ~` escaped, so `(`, `)`, `!`, `'` and `*` are escaped too
    /// (`/profile/(x)` -> `%2Fprofile%2F%28x%29`). It decodes to the same path.
    pub fn classify(&self, path: &str, authenticated: bool) -> RouteDecision {
        if self.is_static_asset(path) {
            return RouteDecision::Pass { reason: PassReason::StaticAsset };
        }

        if !self.entries.iter().any(|(_, pattern)| pattern.matches(path)) {
            return RouteDecision::RewriteNotFound {
                target: self.not_found_path.clone(),
            };
        }

        if self.auth_pages.contains(path) {
            return if authenticated {
                RouteDecision::RedirectHome {
                    location: self.home_path.clone(),
                }
            } else {
                RouteDecision::Pass { reason: PassReason::AuthPage }
            };
        }

        if self.matches(RouteCategory::Public, path) {
            return RouteDecision::Pass { reason: PassReason::Public };
        }

        if self.matches(RouteCategory::Private, path) {
            return if authenticated {
                RouteDecision::Pass { reason: PassReason::Private }
            } else {
                RouteDecision::RedirectSignIn {
                    location: format!("{}?redirect={}", self.sign_in_path, urlencoding::encode(path)),
                }
            };
        }

        // e.g. "/sign-in/extra": the auth pattern's optional tail matched, the exact auth check did not
        tracing::debug!(path = %path, "known route outside every category, passing through");
        RouteDecision::Pass { reason: PassReason::Uncategorized }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::job_board(&GateConfig::default()).unwrap()
    }

    #[test]
    fn private_page_without_login_redirects_to_sign_in() {
        assert_eq!(
            table().classify("/admin-dashboard", false),
            RouteDecision::RedirectSignIn {
                location: "/sign-in?redirect=%2Fadmin-dashboard".to_string()
            }
        );
    }

    #[test]
    fn nested_private_path_is_fully_encoded() {
        assert_eq!(
            table().classify("/jobs/42/edit", false),
            RouteDecision::RedirectSignIn {
                location: "/sign-in?redirect=%2Fjobs%2F42%2Fedit".to_string()
            }
        );
    }

    #[test]
    fn private_page_with_login_passes() {
        assert_eq!(
            table().classify("/profile/settings", true),
            RouteDecision::Pass { reason: PassReason::Private }
        );
    }

    #[test]
    fn auth_page_sends_signed_in_users_home() {
        assert_eq!(
            table().classify("/sign-in", true),
            RouteDecision::RedirectHome { location: "/".to_string() }
        );
        assert_eq!(
            table().classify("/sign-in", false),
            RouteDecision::Pass { reason: PassReason::AuthPage }
        );
    }

    #[test]
    fn public_pages_ignore_login_state() {
        for authenticated in [false, true] {
            assert_eq!(
                table().classify("/find-jobs", authenticated),
                RouteDecision::Pass { reason: PassReason::Public }
            );
            assert_eq!(
                table().classify("/companies/acme", authenticated),
                RouteDecision::Pass { reason: PassReason::Public }
            );
        }
    }

    #[test]
    fn unknown_paths_rewrite_to_not_found() {
        assert_eq!(
            table().classify("/some/random/unmapped/path", true),
            RouteDecision::RewriteNotFound { target: "/not-found".to_string() }
        );
    }

    #[test]
    fn static_assets_pass_before_anything_else() {
        let table = table();
        for path in ["/_next/static/chunk.js", "/favicon.ico", "/images/logo", "/robots.txt"] {
            assert_eq!(
                table.classify(path, false),
                RouteDecision::Pass { reason: PassReason::StaticAsset },
                "{path}"
            );
        }
        // a dotted path ending in '/' is not an asset
        assert!(matches!(table.classify("/v1.2/", false), RouteDecision::RewriteNotFound { .. }));
    }

    #[test]
    fn redirect_parameter_escapes_reserved_punctuation() {
        assert_eq!(
            table().classify("/profile/(x)", false),
            RouteDecision::RedirectSignIn {
                location: "/sign-in?redirect=%2Fprofile%2F%28x%29".to_string()
            }
        );
    }

    #[test]
    fn auth_page_check_is_exact() {
        assert_eq!(
            table().classify("/sign-in/extra", true),
            RouteDecision::Pass { reason: PassReason::Uncategorized }
        );
    }

    #[test]
    fn classification_is_total() {
        let table = table();
        for path in ["", "/", "//", "?", "/find-jobs?x=1", "/%2F", "/ü", "/admin-dashboard/../sign-in"] {
            for authenticated in [false, true] {
                let _ = table.classify(path, authenticated).label();
            }
        }
    }

    #[test]
    fn auth_patterns_must_be_exact() {
        let mut spec = RouteSpec::default();
        spec.auth.push("/invite/:token".to_string());
        assert!(matches!(
            RouteTable::build(&spec, &GateConfig::default()),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn duplicate_categorization_is_rejected() {
        let mut spec = RouteSpec::default();
        spec.private.push("/find-jobs".to_string());
        assert!(matches!(
            RouteTable::build(&spec, &GateConfig::default()),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn targets_that_cannot_be_a_location_are_rejected() {
        let config = GateConfig {
            home_path: "/a\u{1}b".to_string(),
            ..GateConfig::default()
        };
        assert!(matches!(
            RouteTable::build(&RouteSpec::default(), &config),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn custom_redirect_targets_are_used() {
        let config = GateConfig {
            sign_in_path: "/login".to_string(),
            ..GateConfig::default()
        };
        let mut spec = RouteSpec::default();
        spec.auth = vec!["/login".to_string()];

        let table = RouteTable::build(&spec, &config).unwrap();
        assert_eq!(
            table.classify("/notifications", false),
            RouteDecision::RedirectSignIn {
                location: "/login?redirect=%2Fnotifications".to_string()
            }
        );
    }
}
