use axum::http::{HeaderValue, Uri};

use crate::errors::AppError;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_AUTH_COOKIE: &str = "login";

/// Runtime settings for the gate, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub port: u16,
    /// Cookie holding the `"true"`/`"false"` login flag.
    pub auth_cookie_name: String,
    pub home_path: String,
    pub sign_in_path: String,
    pub not_found_path: String,
    /// `None` allows any origin.
    pub cors_allow_origin: Option<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            auth_cookie_name: DEFAULT_AUTH_COOKIE.to_string(),
            home_path: "/".to_string(),
            sign_in_path: "/sign-in".to_string(),
            not_found_path: "/not-found".to_string(),
            cors_allow_origin: None,
        }
    }
}

impl GateConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to touch process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("APP_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::configuration("APP_PORT must be a valid port number"))?,
            None => defaults.port,
        };

        let auth_cookie_name = lookup("AUTH_COOKIE_NAME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.auth_cookie_name);

        let home_path = path_setting(&lookup, "HOME_PATH", defaults.home_path)?;
        let sign_in_path = path_setting(&lookup, "SIGN_IN_PATH", defaults.sign_in_path)?;
        let not_found_path = path_setting(&lookup, "NOT_FOUND_PATH", defaults.not_found_path)?;

        let cors_allow_origin = lookup("CORS_ALLOW_ORIGIN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && v != "*");

        Ok(Self {
            port,
            auth_cookie_name,
            home_path,
            sign_in_path,
            not_found_path,
            cors_allow_origin,
        })
    }
}

fn path_setting<F>(lookup: &F, key: &str, default: String) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => {
            let value = value.trim().to_string();
            validate_location(key, &value)?;
            Ok(value)
        }
        None => Ok(default),
    }
}

/// Redirect and rewrite targets are used verbatim as a `Location` header or request URI.
pub(crate) fn validate_location(key: &str, value: &str) -> Result<(), AppError> {
    if !value.starts_with('/') {
        return Err(AppError::configuration(format!("{key} must start with '/'")));
    }
    if HeaderValue::from_str(value).is_err() || value.parse::<Uri>().is_err() {
        return Err(AppError::configuration(format!("{key} is not a valid URI path")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let config = GateConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.auth_cookie_name, "login");
        assert_eq!(config.sign_in_path, "/sign-in");
        assert_eq!(config.not_found_path, "/not-found");
        assert!(config.cors_allow_origin.is_none());
    }

    #[test]
    fn overrides_are_read() {
        let config = GateConfig::from_lookup(lookup_from(&[
            ("APP_PORT", "9100"),
            ("AUTH_COOKIE_NAME", "session_flag"),
            ("SIGN_IN_PATH", "/login"),
            ("CORS_ALLOW_ORIGIN", "https://jobs.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.auth_cookie_name, "session_flag");
        assert_eq!(config.sign_in_path, "/login");
        assert_eq!(config.cors_allow_origin.as_deref(), Some("https://jobs.example.com"));
    }

    #[test]
    fn invalid_port_is_a_configuration_error() {
        let err = GateConfig::from_lookup(lookup_from(&[("APP_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn relative_redirect_paths_are_rejected() {
        let err = GateConfig::from_lookup(lookup_from(&[("HOME_PATH", "home")])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn paths_unusable_as_location_are_rejected() {
        for (key, value) in [("HOME_PATH", "/a\u{1}b"), ("SIGN_IN_PATH", "/sign in"), ("NOT_FOUND_PATH", "/missing\u{7f}")] {
            let err = GateConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert!(matches!(err, AppError::Configuration(_)), "{key}={value:?} was accepted");
        }
    }

    #[test]
    fn wildcard_origin_means_any() {
        let config = GateConfig::from_lookup(lookup_from(&[("CORS_ALLOW_ORIGIN", "*")])).unwrap();
        assert!(config.cors_allow_origin.is_none());
    }
}
