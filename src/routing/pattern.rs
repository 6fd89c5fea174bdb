use regex::Regex;

use crate::errors::AppError;

/// A page path template compiled to an anchored regex.
///
/// - `:name` matches exactly one path segment
/// - a trailing `/*` matches zero or more further segments
/// - a `*` inside a segment matches any characters
/// - every pattern also accepts an optional `/...` tail
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    regex: Regex,
}

impl RoutePattern {
    pub fn compile(source: &str) -> Result<Self, AppError> {
        let regex = Regex::new(&to_regex(source)?)
            .map_err(|err| AppError::configuration(format!("invalid route pattern '{source}': {err}")))?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> &str {
        self.regex.as_str()
    }
}

fn to_regex(source: &str) -> Result<String, AppError> {
    if !source.starts_with('/') {
        return Err(AppError::configuration(format!("route pattern '{source}' must start with '/'")));
    }

    // "/profile/*" is "/profile" plus the optional tail every pattern already gets
    let base = source.strip_suffix("/*").unwrap_or(source);

    let mut body = String::with_capacity(base.len() + 16);
    for segment in base.split('/').skip(1) {
        body.push('/');
        if let Some(name) = segment.strip_prefix(':') {
            if name.is_empty() {
                return Err(AppError::configuration(format!("route pattern '{source}' has an unnamed parameter")));
            }
            body.push_str("[^/]+");
        } else {
            let literal: Vec<String> = segment.split('*').map(regex::escape).collect();
            body.push_str(&literal.join(".*"));
        }
    }

    Ok(format!("^{body}(?:/.*)?$"))
}
