use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::authentication::models::RequestContext;

/// What a route demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Anyone may call the route.
    Open,
    /// The request context must carry an authenticated identity.
    #[serde(alias = "authenticated")]
    RequiresAuthentication,
}

/// One row of the access table.
///
/// `pattern` is either an exact path (`/hello`) or a prefix pattern ending in
/// `/**` (`/api/**`), which matches the prefix itself and everything below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub pattern: String,
    pub requirement: Requirement,
}

impl RouteRule {
    pub fn new(pattern: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            pattern: pattern.into(),
            requirement,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self.pattern.strip_suffix("/**") {
            Some(prefix) => {
                path == prefix
                    || (path.starts_with(prefix) && path[prefix.len()..].starts_with('/'))
            }
            None => self.pattern == path,
        }
    }
}

/// Rejection produced when a protected route is reached without an identity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Authentication required for {path}")]
pub struct AccessDenied {
    pub path: String,
}

/// Static route-to-requirement table, evaluated after the authentication gate.
///
/// Rules are checked in order and the first match wins. Paths that no rule
/// matches get `fallback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    rules: Vec<RouteRule>,
    fallback: Requirement,
}

impl AccessPolicy {
    pub fn new(rules: Vec<RouteRule>, fallback: Requirement) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn fallback(&self) -> Requirement {
        self.fallback
    }

    /// Requirement that applies to `path`.
    pub fn requirement_for(&self, path: &str) -> Requirement {
        self.rules
            .iter()
            .find(|rule| rule.matches(path))
            .map_or(self.fallback, |rule| rule.requirement)
    }

    /// Decide whether a request for `path` may proceed.
    ///
    /// # Errors
    /// * `AccessDenied` - Route requires authentication and the context has none
    pub fn evaluate(&self, path: &str, context: &RequestContext) -> Result<(), AccessDenied> {
        match self.requirement_for(path) {
            Requirement::Open => Ok(()),
            Requirement::RequiresAuthentication if context.is_authenticated() => Ok(()),
            Requirement::RequiresAuthentication => Err(AccessDenied {
                path: path.to_string(),
            }),
        }
    }
}

impl Default for AccessPolicy {
    /// `/login` open, `/hello` protected, everything else protected.
    fn default() -> Self {
        Self::new(
            vec![
                RouteRule::new("/login", Requirement::Open),
                RouteRule::new("/hello", Requirement::RequiresAuthentication),
            ],
            Requirement::RequiresAuthentication,
        )
    }
}
