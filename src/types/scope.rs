//! Tenant scope identifying the namespace operations run against.

use std::fmt;

/// The (application, environment) pair identifying a logical data
/// namespace.
///
/// Environment is optional only for application-level operations (creating
/// an application, application tokens, deleting an application) and for an
/// application-wide change subscription. All entity operations run against
/// a scope with both parts set.
///
/// ## Example
///
/// ```rust
/// use loomdb::TenantScope;
///
/// let app_wide = TenantScope::application("shop");
/// assert!(app_wide.environment_name().is_none());
///
/// let env = TenantScope::environment("shop", "prod");
/// assert_eq!(env.environment_name(), Some("prod"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantScope {
    application: String,
    environment: Option<String>,
}

impl TenantScope {
    /// Creates an application-wide scope (no environment).
    pub fn application(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            environment: None,
        }
    }

    /// Creates a scope for one environment within an application.
    pub fn environment(application: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            environment: Some(environment.into()),
        }
    }

    /// Returns the application name.
    pub fn application_name(&self) -> &str {
        &self.application
    }

    /// Returns the environment name, if this scope names one.
    pub fn environment_name(&self) -> Option<&str> {
        self.environment.as_deref()
    }
}

impl fmt::Display for TenantScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.environment_name() {
            Some(env) => write!(f, "{}/{}", self.application, env),
            None => write!(f, "{}", self.application),
        }
    }
}
