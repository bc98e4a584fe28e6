//! Token types returned by the provisioning endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Permission level attached to a token at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Full read/write access to the token's scope.
    All,
    /// Read access only.
    ReadOnly,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::All => write!(f, "ALL"),
            Permission::ReadOnly => write!(f, "READ_ONLY"),
        }
    }
}

/// A token issued for an application or environment.
///
/// The SDK treats the token as opaque beyond reading `key` for subsequent
/// credential use:
///
/// ```rust
/// use loomdb::{Credential, Permission, TokenDescriptor};
///
/// let token = TokenDescriptor {
///     key: "llt_abc".into(),
///     permission: Permission::All,
/// };
/// let cred = Credential::from(&token);
/// assert_eq!(cred.as_str(), "llt_abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    /// The token value, usable as a [`Credential`](crate::Credential).
    pub key: String,
    /// The permission level the token was created with.
    pub permission: Permission,
}

/// Response to creating an application.
///
/// Carries the token sets for the new application and, when a bootstrap
/// environment was requested, for that environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCreated {
    /// The application name as registered by the service.
    pub application_name: String,
    /// The bootstrap environment name, when one was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_name: Option<String>,
    /// Tokens scoped to the whole application.
    pub application_tokens: Vec<TokenDescriptor>,
    /// Tokens scoped to the bootstrap environment; empty when no
    /// environment was created.
    #[serde(default)]
    pub environment_tokens: Vec<TokenDescriptor>,
}

/// Response to creating an environment within an existing application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentCreated {
    /// The environment name as registered by the service.
    pub environment_name: String,
    /// Tokens scoped to the new environment.
    #[serde(default)]
    pub tokens: Vec<TokenDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_wire_format() {
        assert_eq!(serde_json::to_string(&Permission::All).unwrap(), "\"ALL\"");
        assert_eq!(
            serde_json::to_string(&Permission::ReadOnly).unwrap(),
            "\"READ_ONLY\""
        );
        assert_eq!(
            serde_json::from_str::<Permission>("\"READ_ONLY\"").unwrap(),
            Permission::ReadOnly
        );
    }

    #[test]
    fn test_permission_display() {
        assert_eq!(Permission::All.to_string(), "ALL");
        assert_eq!(Permission::ReadOnly.to_string(), "READ_ONLY");
    }

    #[test]
    fn test_application_created_deserialization() {
        let created: ApplicationCreated = serde_json::from_value(serde_json::json!({
            "applicationName": "shop",
            "environmentName": "prod",
            "applicationTokens": [{"key": "llt_app", "permission": "ALL"}],
            "environmentTokens": [{"key": "llt_env", "permission": "READ_ONLY"}]
        }))
        .unwrap();

        assert_eq!(created.application_name, "shop");
        assert_eq!(created.environment_name.as_deref(), Some("prod"));
        assert_eq!(created.application_tokens[0].key, "llt_app");
        assert_eq!(
            created.environment_tokens[0].permission,
            Permission::ReadOnly
        );
    }

    #[test]
    fn test_application_created_without_environment() {
        let created: ApplicationCreated = serde_json::from_value(serde_json::json!({
            "applicationName": "shop",
            "applicationTokens": [{"key": "llt_app", "permission": "ALL"}]
        }))
        .unwrap();

        assert!(created.environment_name.is_none());
        assert!(created.environment_tokens.is_empty());
    }

    #[test]
    fn test_environment_created_deserialization() {
        let created: EnvironmentCreated = serde_json::from_value(serde_json::json!({
            "environmentName": "staging",
            "tokens": [{"key": "llt_stg", "permission": "ALL"}]
        }))
        .unwrap();

        assert_eq!(created.environment_name, "staging");
        assert_eq!(created.tokens.len(), 1);
    }
}
