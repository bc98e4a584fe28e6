//! Credential type for LoomDB authentication.

use std::fmt;

/// An opaque bearer credential for the LoomDB API.
///
/// A credential is the `key` of a token created for an application or an
/// environment. The SDK attaches it as the `token` header on every request
/// it is resolved for; it never inspects or transforms the value.
///
/// Two lifecycles exist:
///
/// - a *client-wide default*, set at construction or via
///   [`Client::set_token`](crate::Client::set_token), used by every call
///   that does not supply its own
/// - a *call-scoped override*, supplied through `.with_token(...)` on a
///   scoped client, which takes precedence and is never persisted
///
/// ## Example
///
/// ```rust
/// use loomdb::Credential;
///
/// let cred = Credential::new("llt_01JFQ...");
/// assert_eq!(cred.as_str(), "llt_01JFQ...");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Creates a credential from a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

impl From<&crate::types::TokenDescriptor> for Credential {
    fn from(token: &crate::types::TokenDescriptor) -> Self {
        Self(token.key.clone())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}
