//! Client types for connecting to LoomDB.
//!
//! The SDK uses a hierarchical client structure:
//! - [`Client`]: top-level client, owns the request executor and the
//!   default credential
//! - [`ApplicationClient`](crate::control::ApplicationClient):
//!   application-scoped operations
//! - [`EnvironmentClient`](crate::control::EnvironmentClient):
//!   environment-scoped operations
//! - [`EntitiesClient`](crate::entities::EntitiesClient): CRUD over one
//!   entity kind
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use loomdb::Client;
//!
//! let client = Client::builder()
//!     .url("https://api.loomdb.dev")
//!     .token("llt_abc123")
//!     .build()?;
//!
//! let projects = client.application("shop").environment("prod").entities("projects");
//! let id = projects.write(&serde_json::json!({"title": "Project Phoenix"})).await?;
//! ```

mod builder;
mod inner;

pub use builder::{ClientBuilder, HasUrl, NoUrl};

use std::sync::Arc;

use crate::auth::Credential;
use crate::control::ApplicationClient;
use crate::error::{Error, Result};

/// The LoomDB SDK client.
///
/// This is the main entry point for the SDK. Create a client using
/// [`Client::builder()`], then navigate to an application and environment
/// to operate on entities.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe: it shares one connection pool and
/// one default-credential slot across clones. Concurrent calls are safe;
/// the orchestrator holds no per-call state. A [`set_token`](Client::set_token)
/// racing an in-flight call is benign - the call either already captured
/// its effective credential or observes the new one.
#[derive(Clone)]
pub struct Client {
    pub(crate) inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    ///
    /// # Example
    ///
    /// ```rust
    /// use loomdb::Client;
    ///
    /// let client = Client::builder()
    ///     .url("https://api.loomdb.dev")
    ///     .build()?;
    /// # Ok::<(), loomdb::Error>(())
    /// ```
    pub fn builder() -> ClientBuilder<NoUrl> {
        ClientBuilder::new()
    }

    /// Creates a client from the `LOOMDB_URL` and `LOOMDB_TOKEN`
    /// environment variables.
    ///
    /// `LOOMDB_URL` is required; `LOOMDB_TOKEN` is optional (anonymous
    /// bootstrap calls are allowed without one).
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("LOOMDB_URL")
            .map_err(|_| Error::configuration("LOOMDB_URL is not set"))?;
        let builder = Self::builder().url(url);
        match std::env::var("LOOMDB_TOKEN") {
            Ok(token) => builder.token(token).build(),
            Err(_) => builder.build(),
        }
    }

    /// Replaces the client-wide default credential.
    ///
    /// Affects every subsequent call that does not carry its own
    /// override; in-flight calls are not affected.
    pub fn set_token(&self, token: impl Into<Credential>) {
        *self.inner.token.write() = Some(token.into());
    }

    /// Clears the client-wide default credential.
    pub fn clear_token(&self) {
        *self.inner.token.write() = None;
    }

    /// Returns an application-scoped client.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let app = client.application("shop");
    /// let env = app.environment("prod");
    /// ```
    pub fn application(&self, name: impl Into<String>) -> ApplicationClient {
        ApplicationClient::new(self.clone(), name)
    }

    /// Returns the base URL of the client.
    pub fn url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    pub(crate) fn inner(&self) -> &inner::ClientInner {
        &self.inner
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_omits_credential() {
        let client = Client::builder()
            .url("https://api.loomdb.dev")
            .token("secret-token")
            .build()
            .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("api.loomdb.dev"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_set_and_clear_token() {
        let client = Client::builder()
            .url("https://api.loomdb.dev")
            .build()
            .unwrap();

        assert!(client.inner().credential(None, false).unwrap().is_none());

        client.set_token("llt_abc");
        let resolved = client.inner().credential(None, true).unwrap();
        assert_eq!(resolved.map(|c| c.as_str().to_owned()), Some("llt_abc".into()));

        client.clear_token();
        assert!(client.inner().credential(None, true).is_err());
    }

    #[test]
    fn test_call_scoped_credential_wins() {
        let client = Client::builder()
            .url("https://api.loomdb.dev")
            .token("default")
            .build()
            .unwrap();

        let call = Credential::new("override");
        let resolved = client.inner().credential(Some(&call), true).unwrap();
        assert_eq!(resolved.map(|c| c.as_str().to_owned()), Some("override".into()));
    }
}
