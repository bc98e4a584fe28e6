//! Client builder with typestate pattern.

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::RwLock;
use url::Url;

use super::inner::ClientInner;
use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::Client;

/// User agent reported by every request.
const USER_AGENT: &str = concat!("loomdb-rust/", env!("CARGO_PKG_VERSION"));

/// Marker type: URL not yet provided.
pub struct NoUrl;

/// Marker type: URL has been provided.
pub struct HasUrl;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern to ensure the required base URL is provided
/// at compile time. The credential is optional at construction: anonymous
/// bootstrap calls (creating the very first application) are allowed to
/// proceed without one.
///
/// ## Example
///
/// ```rust
/// use loomdb::Client;
///
/// let client = Client::builder()
///     .url("https://api.loomdb.dev")
///     .token("llt_abc123")
///     .build()?;
/// # Ok::<(), loomdb::Error>(())
/// ```
pub struct ClientBuilder<UrlState> {
    url: Option<String>,
    token: Option<Credential>,
    _url_state: PhantomData<UrlState>,
}

impl ClientBuilder<NoUrl> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            token: None,
            _url_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoUrl> {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder<NoUrl> {
    /// Sets the LoomDB base URL (e.g. `https://api.loomdb.dev`).
    pub fn url(self, url: impl Into<String>) -> ClientBuilder<HasUrl> {
        ClientBuilder {
            url: Some(url.into()),
            token: self.token,
            _url_state: PhantomData,
        }
    }
}

impl<U> ClientBuilder<U> {
    /// Sets the client-wide default credential.
    ///
    /// Every call that does not carry its own override uses this token.
    /// It can be replaced later via [`Client::set_token`].
    #[must_use]
    pub fn token(mut self, token: impl Into<Credential>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl ClientBuilder<HasUrl> {
    /// Builds the client.
    ///
    /// Fails with a configuration error when the base URL does not parse
    /// or the underlying HTTP executor cannot be constructed. No network
    /// call is made.
    pub fn build(self) -> Result<Client> {
        let Some(url) = self.url else {
            return Err(Error::configuration("base URL is required"));
        };
        let base_url = Url::parse(&url)?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                Error::configuration(format!("failed to create HTTP client: {}", e)).with_source(e)
            })?;

        Ok(Client::from_inner(ClientInner {
            base_url,
            http,
            token: RwLock::new(self.token),
        }))
    }
}

impl Client {
    pub(crate) fn from_inner(inner: ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Client;
    use crate::error::ErrorKind;

    #[test]
    fn test_build_with_url_only() {
        let client = Client::builder().url("https://api.loomdb.dev").build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_rejects_bad_url() {
        let err = Client::builder().url("not a url").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_build_with_token() {
        let client = Client::builder()
            .url("https://api.loomdb.dev")
            .token("llt_abc")
            .build()
            .unwrap();
        assert_eq!(client.url(), "https://api.loomdb.dev/");
    }
}
