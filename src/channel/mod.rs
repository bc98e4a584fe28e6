//! Real-time change subscription.
//!
//! A [`ChangeChannel`] holds one persistent socket connection scoped to a
//! tenant context, decodes inbound change notifications and dispatches
//! them through an [`EventRegistry`]. The connection lifecycle is an
//! explicit state machine:
//!
//! ```text
//! Disconnected → Connecting → Open → Disconnected
//! ```
//!
//! There is no automatic reconnect: a transport failure while connecting
//! or open is terminal for that connection instance and the caller decides
//! whether to call [`connect`](ChangeChannel::connect) again.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! let channel = client.application("shop").environment("prod").events();
//!
//! channel.on("created", Arc::new(|event| {
//!     println!("{}: {}", event, event.data);
//! }));
//!
//! channel.connect().await?;
//! // ... later
//! channel.disconnect();
//! ```

mod event;
mod registry;

pub use event::ChangeEvent;
pub use registry::{EventRegistry, Handler};

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use url::Url;

use crate::auth::Credential;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::paths;
use crate::types::TenantScope;

/// Name of the handshake header carrying the resolved credential.
const TOKEN_HEADER: &str = "token";

/// Connection state of a [`ChangeChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// No connection. The initial state, and the terminal state after a
    /// disconnect or a connection failure.
    Disconnected,
    /// A handshake is in flight.
    Connecting,
    /// The socket is open and frames are being dispatched.
    Open,
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelState::Disconnected => write!(f, "disconnected"),
            ChannelState::Connecting => write!(f, "connecting"),
            ChannelState::Open => write!(f, "open"),
        }
    }
}

/// A change-subscription channel scoped to a tenant context.
///
/// Created disconnected via
/// [`ApplicationClient::events`](crate::control::ApplicationClient::events)
/// (application-wide) or
/// [`EnvironmentClient::events`](crate::control::EnvironmentClient::events)
/// (one environment). Handlers are registered under the raw operation verb
/// of the frames they want (`created`, `updated`, `deleted`, ...).
///
/// The channel owns at most one live connection: connecting while a
/// connection is open closes the prior one first. Undecodable frames are
/// dropped and reported via `tracing`; they never terminate the channel.
pub struct ChangeChannel {
    client: Client,
    scope: TenantScope,
    token_override: Option<Credential>,
    registry: EventRegistry<ChangeEvent>,
    state: Arc<Mutex<ChannelState>>,
    reader: Mutex<Option<JoinHandle<()>>>,
}

impl ChangeChannel {
    pub(crate) fn new(
        client: Client,
        scope: TenantScope,
        token_override: Option<Credential>,
    ) -> Self {
        Self {
            client,
            scope,
            token_override,
            registry: EventRegistry::new(),
            state: Arc::new(Mutex::new(ChannelState::Disconnected)),
            reader: Mutex::new(None),
        }
    }

    /// Returns the tenant scope this channel is subscribed to.
    pub fn scope(&self) -> &TenantScope {
        &self.scope
    }

    /// Returns the current connection state.
    pub fn state(&self) -> ChannelState {
        *self.state.lock()
    }

    /// Returns the registry dispatching this channel's decoded events.
    ///
    /// Useful for sharing registrations with other producers; the
    /// [`on`](ChangeChannel::on)/[`off`](ChangeChannel::off) methods are
    /// shorthands over this.
    pub fn registry(&self) -> &EventRegistry<ChangeEvent> {
        &self.registry
    }

    /// Registers a handler for frames with the given operation verb.
    pub fn on(&self, operation: impl Into<String>, handler: Handler<ChangeEvent>) {
        self.registry.on(operation, handler);
    }

    /// Removes the first registration of exactly this handler reference.
    pub fn off(&self, operation: &str, handler: &Handler<ChangeEvent>) -> bool {
        self.registry.off(operation, handler)
    }

    /// Clears one operation's handlers, or all handlers.
    pub fn off_all(&self, operation: Option<&str>) {
        self.registry.off_all(operation);
    }

    /// Derives the socket URL from the client's base URL.
    ///
    /// `http(s)` is rewritten to `ws(s)`; the path is `/ws/{app}[/{env}]`.
    fn socket_url(&self) -> Result<Url> {
        let base = self.client.inner().base_url.as_str();
        let rewritten = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else if base.starts_with("wss://") || base.starts_with("ws://") {
            base.to_owned()
        } else {
            return Err(Error::configuration(format!(
                "cannot derive a socket scheme from base URL {:?}",
                base
            )));
        };

        let mut url = Url::parse(&rewritten)?;
        url.set_path(&paths::socket(&self.scope));
        url.set_query(None);
        Ok(url)
    }

    /// Opens the connection.
    ///
    /// Fails synchronously with a configuration error when no credential
    /// resolves (call-scoped override or client default). If a connection
    /// is already open it is closed first; the channel never holds two.
    ///
    /// A transport failure during the handshake leaves the channel
    /// `Disconnected` and is returned to the caller; the channel never
    /// retries on its own.
    pub async fn connect(&self) -> Result<()> {
        let Some(token) = self
            .client
            .inner()
            .credential(self.token_override.as_ref(), true)?
        else {
            return Err(Error::configuration("change channel requires a credential"));
        };

        // At most one live connection.
        self.disconnect();
        *self.state.lock() = ChannelState::Connecting;

        let result = self.open_socket(&token).await;
        let stream = match result {
            Ok(stream) => stream,
            Err(err) => {
                *self.state.lock() = ChannelState::Disconnected;
                return Err(err);
            }
        };

        *self.state.lock() = ChannelState::Open;
        tracing::debug!(scope = %self.scope, "change socket open");

        let registry = self.registry.clone();
        let state = Arc::clone(&self.state);
        let scope = self.scope.clone();
        let handle = tokio::spawn(async move {
            let mut stream = stream;
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<ChangeEvent>(text.as_str()) {
                            Ok(event) => registry.emit(&event.operation, &event),
                            Err(err) => {
                                // Contained: the frame is dropped, the
                                // connection stays up.
                                tracing::warn!(
                                    scope = %scope,
                                    error = %err,
                                    "dropping undecodable change frame"
                                );
                            }
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    // Ping/pong and binary frames are not change
                    // notifications.
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(scope = %scope, error = %err, "change socket failed");
                        break;
                    }
                }
            }
            *state.lock() = ChannelState::Disconnected;
            tracing::debug!(scope = %scope, "change socket closed");
        });

        *self.reader.lock() = Some(handle);
        Ok(())
    }

    async fn open_socket(
        &self,
        token: &Credential,
    ) -> Result<
        tokio_tungstenite::WebSocketStream<
            tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
        >,
    > {
        let url = self.socket_url()?;
        let mut request = url.as_str().into_client_request().map_err(Error::from)?;
        request.headers_mut().insert(
            TOKEN_HEADER,
            HeaderValue::from_str(token.as_str())
                .map_err(|_| Error::configuration("credential is not a valid header value"))?,
        );

        let (stream, _response) = connect_async(request).await.map_err(Error::from)?;
        Ok(stream)
    }

    /// Closes the connection and releases it.
    ///
    /// Idempotent and safe to call from any state; registered handlers
    /// stay registered for the next connection.
    pub fn disconnect(&self) {
        if let Some(handle) = self.reader.lock().take() {
            handle.abort();
        }
        *self.state.lock() = ChannelState::Disconnected;
    }
}

impl Drop for ChangeChannel {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl fmt::Debug for ChangeChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeChannel")
            .field("scope", &self.scope)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
