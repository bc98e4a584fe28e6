//! Application management.

use serde::{Deserialize, Serialize};

use crate::auth::Credential;
use crate::channel::ChangeChannel;
use crate::client::Client;
use crate::control::EnvironmentClient;
use crate::error::Result;
use crate::paths;
use crate::types::{ApplicationCreated, Permission, TenantScope, TokenDescriptor};

/// An application-scoped client.
///
/// Access via [`Client::application`].
///
/// ## Example
///
/// ```rust,ignore
/// let app = client.application("shop");
///
/// // Bootstrap: create the application with a first environment.
/// // This is the one operation that works without any credential.
/// let created = app.create().environment("prod").await?;
/// client.set_token(&created.application_tokens[0]);
///
/// // Navigate into an environment.
/// let env = app.environment("prod");
/// ```
#[derive(Clone)]
pub struct ApplicationClient {
    client: Client,
    name: String,
    token_override: Option<Credential>,
}

impl ApplicationClient {
    pub(crate) fn new(client: Client, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
            token_override: None,
        }
    }

    /// Returns the application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy of this client carrying a call-scoped credential.
    ///
    /// The override takes precedence over the client-wide default for
    /// every operation made through the returned client (and through
    /// scopes derived from it). It is never persisted on the [`Client`].
    #[must_use]
    pub fn with_token(mut self, token: impl Into<Credential>) -> Self {
        self.token_override = Some(token.into());
        self
    }

    /// Returns an environment-scoped client within this application.
    pub fn environment(&self, name: impl Into<String>) -> EnvironmentClient {
        EnvironmentClient::new(
            self.client.clone(),
            self.name.clone(),
            name,
            self.token_override.clone(),
        )
    }

    /// Creates this application on the service.
    ///
    /// Optionally bootstraps a first environment via
    /// [`environment`](CreateApplicationRequest::environment). Returns the
    /// token sets for the new application and environment. This operation
    /// is allowed without a credential so a fresh deployment can mint its
    /// first tokens.
    pub fn create(&self) -> CreateApplicationRequest {
        CreateApplicationRequest {
            client: self.client.clone(),
            name: self.name.clone(),
            environment: None,
            token_override: self.token_override.clone(),
        }
    }

    /// Deletes this application.
    ///
    /// Cascades on the service: all contained environments, entities and
    /// tokens become unreachable.
    pub async fn delete(&self) -> Result<()> {
        let token = self
            .client
            .inner()
            .credential(self.token_override.as_ref(), true)?;
        self.client
            .inner()
            .delete_ignore_body(&paths::application(&self.name), token.as_ref())
            .await
    }

    /// Creates an application-scoped token with the given permission.
    pub async fn create_token(&self, permission: Permission) -> Result<TokenDescriptor> {
        let token = self
            .client
            .inner()
            .credential(self.token_override.as_ref(), true)?;
        self.client
            .inner()
            .post(
                &paths::application_tokens(&self.name),
                &CreateTokenBody { permission },
                token.as_ref(),
            )
            .await
    }

    /// Revokes an application-scoped token by its key.
    ///
    /// Returns whether the service found and revoked it.
    pub async fn revoke_token(&self, key: &str) -> Result<bool> {
        let token = self
            .client
            .inner()
            .credential(self.token_override.as_ref(), true)?;
        let response: RevokedResponse = self
            .client
            .inner()
            .delete(&paths::application_token(&self.name, key), token.as_ref())
            .await?;
        Ok(response.revoked)
    }

    /// Returns a change channel subscribed to every environment of this
    /// application.
    ///
    /// The channel is created disconnected; call
    /// [`connect`](ChangeChannel::connect) to open it.
    pub fn events(&self) -> ChangeChannel {
        ChangeChannel::new(
            self.client.clone(),
            TenantScope::application(self.name.clone()),
            self.token_override.clone(),
        )
    }
}

impl std::fmt::Debug for ApplicationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationClient")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct CreateTokenBody {
    permission: Permission,
}

#[derive(Deserialize)]
struct RevokedResponse {
    revoked: bool,
}

/// Request to create an application.
///
/// Awaiting the request issues it; configure the optional bootstrap
/// environment first.
pub struct CreateApplicationRequest {
    client: Client,
    name: String,
    environment: Option<String>,
    token_override: Option<Credential>,
}

impl CreateApplicationRequest {
    /// Also creates a first environment with the given name.
    #[must_use]
    pub fn environment(mut self, name: impl Into<String>) -> Self {
        self.environment = Some(name.into());
        self
    }

    async fn execute(self) -> Result<ApplicationCreated> {
        // Bootstrap call: a credential is attached when one resolves, but
        // none is required.
        let token = self
            .client
            .inner()
            .credential(self.token_override.as_ref(), false)?;

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body {
            #[serde(skip_serializing_if = "Option::is_none")]
            environment_name: Option<String>,
        }

        self.client
            .inner()
            .post(
                &paths::application(&self.name),
                &Body {
                    environment_name: self.environment,
                },
                token.as_ref(),
            )
            .await
    }
}

impl std::future::IntoFuture for CreateApplicationRequest {
    type Output = Result<ApplicationCreated>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}
