//! Environment management and the knowledge-base inquiry endpoint.

use serde::{Deserialize, Serialize};

use crate::auth::Credential;
use crate::channel::ChangeChannel;
use crate::client::Client;
use crate::entities::EntitiesClient;
use crate::error::Result;
use crate::paths;
use crate::types::{EnvironmentCreated, Permission, TenantScope, TokenDescriptor};

/// An environment-scoped client.
///
/// Access via [`ApplicationClient::environment`](crate::control::ApplicationClient::environment).
///
/// ## Example
///
/// ```rust,ignore
/// let env = client.application("shop").environment("prod");
///
/// // Entity CRUD
/// let projects = env.entities("projects");
///
/// // Ask the knowledge base a question about the stored data
/// let answer = env.inquire("Which project has the largest budget?").await?;
/// ```
#[derive(Clone)]
pub struct EnvironmentClient {
    client: Client,
    app_name: String,
    name: String,
    token_override: Option<Credential>,
}

impl EnvironmentClient {
    pub(crate) fn new(
        client: Client,
        app_name: String,
        name: impl Into<String>,
        token_override: Option<Credential>,
    ) -> Self {
        Self {
            client,
            app_name,
            name: name.into(),
            token_override,
        }
    }

    /// Returns the application name.
    pub fn application_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the environment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy of this client carrying a call-scoped credential.
    ///
    /// Takes precedence over the client-wide default; never persisted.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<Credential>) -> Self {
        self.token_override = Some(token.into());
        self
    }

    /// Returns a client for one entity kind within this environment.
    pub fn entities(&self, kind: impl Into<String>) -> EntitiesClient {
        EntitiesClient::new(
            self.client.clone(),
            self.app_name.clone(),
            self.name.clone(),
            kind,
            self.token_override.clone(),
        )
    }

    /// Creates this environment within its application.
    ///
    /// Returns the new environment's token set.
    pub async fn create(&self) -> Result<EnvironmentCreated> {
        let token = self
            .client
            .inner()
            .credential(self.token_override.as_ref(), true)?;
        self.client
            .inner()
            .post_empty(
                &paths::environment(&self.app_name, &self.name),
                token.as_ref(),
            )
            .await
    }

    /// Deletes this environment and everything stored in it.
    pub async fn delete(&self) -> Result<()> {
        let token = self
            .client
            .inner()
            .credential(self.token_override.as_ref(), true)?;
        self.client
            .inner()
            .delete_ignore_body(
                &paths::environment(&self.app_name, &self.name),
                token.as_ref(),
            )
            .await
    }

    /// Creates an environment-scoped token with the given permission.
    pub async fn create_token(&self, permission: Permission) -> Result<TokenDescriptor> {
        let token = self
            .client
            .inner()
            .credential(self.token_override.as_ref(), true)?;
        self.client
            .inner()
            .post(
                &paths::environment_tokens(&self.app_name, &self.name),
                &CreateTokenBody { permission },
                token.as_ref(),
            )
            .await
    }

    /// Revokes an environment-scoped token by its key.
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
            .delete(
                &paths::environment_token(&self.app_name, &self.name, key),
                token.as_ref(),
            )
            .await?;
        Ok(response.revoked)
    }

    /// Forwards a free-text question about the stored data to the
    /// knowledge-base endpoint and returns its answer verbatim.
    pub async fn inquire(&self, question: impl Into<String>) -> Result<String> {
        let token = self
            .client
            .inner()
            .credential(self.token_override.as_ref(), true)?;
        let response: InquiryResponse = self
            .client
            .inner()
            .post(
                &paths::knowledgebase(&self.app_name, &self.name),
                &InquiryBody {
                    query: question.into(),
                },
                token.as_ref(),
            )
            .await?;
        Ok(response.answer)
    }

    /// Returns a change channel subscribed to this environment.
    ///
    /// The channel is created disconnected; call
    /// [`connect`](ChangeChannel::connect) to open it.
    pub fn events(&self) -> ChangeChannel {
        ChangeChannel::new(
            self.client.clone(),
            TenantScope::environment(self.app_name.clone(), self.name.clone()),
            self.token_override.clone(),
        )
    }
}

impl std::fmt::Debug for EnvironmentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentClient")
            .field("application", &self.app_name)
            .field("environment", &self.name)
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

#[derive(Serialize)]
struct InquiryBody {
    query: String,
}

#[derive(Deserialize)]
struct InquiryResponse {
    answer: String,
}
