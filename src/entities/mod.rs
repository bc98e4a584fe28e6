//! Entity CRUD over one entity kind.
//!
//! All mutation operations come in singular/batch pairs. The batch form
//! owns the HTTP call; the singular form is strictly a one-element batch
//! whose first id is returned, so validation and translation logic exists
//! exactly once.
//!
//! ```rust,ignore
//! let projects = client.application("shop").environment("prod").entities("projects");
//!
//! let ids = projects.write_many(&[phoenix, pegasus]).await?;
//! let id = projects.write(&titan).await?;
//!
//! let page = projects.list().per_page(10).await?;
//! let record = projects.get(&id).await?;
//!
//! projects.update(&Identified::new(id, json!({"title": "Project Titan V2"}))).await?;
//! ```

mod list;

pub use list::ListEntitiesRequest;

use serde::{Deserialize, Serialize};

use crate::auth::Credential;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::paths;
use crate::types::{EntityRecord, Identified};

/// Client for CRUD over one entity kind within an environment.
///
/// Access via [`EnvironmentClient::entities`](crate::control::EnvironmentClient::entities).
#[derive(Clone)]
pub struct EntitiesClient {
    client: Client,
    app_name: String,
    env_name: String,
    kind: String,
    token_override: Option<Credential>,
}

#[derive(Deserialize)]
struct IdsResponse {
    ids: Vec<String>,
}

#[derive(Deserialize)]
struct DeletedCount {
    deleted: u64,
}

#[derive(Deserialize)]
struct DeletedFlag {
    deleted: bool,
}

impl EntitiesClient {
    pub(crate) fn new(
        client: Client,
        app_name: String,
        env_name: String,
        kind: impl Into<String>,
        token_override: Option<Credential>,
    ) -> Self {
        Self {
            client,
            app_name,
            env_name,
            kind: kind.into(),
            token_override,
        }
    }

    /// Returns the entity kind this client operates on.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns a copy of this client carrying a call-scoped credential.
    ///
    /// Takes precedence over the client-wide default; never persisted.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<Credential>) -> Self {
        self.token_override = Some(token.into());
        self
    }

    fn collection_path(&self) -> String {
        paths::entities(&self.app_name, &self.env_name, &self.kind)
    }

    fn record_path(&self, id: &str) -> String {
        paths::entity(&self.app_name, &self.env_name, &self.kind, id)
    }

    fn token(&self) -> Result<Option<Credential>> {
        self.client
            .inner()
            .credential(self.token_override.as_ref(), true)
    }

    fn first_id(ids: Vec<String>) -> Result<String> {
        ids.into_iter()
            .next()
            .ok_or_else(|| Error::decode("service returned no id for a one-element batch"))
    }

    /// Writes a batch of new records and returns their server-assigned
    /// ids, in payload order.
    pub async fn write_many<T>(&self, payload: &[T]) -> Result<Vec<String>>
    where
        T: Serialize,
    {
        let token = self.token()?;
        let response: IdsResponse = self
            .client
            .inner()
            .post(&self.collection_path(), payload, token.as_ref())
            .await?;
        Ok(response.ids)
    }

    /// Writes one record and returns its server-assigned id.
    ///
    /// Exactly `write_many` with a one-element batch.
    pub async fn write<T>(&self, payload: &T) -> Result<String>
    where
        T: Serialize,
    {
        let ids = self.write_many(std::slice::from_ref(payload)).await?;
        Self::first_id(ids)
    }

    /// Applies a batch of partial-field patches. Every element names its
    /// target record; unmentioned fields are left untouched.
    pub async fn update_many<T>(&self, payload: &[Identified<T>]) -> Result<Vec<String>>
    where
        T: Serialize,
    {
        let token = self.token()?;
        let response: IdsResponse = self
            .client
            .inner()
            .patch(&self.collection_path(), payload, token.as_ref())
            .await?;
        Ok(response.ids)
    }

    /// Applies one partial-field patch.
    ///
    /// Exactly `update_many` with a one-element batch.
    pub async fn update<T>(&self, payload: &Identified<T>) -> Result<String>
    where
        T: Serialize,
    {
        let ids = self.update_many(std::slice::from_ref(payload)).await?;
        Self::first_id(ids)
    }

    /// Replaces a batch of records wholesale. Every element names its
    /// target record; fields absent from the payload are dropped.
    pub async fn replace_many<T>(&self, payload: &[Identified<T>]) -> Result<Vec<String>>
    where
        T: Serialize,
    {
        let token = self.token()?;
        let response: IdsResponse = self
            .client
            .inner()
            .put(&self.collection_path(), payload, token.as_ref())
            .await?;
        Ok(response.ids)
    }

    /// Replaces one record wholesale.
    ///
    /// Exactly `replace_many` with a one-element batch.
    pub async fn replace<T>(&self, payload: &Identified<T>) -> Result<String>
    where
        T: Serialize,
    {
        let ids = self.replace_many(std::slice::from_ref(payload)).await?;
        Self::first_id(ids)
    }

    /// Deletes every record of this kind. Returns how many were deleted.
    pub async fn delete_all(&self) -> Result<u64> {
        let token = self.token()?;
        let response: DeletedCount = self
            .client
            .inner()
            .delete(&self.collection_path(), token.as_ref())
            .await?;
        Ok(response.deleted)
    }

    /// Deletes one record by id. Returns whether the service found it.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let token = self.token()?;
        let response: DeletedFlag = self
            .client
            .inner()
            .delete(&self.record_path(id), token.as_ref())
            .await?;
        Ok(response.deleted)
    }

    /// Fetches one record by id.
    ///
    /// An unknown id surfaces as a service error;
    /// [`Error::is_not_found`] distinguishes it.
    pub async fn get(&self, id: &str) -> Result<EntityRecord> {
        let token = self.token()?;
        self.client
            .inner()
            .get(&self.record_path(id), &[], token.as_ref())
            .await
    }

    /// Fetches a page of this kind's collection.
    ///
    /// Pagination parameters are optional; the service's defaults apply
    /// when unset.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let page = projects.list().page(2).per_page(10).await?;
    /// assert_eq!(page.meta.page, 2);
    /// ```
    pub fn list(&self) -> ListEntitiesRequest {
        ListEntitiesRequest::new(self.clone())
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn token_override(&self) -> Option<&Credential> {
        self.token_override.as_ref()
    }
}

impl std::fmt::Debug for EntitiesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitiesClient")
            .field("application", &self.app_name)
            .field("environment", &self.env_name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
