//! # LoomDB Rust SDK
//!
//! Official Rust SDK for the LoomDB multi-tenant entity store.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use loomdb::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), loomdb::Error> {
//!     // Bootstrap: no credential needed to create the first application.
//!     let client = Client::builder()
//!         .url("https://api.loomdb.dev")
//!         .build()?;
//!
//!     let created = client.application("shop").create().environment("prod").await?;
//!     client.set_token(&created.application_tokens[0]);
//!
//!     // Entity CRUD within a tenant scope.
//!     let projects = client.application("shop").environment("prod").entities("projects");
//!     let id = projects.write(&json!({"title": "Project Phoenix"})).await?;
//!     let record = projects.get(&id).await?;
//!     println!("{}", record.self_link());
//!
//!     // Ask the knowledge base about the stored data.
//!     let env = client.application("shop").environment("prod");
//!     let answer = env.inquire("Which project is newest?").await?;
//!     println!("{answer}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Scope Hierarchy**: `Client` → `ApplicationClient` →
//!   `EnvironmentClient` → `EntitiesClient`; every entity operation runs
//!   against an (application, environment, entity kind) scope.
//! - **Credential Precedence**: a `.with_token(...)` call-scoped override
//!   beats the client-wide default set at build time or via `set_token`;
//!   operations that require a credential fail fast with a configuration
//!   error when neither is present.
//! - **Singular = Batch of One**: `write`/`update`/`replace` are strictly
//!   one-element calls of their `_many` counterparts - one code path, one
//!   HTTP request.
//! - **One Request per Call**: no retries, no caching, no client-imposed
//!   timeouts; transport defaults are inherited unmodified.
//! - **Change Feed**: [`channel::ChangeChannel`] holds one socket
//!   connection per tenant scope and dispatches decoded frames through a
//!   reusable [`channel::EventRegistry`]; reconnection is always explicit.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod control;
pub mod entities;
pub mod error;
pub mod paths;
pub mod types;

// Change feed
pub mod channel;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use auth::Credential;
pub use channel::{ChangeChannel, ChangeEvent, ChannelState, EventRegistry};
pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind, Result};
pub use types::{
    ApplicationCreated, EntityPage, EntityRecord, EnvironmentCreated, Identified, PageMeta,
    Permission, RecordMeta, TenantScope, TokenDescriptor,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        // Basic smoke test
        let _ = ErrorKind::Configuration;
    }
}
