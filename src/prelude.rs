//! Prelude module for convenient imports.
//!
//! ```rust
//! use loomdb::prelude::*;
//! ```
//!
//! This provides access to the client types, error types, credential type
//! and the common data types.

pub use crate::{
    auth::Credential,
    channel::{ChangeChannel, ChangeEvent, ChannelState, EventRegistry, Handler},
    client::{Client, ClientBuilder},
    control::{ApplicationClient, EnvironmentClient},
    entities::EntitiesClient,
    error::{Error, ErrorKind, Result},
    types::{
        ApplicationCreated, EntityPage, EntityRecord, EnvironmentCreated, Identified, PageMeta,
        Permission, TenantScope, TokenDescriptor,
    },
};
