//! Data types exchanged with the LoomDB service.

mod entity;
mod scope;
mod token;

pub use entity::{EntityPage, EntityRecord, Identified, PageMeta, RecordMeta};
pub use scope::TenantScope;
pub use token::{ApplicationCreated, EnvironmentCreated, Permission, TokenDescriptor};
