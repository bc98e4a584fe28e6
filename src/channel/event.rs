//! Decoded change notifications.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::TenantScope;

/// A change notification decoded from one inbound socket frame.
///
/// Frames arrive as JSON objects
/// `{"type": ..., "appName": ..., "envName": ..., "data": ...}`. The
/// operation verb is kept exactly as the service sent it; only the
/// `Display` rendering uppercases it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    /// The operation verb (e.g. `created`, `updated`, `deleted`), exactly
    /// as sent by the service. Handlers are registered under this value.
    #[serde(rename = "type")]
    pub operation: String,
    /// The application the change happened in.
    pub app_name: String,
    /// The environment the change happened in.
    pub env_name: String,
    /// The affected data, as the service chose to report it.
    pub data: Value,
}

impl ChangeEvent {
    /// Returns the tenant scope the change happened in.
    pub fn scope(&self) -> TenantScope {
        TenantScope::environment(self.app_name.clone(), self.env_name.clone())
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}",
            self.operation.to_uppercase(),
            self.app_name,
            self.env_name
        )
    }
}
