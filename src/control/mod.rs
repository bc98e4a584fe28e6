//! Administrative operations: applications, environments, tokens.
//!
//! ## API Hierarchy
//!
//! ```rust,ignore
//! let client = Client::builder().url("https://api.loomdb.dev").build()?;
//!
//! // Application context
//! let app = client.application("shop");
//!
//! // Bootstrap (no credential needed): create the application plus a
//! // first environment, and receive both token sets.
//! let created = app.create().environment("prod").await?;
//! client.set_token(&created.application_tokens[0]);
//!
//! // Environment context
//! let env = app.environment("prod");
//! env.create_token(Permission::ReadOnly).await?;
//!
//! // Tear down (cascades server-side)
//! app.delete().await?;
//! ```

mod applications;
mod environments;

pub use applications::{ApplicationClient, CreateApplicationRequest};
pub use environments::EnvironmentClient;
