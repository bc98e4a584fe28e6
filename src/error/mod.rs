//! Error types for the LoomDB SDK.
//!
//! Every operation fails with a single [`Error`] type whose [`ErrorKind`]
//! maps one-to-one onto the failure taxonomy:
//!
//! - `Configuration` - missing base URL or required credential, raised
//!   before any network call
//! - `Service` - the remote responded with status >= 400; the serialized
//!   response body is the message
//! - `Transport` - the request never completed; distinguishable from
//!   `Service` by kind
//! - `Decode` - a response body or inbound change frame was malformed
//!
//! ```rust,ignore
//! match env.entities("books").get("missing").await {
//!     Err(e) if e.is_not_found() => println!("no such record"),
//!     Err(e) => return Err(e),
//!     Ok(record) => println!("{:?}", record),
//! }
//! ```

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for LoomDB operations.
pub type Result<T> = std::result::Result<T, Error>;
