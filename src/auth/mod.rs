//! Authentication types and credential resolution.
//!
//! LoomDB authentication is a single opaque bearer token carried in the
//! `token` header. The only non-trivial rule is precedence: a call-scoped
//! override beats the client-wide default, and an operation that requires a
//! credential fails with a configuration error when neither is present -
//! before any network call is made.

mod credentials;

pub use credentials::Credential;

/// Resolves the effective credential for one call.
///
/// Precedence: call-scoped override > client-wide default > absent.
/// This is the single place the rule lives; the client applies it at
/// header-build time so an in-flight call is never affected by a later
/// [`set_token`](crate::Client::set_token).
pub(crate) fn resolve<'a>(
    call: Option<&'a Credential>,
    default: Option<&'a Credential>,
) -> Option<&'a Credential> {
    call.or(default)
}
