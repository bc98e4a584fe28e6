//! Error kind enumeration for categorizing SDK errors.

/// Categorization of SDK errors.
///
/// This enum provides a stable interface for matching on error types,
/// enabling different handling strategies for different failure modes.
///
/// | ErrorKind       | Origin                                            |
/// |-----------------|---------------------------------------------------|
/// | `Configuration` | Missing base URL or required credential; no I/O   |
/// | `Service`       | Remote responded with HTTP status >= 400          |
/// | `Transport`     | Request never completed (DNS, connect, TLS)       |
/// | `Decode`        | Response body or inbound frame was not decodable  |
///
/// The SDK never retries on its own. `Service` and `Transport` are distinct
/// so callers can tell "the service rejected the request" apart from "the
/// service could not be reached".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required construction parameter or credential is missing.
    ///
    /// Raised before any network call is attempted: the client constructor
    /// rejects a missing or unparseable base URL, and operations that
    /// require a credential fail here when neither a call-scoped nor a
    /// default credential is set.
    #[error("configuration error")]
    Configuration,

    /// The remote service rejected the request (HTTP status >= 400).
    ///
    /// The error message carries the serialized response body;
    /// [`Error::status`](super::Error::status) carries the status code.
    #[error("service error")]
    Service,

    /// The request could not complete (DNS, connection, TLS, timeout at the
    /// executor level). The underlying transport error is preserved as the
    /// source.
    #[error("transport error")]
    Transport,

    /// A response body or inbound change frame could not be decoded.
    ///
    /// On the change channel this is contained: the frame is dropped and
    /// reported, the connection stays up.
    #[error("decode error")]
    Decode,
}
