//! Main error type for the LoomDB SDK.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The primary error type for LoomDB SDK operations.
///
/// Every fallible SDK operation resolves with a typed result or fails with
/// exactly one `Error` - never a mix of shapes for the same method.
///
/// ## Error Hierarchy
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── status: Option<u16>      (HTTP status for Service errors)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use loomdb::{Error, ErrorKind};
///
/// fn handle_error(err: Error) {
///     match err.kind() {
///         ErrorKind::Service if err.is_not_found() => {
///             println!("no such record");
///         }
///         ErrorKind::Service => {
///             println!("rejected: {}", err);
///         }
///         ErrorKind::Transport => {
///             println!("service unreachable: {}", err);
///         }
///         _ => {
///             println!("error: {}", err);
///         }
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    /// The error category.
    kind: ErrorKind,

    /// Human-readable error message. For `Service` errors this is the
    /// serialized response body.
    message: Cow<'static, str>,

    /// HTTP status code, present on `Service` errors.
    status: Option<u16>,

    /// The underlying error, if any.
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use loomdb::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Decode, "ids missing from response");
    /// assert_eq!(err.kind(), ErrorKind::Decode);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status code, if the remote responded with one.
    ///
    /// Set on every `Service` error.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns `true` if this is a `Service` error with status 404.
    ///
    /// ```rust
    /// use loomdb::Error;
    ///
    /// let err = Error::service(404, r#"{"error":"no such entity"}"#);
    /// assert!(err.is_not_found());
    /// ```
    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::Service && self.status == Some(404)
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors, one per kind.

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a service error carrying the serialized response body.
    pub fn service(status: u16, body: impl Into<Cow<'static, str>>) -> Self {
        let mut err = Self::new(ErrorKind::Service, body);
        err.status = Some(status);
        err
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(status) = self.status {
            write!(f, " (status {})", status)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Service => "service rejected the request",
            ErrorKind::Transport => "request could not complete",
            ErrorKind::Decode => "undecodable payload",
        };
        Self::new(kind, message)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::decode(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::transport(err.to_string()).with_source(err)
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::transport(err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_new() {
        let err = Error::new(ErrorKind::Decode, "test message");
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().contains("test message"));
        assert!(err.status().is_none());
    }

    #[test]
    fn test_service_error_carries_body_and_status() {
        let err = Error::service(422, r#"{"error":"payload must carry an id"}"#);
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.status(), Some(422));
        assert!(err.to_string().contains("payload must carry an id"));
        assert!(err.to_string().contains("status 422"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::service(404, "gone").is_not_found());
        assert!(!Error::service(403, "denied").is_not_found());
        assert!(!Error::transport("refused").is_not_found());
    }

    #[test]
    fn test_error_with_source() {
        let io_err = std::io::Error::other("underlying error");
        let err = Error::transport("connection failed").with_source(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(
            Error::configuration("test").kind(),
            ErrorKind::Configuration
        );
        assert_eq!(Error::service(500, "test").kind(), ErrorKind::Service);
        assert_eq!(Error::transport("test").kind(), ErrorKind::Transport);
        assert_eq!(Error::decode("test").kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_from_error_kind() {
        let err: Error = ErrorKind::Transport.into();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_from_url_parse_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = parse_err.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("invalid URL"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.source().is_some());
    }
}
