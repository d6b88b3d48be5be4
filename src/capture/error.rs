//! Error types for the capture module.
//!
//! Four failure families are kept apart so callers can branch on them:
//! argument validation (never reaches the network), transport failures,
//! non-2xx statuses, and application errors reported by the service itself.
//! Filesystem errors from file mode pass through untouched.

use thiserror::Error;

use super::response::Response;

/// A caller-supplied argument violates a documented constraint.
///
/// Always raised before any network traffic; safe to retry once the
/// argument is corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid argument: \"{name}\" {message}")]
pub struct ArgError {
    /// Name of the offending parameter.
    pub name: &'static str,
    /// Human-readable constraint description.
    pub message: &'static str,
}

impl ArgError {
    /// Creates an argument error.
    #[must_use]
    pub const fn new(name: &'static str, message: &'static str) -> Self {
        Self { name, message }
    }
}

/// Error reported by the Screenshot API in its `{"code", "messages"}` payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API error: [{code}] {message}")]
pub struct ApiError {
    /// Service-specific error code.
    pub code: i64,
    /// Service-provided message.
    pub message: String,
}

/// Failure while obtaining or draining the HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or no response head arrived.
    #[error(transparent)]
    Request(reqwest::Error),

    /// The response body could not be read to the end.
    #[error(transparent)]
    Body(reqwest::Error),

    /// Fewer body bytes arrived than the declared `Content-Length`.
    #[error("unexpected EOF")]
    UnexpectedEof,

    /// The caller's cancellation token fired mid-request.
    #[error("request cancelled")]
    Cancelled,

    /// Failure reported by a custom [`Transport`](super::Transport).
    #[error("{0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps a send failure. The request URL is dropped since its query
    /// carries the API key.
    #[must_use]
    pub fn request(error: reqwest::Error) -> Self {
        Self::Request(error.without_url())
    }

    /// Wraps a body read failure, dropping the request URL.
    #[must_use]
    pub fn body(error: reqwest::Error) -> Self {
        Self::Body(error.without_url())
    }
}

/// Errors returned by [`Client::get`](super::Client::get) and
/// [`Client::get_raw`](super::Client::get_raw).
#[derive(Debug, Error)]
pub enum ScreenshotError {
    /// Local validation failure; no request was sent.
    #[error(transparent)]
    InvalidArgument(#[from] ArgError),

    /// Transport-level failure (connect, read, truncation, cancellation).
    #[error("cannot read response: {0}")]
    Read(#[from] TransportError),

    /// The service answered outside the 2xx range.
    ///
    /// The fully buffered response stays available through [`ScreenshotError::response`].
    #[error("API failed with status code: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The buffered response envelope.
        response: Box<Response>,
    },

    /// The service reported an error in its payload.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Filesystem error while saving the screenshot, passed through verbatim.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScreenshotError {
    /// Creates a status error that keeps the buffered response.
    #[must_use]
    pub fn status(response: Response) -> Self {
        Self::Status {
            status: response.status.as_u16(),
            response: Box::new(response),
        }
    }

    /// Returns the buffered response for status errors.
    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Status { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns the service error code for application errors.
    #[must_use]
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api(error) => Some(error.code),
            _ => None,
        }
    }

    /// Returns true when the error was raised by local argument validation.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use reqwest::header::HeaderMap;

    #[test]
    fn test_arg_error_display() {
        let error = ArgError::new("URL", "can not be empty");
        assert_eq!(error.to_string(), r#"invalid argument: "URL" can not be empty"#);
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError {
            code: 499,
            message: "Test error message.".to_string(),
        };
        assert_eq!(error.to_string(), "API error: [499] Test error message.");
    }

    #[test]
    fn test_read_error_display_wraps_cause() {
        let error = ScreenshotError::from(TransportError::UnexpectedEof);
        assert_eq!(error.to_string(), "cannot read response: unexpected EOF");

        let error = ScreenshotError::from(TransportError::Cancelled);
        assert_eq!(error.to_string(), "cannot read response: request cancelled");
    }

    #[test]
    fn test_status_error_keeps_response() {
        let response = Response {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            headers: HeaderMap::new(),
            body: b"<?xml".to_vec(),
        };
        let error = ScreenshotError::status(response);
        assert_eq!(error.to_string(), "API failed with status code: 500");
        assert_eq!(error.response().unwrap().body, b"<?xml");
        assert_eq!(error.api_code(), None);
    }

    #[test]
    fn test_io_error_is_not_wrapped() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = ScreenshotError::from(io_error);
        assert_eq!(error.to_string(), "no such file");
        assert!(!error.is_invalid_argument());
    }

    #[test]
    fn test_api_code_and_argument_predicates() {
        let error = ScreenshotError::from(ApiError {
            code: 7,
            message: String::new(),
        });
        assert_eq!(error.api_code(), Some(7));

        let error = ScreenshotError::from(ArgError::new("width", "must be between 100 and 3000"));
        assert!(error.is_invalid_argument());
        assert!(error.response().is_none());
    }
}
