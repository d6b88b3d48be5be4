//! Response envelope and classification.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::Deserialize;

use super::error::{ApiError, ScreenshotError, TransportError};

/// Status line metadata returned by a [`Transport`](super::Transport).
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

/// A completed exchange with the body fully buffered.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// The whole response body.
    pub body: Vec<u8>,
}

impl Response {
    #[must_use]
    pub fn from_parts(head: ResponseHead, body: Vec<u8>) -> Self {
        Self {
            status: head.status,
            headers: head.headers,
            body,
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Whether classification looks for an error payload in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PayloadCheck {
    /// Raw mode: the body is the caller's business.
    Skip,
    /// File mode: a `{code, messages}` body is an application error.
    Inspect,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    code: i64,
    #[serde(default, rename = "messages")]
    message: String,
}

/// Parses the first JSON value of `body` as the service error payload.
///
/// Returns `None` when the body is not such an object (images, base64 text,
/// XML) or when it carries neither a code nor a message.
pub(crate) fn parse_api_error(body: &[u8]) -> Option<ApiError> {
    let payload = serde_json::Deserializer::from_slice(body)
        .into_iter::<ErrorPayload>()
        .next()?
        .ok()?;
    (payload.code != 0 || !payload.message.is_empty()).then_some(ApiError {
        code: payload.code,
        message: payload.message,
    })
}

/// Classifies a finished exchange.
///
/// Order: transport failure, embedded error payload (only with
/// [`PayloadCheck::Inspect`]), non-2xx status, success. A body that does not
/// parse as the error payload is never an error by itself.
pub(crate) fn classify(
    outcome: Result<Response, TransportError>,
    check: PayloadCheck,
) -> Result<Response, ScreenshotError> {
    let response = outcome?;

    if check == PayloadCheck::Inspect
        && let Some(api_error) = parse_api_error(&response.body)
    {
        return Err(api_error.into());
    }

    if !response.is_success() {
        return Err(ScreenshotError::status(response));
    }

    Ok(response)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const IMAGE_BODY: &[u8] = b"data:image/jpeg;base64,/9j/4AAQSkZJRgABAQAAAQABAAD/2wCEAAEBAQEBAQEBAQEB";
    const XML_BODY: &[u8] = br#"<?xml version="1.0" encoding="utf-8"?><>"#;
    const ERROR_BODY: &[u8] = br#"{"code":499,"messages":"Test error message."}"#;

    fn response(status: u16, body: &[u8]) -> Response {
        Response {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_parse_api_error_payload() {
        let error = parse_api_error(ERROR_BODY).unwrap();
        assert_eq!(error.code, 499);
        assert_eq!(error.message, "Test error message.");
    }

    #[test]
    fn test_parse_api_error_ignores_non_json_bodies() {
        assert!(parse_api_error(IMAGE_BODY).is_none());
        assert!(parse_api_error(XML_BODY).is_none());
        assert!(parse_api_error(b"").is_none());
    }

    #[test]
    fn test_parse_api_error_requires_code_or_message() {
        assert!(parse_api_error(b"{}").is_none());
        assert!(parse_api_error(br#"{"code":0,"messages":""}"#).is_none());
        assert_eq!(parse_api_error(br#"{"code":42}"#).unwrap().code, 42);
        assert_eq!(
            parse_api_error(br#"{"messages":"quota exceeded"}"#)
                .unwrap()
                .message,
            "quota exceeded"
        );
    }

    #[test]
    fn test_parse_api_error_reads_first_value_only() {
        let error = parse_api_error(b"{\"code\":1,\"messages\":\"x\"}\n{\"trailing\":true}").unwrap();
        assert_eq!(error.code, 1);
    }

    #[test]
    fn test_transport_failure_takes_priority() {
        let err = classify(Err(TransportError::UnexpectedEof), PayloadCheck::Inspect).unwrap_err();
        assert_eq!(err.to_string(), "cannot read response: unexpected EOF");
    }

    #[test]
    fn test_success_status_with_error_payload() {
        let err = classify(Ok(response(200, ERROR_BODY)), PayloadCheck::Inspect).unwrap_err();
        assert_eq!(err.to_string(), "API error: [499] Test error message.");
        assert_eq!(err.api_code(), Some(499));

        let ok = classify(Ok(response(200, ERROR_BODY)), PayloadCheck::Skip).unwrap();
        assert_eq!(ok.body, ERROR_BODY);
    }

    #[test]
    fn test_error_status_with_error_payload() {
        let err = classify(Ok(response(499, ERROR_BODY)), PayloadCheck::Inspect).unwrap_err();
        assert_eq!(err.to_string(), "API error: [499] Test error message.");

        let err = classify(Ok(response(499, ERROR_BODY)), PayloadCheck::Skip).unwrap_err();
        assert_eq!(err.to_string(), "API failed with status code: 499");
    }

    #[test]
    fn test_error_status_with_unparsable_body() {
        for check in [PayloadCheck::Inspect, PayloadCheck::Skip] {
            let err = classify(Ok(response(500, XML_BODY)), check).unwrap_err();
            assert_eq!(err.to_string(), "API failed with status code: 500");
            assert_eq!(err.response().unwrap().body, XML_BODY);
        }
    }

    #[test]
    fn test_non_json_success_bodies_pass() {
        for body in [IMAGE_BODY, XML_BODY] {
            let ok = classify(Ok(response(200, body)), PayloadCheck::Inspect).unwrap();
            assert!(ok.is_success());
            assert_eq!(ok.body, body);
        }
    }
}
