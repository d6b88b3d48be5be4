//! Transport seam between the capture pipeline and the network.
//!
//! A [`Transport`] executes one request and drains the whole body into a
//! caller-provided buffer, even for non-2xx statuses. [`ReqwestTransport`] is
//! the default implementation.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Client, Request};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::TransportError;
use super::response::ResponseHead;
use crate::user_agent;

/// Executes capture requests.
///
/// Implementations must:
/// - write the complete body into `sink` before returning, whatever the status
/// - return [`TransportError::UnexpectedEof`] when fewer bytes arrive than the
///   response declared
/// - return [`TransportError::Cancelled`] promptly once `cancel` fires
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` and drains the response body into `sink`.
    async fn execute(
        &self,
        request: Request,
        cancel: &CancellationToken,
        sink: &mut Vec<u8>,
    ) -> Result<ResponseHead, TransportError>;
}

/// [`Transport`] backed by a pooled `reqwest` client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    /// Creates a transport with default timeouts (30s connect, 120s between reads).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeouts(
            Duration::from_secs(CONNECT_TIMEOUT_SECS),
            Duration::from_secs(READ_TIMEOUT_SECS),
        )
        .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a transport with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` builder error if the client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn with_timeouts(
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(level = "debug", skip_all)]
    async fn execute(
        &self,
        request: Request,
        cancel: &CancellationToken,
        sink: &mut Vec<u8>,
    ) -> Result<ResponseHead, TransportError> {
        let mut response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(TransportError::Cancelled),
            result = self.client.execute(request) => result.map_err(TransportError::request)?,
        };

        let head = ResponseHead {
            status: response.status(),
            headers: response.headers().clone(),
        };
        let declared = declared_length(&head);

        loop {
            let chunk = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(TransportError::Cancelled),
                chunk = response.chunk() => chunk,
            };
            match chunk {
                Ok(Some(bytes)) => sink.extend_from_slice(&bytes),
                Ok(None) => break,
                Err(error) if is_short(declared, sink) => {
                    debug!(error = %error.without_url(), received = sink.len(), "body ended before declared length");
                    return Err(TransportError::UnexpectedEof);
                }
                Err(error) => return Err(TransportError::body(error)),
            }
        }

        if is_short(declared, sink) {
            return Err(TransportError::UnexpectedEof);
        }

        debug!(status = head.status.as_u16(), bytes = sink.len(), "response drained");
        Ok(head)
    }
}

fn declared_length(head: &ResponseHead) -> Option<u64> {
    head.headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

fn is_short(declared: Option<u64>, received: &[u8]) -> bool {
    let received = u64::try_from(received.len()).unwrap_or(u64::MAX);
    declared.is_some_and(|expected| received < expected)
}
