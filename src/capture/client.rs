//! Screenshot API client and its two entry points.
//!
//! [`Client::get`] saves a screenshot to a file; [`Client::get_raw`] returns
//! the buffered response. Both share request building and classification,
//! with one deliberate difference: only file mode looks for an error payload
//! in the body, so a `{code, messages}` body is an error for `get` but plain
//! data for `get_raw`.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::ScreenshotError;
use super::options::CaptureOption;
use super::query::QueryParams;
use super::request::{RequestMode, build_query, build_request};
use super::response::{PayloadCheck, Response, classify};
use super::transport::{ReqwestTransport, Transport};

/// Production endpoint of the Screenshot API.
pub const DEFAULT_BASE_URL: &str = "https://website-screenshot.whoisxmlapi.com/api/v1";

/// Construction-time settings for a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientParams {
    /// Endpoint the GET request is sent to.
    pub base_url: Url,
    /// Custom transport; a [`ReqwestTransport`] is built from the timeouts when `None`.
    pub transport: Option<Arc<dyn Transport>>,
    /// Connect timeout for the default transport.
    pub connect_timeout: Duration,
    /// Maximum idle time between two reads for the default transport.
    pub read_timeout: Duration,
}

impl Default for ClientParams {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            transport: None,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(READ_TIMEOUT_SECS),
        }
    }
}

#[allow(clippy::expect_used)]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

/// Screenshot API client.
///
/// Configuration is fixed at construction. The client is cheap to clone and
/// safe to share across tasks; clones share the transport.
///
/// # Example
///
/// ```no_run
/// use screenshot_api::{CaptureOption, Client, ScreenshotError};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::basic("at_your_api_key");
/// match client.get("whoisxmlapi.com", "/tmp/shot.png", &[CaptureOption::Type("png".into())]).await {
///     Ok(()) => println!("saved"),
///     Err(ScreenshotError::Api(api)) => eprintln!("service said {}: {}", api.code, api.message),
///     Err(other) => return Err(other.into()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    api_key: String,
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("transport", &self.transport)
            .finish()
    }
}

impl Client {
    /// Creates a client from explicit parameters.
    ///
    /// # Panics
    ///
    /// Panics if no transport is supplied and the default HTTP client cannot
    /// be built. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(api_key: impl Into<String>, params: ClientParams) -> Self {
        let transport = params.transport.unwrap_or_else(|| {
            Arc::new(
                ReqwestTransport::with_timeouts(params.connect_timeout, params.read_timeout)
                    .expect("failed to build HTTP client with static configuration"),
            )
        });
        Self {
            api_key: api_key.into(),
            base_url: params.base_url,
            transport,
        }
    }

    /// Creates a client for the production endpoint with default timeouts.
    #[must_use]
    pub fn basic(api_key: impl Into<String>) -> Self {
        Self::new(api_key, ClientParams::default())
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Captures a screenshot of `url` and saves it to `filename`.
    ///
    /// The request always asks for JSON errors and binary image output,
    /// overriding any `ErrorsOutputFormat`/`ImageOutputFormat` option.
    /// When both `url` and `filename` are empty, the `URL` error is reported.
    ///
    /// # Errors
    ///
    /// - [`ScreenshotError::InvalidArgument`] for an empty URL or filename, or
    ///   an invalid option (nothing is sent)
    /// - [`ScreenshotError::Read`] if the response could not be read
    /// - [`ScreenshotError::Api`] if the body carries a service error payload
    /// - [`ScreenshotError::Status`] for any other non-2xx status
    /// - [`ScreenshotError::Io`] if the file cannot be created or written
    pub async fn get(
        &self,
        url: &str,
        filename: impl AsRef<Path>,
        options: &[CaptureOption],
    ) -> Result<(), ScreenshotError> {
        self.get_with_cancellation(&CancellationToken::new(), url, filename, options)
            .await
    }

    /// Same as [`get`](Self::get), aborting with a cancellation transport
    /// error once `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`get`](Self::get).
    #[instrument(skip(self, cancel, filename, options), fields(url = %url))]
    pub async fn get_with_cancellation(
        &self,
        cancel: &CancellationToken,
        url: &str,
        filename: impl AsRef<Path>,
        options: &[CaptureOption],
    ) -> Result<(), ScreenshotError> {
        let filename = filename.as_ref();
        let params = build_query(&self.api_key, url, options, RequestMode::File(filename))?;
        let response = self.execute(cancel, &params, PayloadCheck::Inspect).await?;
        save_body(filename, &response.body).await
    }

    /// Captures a screenshot of `url` and returns the raw response.
    ///
    /// The body is returned as sent by the service: image bytes, base64 text
    /// or even an error document in the requested errors format.
    ///
    /// # Errors
    ///
    /// - [`ScreenshotError::InvalidArgument`] for an empty URL or an invalid
    ///   option (nothing is sent)
    /// - [`ScreenshotError::Read`] if the response could not be read
    /// - [`ScreenshotError::Status`] for a non-2xx status; the response is
    ///   still reachable through [`ScreenshotError::response`]
    pub async fn get_raw(
        &self,
        url: &str,
        options: &[CaptureOption],
    ) -> Result<Response, ScreenshotError> {
        self.get_raw_with_cancellation(&CancellationToken::new(), url, options)
            .await
    }

    /// Same as [`get_raw`](Self::get_raw), aborting with a cancellation
    /// transport error once `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`get_raw`](Self::get_raw).
    #[instrument(skip(self, cancel, options), fields(url = %url))]
    pub async fn get_raw_with_cancellation(
        &self,
        cancel: &CancellationToken,
        url: &str,
        options: &[CaptureOption],
    ) -> Result<Response, ScreenshotError> {
        let params = build_query(&self.api_key, url, options, RequestMode::Raw)?;
        self.execute(cancel, &params, PayloadCheck::Skip).await
    }

    async fn execute(
        &self,
        cancel: &CancellationToken,
        params: &QueryParams,
        check: PayloadCheck,
    ) -> Result<Response, ScreenshotError> {
        let request = build_request(&self.base_url, params);
        debug!(endpoint = %self.base_url, params = params.len(), "sending capture request");

        let mut body = Vec::new();
        let outcome = self
            .transport
            .execute(request, cancel, &mut body)
            .await
            .map(|head| Response::from_parts(head, body));

        let response = classify(outcome, check)?;
        debug!(
            status = response.status.as_u16(),
            bytes = response.body.len(),
            "capture response accepted"
        );
        Ok(response)
    }
}

/// Writes `body` to `path`, creating or truncating the file.
///
/// Create and write errors are returned as-is. The final sync is best-effort:
/// its failure is logged and does not fail the call.
async fn save_body(path: &Path, body: &[u8]) -> Result<(), ScreenshotError> {
    let mut file = File::create(path).await?;
    file.write_all(body).await?;
    file.flush().await?;

    if let Err(error) = file.sync_all().await {
        warn!(path = %path.display(), error = %error, "failed to sync screenshot file");
    }

    info!(path = %path.display(), bytes = body.len(), "screenshot saved");
    Ok(())
}
