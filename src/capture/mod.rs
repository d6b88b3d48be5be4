//! Screenshot capture pipeline.
//!
//! This module turns a target URL plus a list of [`CaptureOption`]s into a
//! single GET request against the Screenshot API and interprets the answer.
//!
//! # Pipeline
//!
//! - Option encoding: every option validates its own value into a [`QueryParams`]
//! - Request building: API key and target URL are injected, options applied in
//!   order (first error wins), then the `thumbWidth`/`width` cross-check runs
//! - Transport: a [`Transport`] drains the body into a buffer, honoring a
//!   cancellation token
//! - Classification: transport failure, then (file mode only) an embedded
//!   `{code, messages}` payload, then a non-2xx status, else success
//! - Materialization: [`Client::get`] writes the body to a file,
//!   [`Client::get_raw`] returns the [`Response`] envelope
//!
//! # Example
//!
//! ```no_run
//! use screenshot_api::capture::{CaptureOption, Client};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::basic("at_your_api_key");
//! let response = client
//!     .get_raw("whoisxmlapi.com", &[CaptureOption::Type("png".into())])
//!     .await?;
//! println!("captured {} bytes", response.body.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
mod options;
mod query;
mod request;
mod response;
mod transport;

pub use client::{Client, ClientParams, DEFAULT_BASE_URL};
pub use constants::{
    DEFAULT_WIDTH, MAX_DELAY, MAX_JPG_QUALITY, MAX_SCALE, MAX_SIZE, MAX_TIMEOUT, MIN_DELAY,
    MIN_JPG_QUALITY, MIN_SCALE, MIN_SIZE, MIN_THUMB_WIDTH, MIN_TIMEOUT,
};
pub use error::{ApiError, ArgError, ScreenshotError, TransportError};
pub use options::{CaptureOption, Cookies};
pub use query::QueryParams;
pub use request::{RequestMode, build_query};
pub use response::{Response, ResponseHead};
pub use transport::{ReqwestTransport, Transport};
pub use tokio_util::sync::CancellationToken;
