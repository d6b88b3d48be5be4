//! Screenshot API Client Library
//!
//! This library wraps the Screenshot API website capture service: it turns
//! typed capture options into a validated query, issues a single GET request,
//! classifies the response, and either saves the captured image to a file or
//! hands the raw response back to the caller.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`capture`] - Option encoding, request building, response classification,
//!   the transport seam and the [`Client`] entry points
//!
//! # Example
//!
//! ```no_run
//! use screenshot_api::{CaptureOption, Client};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::basic("at_your_api_key");
//! client
//!     .get(
//!         "whoisxmlapi.com",
//!         "/tmp/whoisxmlapi.jpg",
//!         &[CaptureOption::FullPage(true), CaptureOption::Quality(90)],
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capture;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use capture::{
    ApiError, ArgError, CancellationToken, CaptureOption, Client, ClientParams, Cookies,
    DEFAULT_BASE_URL, DEFAULT_WIDTH, QueryParams, ReqwestTransport, Response, ResponseHead,
    ScreenshotError, Transport, TransportError,
};
