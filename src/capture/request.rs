//! Request building: argument checks, option application and the
//! `thumbWidth`/`width` cross-check.

use std::path::Path;

use reqwest::{Method, Request};
use url::Url;

use super::constants::DEFAULT_WIDTH;
use super::error::ArgError;
use super::options::{CaptureOption, THUMB_WIDTH_MESSAGE};
use super::query::QueryParams;

/// How the response of a request will be materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode<'a> {
    /// The response envelope is returned to the caller as-is.
    Raw,
    /// The body is saved to the given destination file.
    File(&'a Path),
}

/// Builds the full query for one capture request.
///
/// The API key and target URL come first, then `options` are applied in
/// order. The first invalid option aborts the build. File mode then forces
/// `errorsOutputFormat=JSON` and `imageOutputFormat=image` so the body is
/// either an image or a parseable JSON error, whatever the caller asked for.
///
/// # Errors
///
/// Returns [`ArgError`] if `target_url` is empty, the file-mode destination is
/// empty, any option is invalid, or `thumbWidth` exceeds the effective width.
pub fn build_query(
    api_key: &str,
    target_url: &str,
    options: &[CaptureOption],
    mode: RequestMode<'_>,
) -> Result<QueryParams, ArgError> {
    if target_url.is_empty() {
        return Err(ArgError::new("URL", "can not be empty"));
    }
    if let RequestMode::File(destination) = mode
        && destination.as_os_str().is_empty()
    {
        return Err(ArgError::new("filename", "can not be empty"));
    }

    let mut params = QueryParams::new();
    params.set("apiKey", api_key);
    params.set("url", target_url);

    for option in options {
        option.apply(&mut params)?;
    }

    if let RequestMode::File(_) = mode {
        params.set("errorsOutputFormat", "JSON");
        params.set("imageOutputFormat", "image");
    }

    check_thumb_width(&params)?;
    Ok(params)
}

/// Checks `thumbWidth` against the explicit `width`, or against
/// [`DEFAULT_WIDTH`] when no width was requested.
///
/// Runs after every option is applied since `thumbWidth` may precede `width`
/// in the caller's list.
fn check_thumb_width(params: &QueryParams) -> Result<(), ArgError> {
    let width = integer_param(params, "width");
    let thumb_width = integer_param(params, "thumbWidth");
    let limit = if width == 0 { DEFAULT_WIDTH } else { width };
    if thumb_width > limit {
        return Err(ArgError::new("thumbWidth", THUMB_WIDTH_MESSAGE));
    }
    Ok(())
}

fn integer_param(params: &QueryParams, key: &str) -> i64 {
    params
        .get(key)
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Builds the GET request for `base_url` with `params` as its query.
///
/// Any query already present on `base_url` is replaced.
pub(crate) fn build_request(base_url: &Url, params: &QueryParams) -> Request {
    let mut url = base_url.clone();
    url.set_query(Some(&params.encode()));
    Request::new(Method::GET, url)
}
