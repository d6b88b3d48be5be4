//! Capture options and their validation rules.
//!
//! Each [`CaptureOption`] carries the caller's raw value. Validation happens
//! when the option is applied to a [`QueryParams`], so a list of options is
//! checked in order and the first invalid one stops the build.

use std::collections::BTreeMap;
use std::ops::RangeBounds;

use super::constants::{
    MAX_DELAY, MAX_JPG_QUALITY, MAX_SCALE, MAX_SIZE, MAX_TIMEOUT, MIN_DELAY, MIN_JPG_QUALITY,
    MIN_SCALE, MIN_SIZE, MIN_THUMB_WIDTH, MIN_TIMEOUT,
};
use super::error::ArgError;
use super::query::QueryParams;

const ERRORS_OUTPUT_FORMATS: &[&str] = &["JSON", "XML"];
const IMAGE_OUTPUT_FORMATS: &[&str] = &["image", "base64"];
const CREDIT_TYPES: &[&str] = &["SA", "DRS"];
const IMAGE_TYPES: &[&str] = &["jpg", "png", "pdf"];
const MODES: &[&str] = &["fast", "slow"];
const SCROLL_POSITIONS: &[&str] = &["top", "bottom"];

/// Message shared by the `thumbWidth` range check and the post-build
/// `thumbWidth`/`width` cross-check.
pub(crate) const THUMB_WIDTH_MESSAGE: &str = "must be between 50 and width param value";

/// Cookies sent by the service with the captured page.
///
/// Serialized as `name1=value1;name2=value2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies(BTreeMap<String, String>);

impl Cookies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a cookie.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the cookies as `name1=value1;name2=value2`.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Cookies {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// A single Screenshot API request parameter.
///
/// Boolean options are omitted from the query entirely when `false`, which
/// leaves the service default in place.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOption {
    /// Errors output format: `JSON` | `XML` (case-insensitive). Default: JSON.
    ErrorsOutputFormat(String),
    /// Response output format: `image` | `base64` (case-insensitive). Default: image.
    ImageOutputFormat(String),
    /// Credits charged for the call: `SA` (Screenshot API) | `DRS` (Domain
    /// Research Suite). Default: SA.
    Credits(String),
    /// Image output type: `jpg` | `png` | `pdf`. Default: jpg.
    Type(String),
    /// JPEG quality, 40..=99. Default: 85.
    Quality(i64),
    /// Image width in px, 100..=3000. Default: 800.
    Width(i64),
    /// Image height in px, 100..=3000. Default: 600.
    Height(i64),
    /// Thumbnail width in px, 50..=3000 and not wider than the image.
    ThumbWidth(i64),
    /// `fast` waits for `document.load`, `slow` for network idle. Default: fast.
    Mode(String),
    /// Scroll down to `scrollPosition` before capturing.
    Scroll(bool),
    /// `top` | `bottom`. Default: top.
    ScrollPosition(String),
    /// Capture the full page.
    FullPage(bool),
    /// Disable JavaScript.
    NoJs(bool),
    /// Delay before capture in ms, 0..10000. Default: 250.
    Delay(i64),
    /// Page loading timeout in ms, 1000..=30000. Default: 15000.
    Timeout(i64),
    /// Device scale factor, 0.5..=4.0. Default: 1.0.
    Scale(f64),
    /// Emulate a retina display.
    Retina(bool),
    /// `User-Agent` header used by the service.
    Ua(String),
    /// `Cookie` header used by the service.
    Cookies(Cookies),
    /// Emulate a mobile device.
    Mobile(bool),
    /// Emulate a touch screen device.
    TouchScreen(bool),
    /// Render in landscape mode.
    Landscape(bool),
    /// Ask the service to answer 422 when redirects change the target hostname.
    FailOnHostnameChange(bool),
}

enum Case {
    Upper,
    Lower,
}

impl CaptureOption {
    /// Validates the option and, if valid, sets it into `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError`] when the value is outside the parameter's domain;
    /// `params` is left untouched in that case.
    pub fn apply(&self, params: &mut QueryParams) -> Result<(), ArgError> {
        match self {
            Self::ErrorsOutputFormat(value) => set_choice(
                params,
                "errorsOutputFormat",
                "errorsOutputFormat",
                value,
                &Case::Upper,
                ERRORS_OUTPUT_FORMATS,
                "must be JSON | XML",
            ),
            Self::ImageOutputFormat(value) => set_choice(
                params,
                "imageOutputFormat",
                "imageOutputFormat",
                value,
                &Case::Lower,
                IMAGE_OUTPUT_FORMATS,
                "must be image | base64",
            ),
            Self::Credits(value) => set_choice(
                params,
                "credits",
                "credits",
                value,
                &Case::Upper,
                CREDIT_TYPES,
                "must be SA | DRS",
            ),
            Self::Type(value) => set_choice(
                params,
                "type",
                "imageType",
                value,
                &Case::Lower,
                IMAGE_TYPES,
                "must be jpg | png | pdf",
            ),
            Self::Quality(value) => set_integer(
                params,
                "quality",
                *value,
                MIN_JPG_QUALITY..=MAX_JPG_QUALITY,
                "must be between 40 and 99",
            ),
            Self::Width(value) => set_integer(
                params,
                "width",
                *value,
                MIN_SIZE..=MAX_SIZE,
                "must be between 100 and 3000",
            ),
            Self::Height(value) => set_integer(
                params,
                "height",
                *value,
                MIN_SIZE..=MAX_SIZE,
                "must be between 100 and 3000",
            ),
            Self::ThumbWidth(value) => set_integer(
                params,
                "thumbWidth",
                *value,
                MIN_THUMB_WIDTH..=MAX_SIZE,
                THUMB_WIDTH_MESSAGE,
            ),
            Self::Mode(value) => set_choice(
                params,
                "mode",
                "mode",
                value,
                &Case::Lower,
                MODES,
                "must be fast | slow",
            ),
            Self::ScrollPosition(value) => set_choice(
                params,
                "scrollPosition",
                "scrollPosition",
                value,
                &Case::Lower,
                SCROLL_POSITIONS,
                "must be top | bottom",
            ),
            Self::Delay(value) => set_integer(
                params,
                "delay",
                *value,
                MIN_DELAY..MAX_DELAY,
                "must be between 0 and 10000",
            ),
            Self::Timeout(value) => set_integer(
                params,
                "timeout",
                *value,
                MIN_TIMEOUT..=MAX_TIMEOUT,
                "must be between 1000 and 30000",
            ),
            Self::Scale(value) => {
                if !(MIN_SCALE..=MAX_SCALE).contains(value) {
                    return Err(ArgError::new("scale", "must be between 0.5 and 4.0"));
                }
                params.set("scale", format!("{value:.6}"));
                Ok(())
            }
            Self::Ua(value) => {
                params.set("ua", value.as_str());
                Ok(())
            }
            Self::Cookies(cookies) => {
                params.set("cookies", cookies.to_header_value());
                Ok(())
            }
            Self::Scroll(flag) => set_flag(params, "scroll", *flag),
            Self::FullPage(flag) => set_flag(params, "fullPage", *flag),
            Self::NoJs(flag) => set_flag(params, "noJs", *flag),
            Self::Retina(flag) => set_flag(params, "retina", *flag),
            Self::Mobile(flag) => set_flag(params, "mobile", *flag),
            Self::TouchScreen(flag) => set_flag(params, "touchScreen", *flag),
            Self::Landscape(flag) => set_flag(params, "landscape", *flag),
            Self::FailOnHostnameChange(flag) => set_flag(params, "failOnHostnameChange", *flag),
        }
    }
}

fn set_choice(
    params: &mut QueryParams,
    key: &str,
    name: &'static str,
    value: &str,
    case: &Case,
    allowed: &[&str],
    message: &'static str,
) -> Result<(), ArgError> {
    let normalized = match case {
        Case::Upper => value.to_uppercase(),
        Case::Lower => value.to_lowercase(),
    };
    if !allowed.contains(&normalized.as_str()) {
        return Err(ArgError::new(name, message));
    }
    params.set(key, normalized);
    Ok(())
}

fn set_integer(
    params: &mut QueryParams,
    key: &'static str,
    value: i64,
    range: impl RangeBounds<i64>,
    message: &'static str,
) -> Result<(), ArgError> {
    if !range.contains(&value) {
        return Err(ArgError::new(key, message));
    }
    params.set(key, value.to_string());
    Ok(())
}

// Absence means "service default", so `false` never reaches the query.
fn set_flag(params: &mut QueryParams, key: &str, flag: bool) -> Result<(), ArgError> {
    if flag {
        params.set(key, "true");
    }
    Ok(())
}
