//! Constants for the capture module (option bounds, transport timeouts).

/// Lower bound for `delay` (ms, inclusive).
pub const MIN_DELAY: i64 = 0;

/// Upper bound for `delay` (ms, exclusive).
pub const MAX_DELAY: i64 = 10_000;

pub const MIN_JPG_QUALITY: i64 = 40;
pub const MAX_JPG_QUALITY: i64 = 99;

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 4.0;

/// Bounds shared by `width` and `height` (px); `MAX_SIZE` also caps `thumbWidth`.
pub const MIN_SIZE: i64 = 100;
pub const MAX_SIZE: i64 = 3000;

pub const MIN_THUMB_WIDTH: i64 = 50;

/// Bounds for the page loading `timeout` (ms).
pub const MIN_TIMEOUT: i64 = 1000;
pub const MAX_TIMEOUT: i64 = 30_000;

/// Width the service renders at when no explicit `width` is requested.
pub const DEFAULT_WIDTH: i64 = 800;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout, the longest wait between two reads. The
/// service renders the page before answering and its page-load timeout
/// goes up to 30 seconds.
pub const READ_TIMEOUT_SECS: u64 = 120;
