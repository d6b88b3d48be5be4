//! User-Agent string sent by the default transport.

/// Default User-Agent for capture requests (identifies the client library and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("screenshot-api/{version} (rust-client)")
}
