//! rbar-remote
//!
//! HTTP implementations of the kiosk's collaborator traits:
//! - [`HttpOrderEndpoint`] posts the composed order to the order-creation
//!   service.
//! - [`HttpLogoCatalog`] fetches gallery SVGs served as static resources.
//!
//! Neither type retries; the kiosk reports a failure and resets.

pub mod catalog;
pub mod endpoint;

pub use catalog::HttpLogoCatalog;
pub use endpoint::HttpOrderEndpoint;

/// Join a base URL and an absolute path without doubling or dropping the `/`.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Short, user-presentable description of a transport failure.
pub(crate) fn describe_transport(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        "service unreachable".to_string()
    } else {
        e.to_string()
    }
}
