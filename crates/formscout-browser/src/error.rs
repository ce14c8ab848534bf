//! Error types for the formscout-browser crate.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while driving the browser session.
///
/// All of these are driver-level failures; per the exploration error policy
/// they are fatal to a run and propagate out of the traversal.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to establish the DevTools WebSocket connection.
    #[error("failed to connect to DevTools at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// The DevTools HTTP endpoint could not be queried for targets.
    #[error("target discovery against {endpoint} failed: {reason}")]
    DiscoveryFailed { endpoint: String, reason: String },

    /// No page target was available to attach to.
    #[error("no attachable page target at {endpoint}")]
    NoPageTarget { endpoint: String },

    /// A CDP command returned an error response.
    #[error("CDP error {code}: {message}")]
    Cdp { code: i64, message: String },

    /// A CDP command timed out waiting for its response.
    #[error("CDP command '{method}' timed out after {duration:?}")]
    CommandTimeout { method: String, duration: Duration },

    /// A protocol-level error (serialization, unexpected message shape,
    /// dropped connection).
    #[error("CDP protocol error: {detail}")]
    Protocol { detail: String },

    /// No element matched the given CSS selector.
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    /// The matched element has no usable geometry to click.
    #[error("element not clickable: {reason}")]
    NotClickable { reason: String },

    /// Navigation was rejected by the browser.
    #[error("navigation failed: {reason}")]
    NavigationFailed { reason: String },

    /// The page did not finish loading in time.
    #[error("page load timed out after {duration:?}")]
    PageLoadTimeout { duration: Duration },

    /// A JavaScript expression threw in page context.
    #[error("JavaScript exception: {message}")]
    JsException { message: String },
}
