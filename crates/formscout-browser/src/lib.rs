//! Chrome DevTools Protocol session driver for formscout.
//!
//! Drives a live Chrome/Chromium page over CDP, providing exactly the
//! primitives the form explorer needs:
//!
//! - Navigate to the form URL and wait for the load event (`Page.navigate`)
//! - Evaluate JavaScript in page context (`Runtime.evaluate`)
//! - Click elements located by CSS selector (`DOM.querySelector` +
//!   `DOM.getBoxModel` + `Input.dispatchMouseEvent`)
//! - Read element visibility, text, and checkbox state
//! - Capture the full rendered HTML and text content
//!
//! Two layers:
//!
//! - **`cdp`**: WebSocket client with JSON-RPC 2.0 command/response
//!   correlation and event forwarding.
//! - **`driver`**: the high-level [`PageDriver`] built on it.
//!
//! `targets` discovers page targets via Chrome's DevTools HTTP endpoint;
//! Chrome must be started with `--remote-debugging-port`.

pub mod cdp;
pub mod driver;
pub mod error;
pub mod targets;

pub use cdp::{CdpClient, CdpEvent};
pub use driver::PageDriver;
pub use error::BrowserError;
pub use targets::{new_page_target, pick_page_target, PageTarget};
