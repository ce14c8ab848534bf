//! Error types for the exploration core.

use thiserror::Error;

use formscout_browser::BrowserError;

/// Errors that abort a traversal.
///
/// Only driver-level failures and setup problems live here. Extraction
/// failures and unlocatable replay targets are by design recovered locally
/// (fields are omitted, steps are skipped) and never surface as errors.
#[derive(Debug, Error)]
pub enum ExploreError {
    /// The underlying browser session failed; fatal to the run.
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// The form's first answerable question is not a single-select, or no
    /// answerable question is visible at all on initial load.
    #[error("no radio-kind entry question found on initial load")]
    NoEntryQuestion,

    /// Interactive prompting failed (record mode only).
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}
