//! Error types for the formscout-flow crate.

use thiserror::Error;

/// Errors that can occur while parsing or rendering flow artifacts.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A decision-tree JSON document did not match any known node shape.
    #[error("malformed flow node: {detail}")]
    MalformedNode { detail: String },

    /// A CSS selector used for snapshot parsing could not be compiled.
    #[error("invalid CSS selector `{selector}`")]
    InvalidSelector { selector: String },
}
