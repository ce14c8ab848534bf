//! Decision-tree data model and serialization for formscout.
//!
//! This crate owns everything about the *output* of a form exploration:
//!
//! - [`FlowNode`]: the tagged three-case tree node (complete leaf, incomplete
//!   leaf, or question with branches) and its exact on-disk JSON shape.
//! - [`RecordedRun`]: the linear answer path produced by record mode.
//! - [`mermaid`]: rendering a finished tree as a Mermaid `graph TD` diagram.
//! - [`snapshot`]: one-pass extraction of a structured field list from a raw
//!   HTML snapshot of the form.
//!
//! Nothing here touches a live browser session; the exploration core in
//! `formscout-explorer` produces these values and the CLI persists them.

pub mod error;
pub mod mermaid;
pub mod node;
pub mod run;
pub mod snapshot;

pub use error::FlowError;
pub use node::{Branch, FlowNode};
pub use run::{Choice, RecordedRun, RecordedStep};
pub use snapshot::{parse_form_snapshot, FieldSummary, FormOutline};
