//! Exploration core for formscout.
//!
//! The session being explored is external, stateful, and has no undo: the
//! only way back to an earlier point is to reset it and deterministically
//! replay the answer path that led there. Everything in this crate is built
//! around that constraint:
//!
//! - [`FormSession`]: the seam between the algorithm and the concrete
//!   driver. [`LiveForm`] implements it over CDP; the `testing` module
//!   provides a scripted in-memory implementation.
//! - [`extract`]: which of the currently rendered fields count as
//!   answerable questions.
//! - [`complete`]: the three-way terminal classification that bounds the
//!   recursion.
//! - [`replay`]: reset-and-replay backtracking.
//! - [`walker`]: the depth-first traversal producing the decision tree.
//! - [`record`]: the human-guided single-path variant.
//!
//! One session, one logical branch active at a time. The walker owns the
//! session mutably for the whole traversal; there is no concurrent branch
//! exploration because the session can only hold one position in the form's
//! state space.

pub mod complete;
pub mod error;
pub mod extract;
pub mod live;
pub mod model;
pub mod profile;
pub mod record;
pub mod replay;
pub mod session;
pub mod testing;
pub mod walker;

pub use complete::CompletionState;
pub use error::ExploreError;
pub use live::LiveForm;
pub use model::{AnswerPath, AnswerStep, FieldOption, InputKind, Question};
pub use profile::FormProfile;
pub use record::{record, OptionPicker};
pub use session::FormSession;
pub use walker::{explore, WalkOptions};
