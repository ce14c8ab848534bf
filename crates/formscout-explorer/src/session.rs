//! The session seam between the exploration core and a concrete driver.

use async_trait::async_trait;

use crate::error::ExploreError;
use crate::model::{FieldOption, Question};

/// A live, mutable form session.
///
/// Implementations own all timing: `reset` returns once the form's fields
/// are rendered, and `commit`/`clear` return only after the page has had its
/// settle interval to run conditional logic. The core never sleeps on its
/// own except for the bounded reveal poll in the walker.
///
/// There is exactly one implementation talking to a real page ([`LiveForm`])
/// and one scripted test double ([`testing::ScriptedForm`]); the traversal
/// algorithms are written against this trait only.
///
/// [`LiveForm`]: crate::live::LiveForm
/// [`testing::ScriptedForm`]: crate::testing::ScriptedForm
#[async_trait]
pub trait FormSession: Send {
    /// Return the session to its pristine initial state (navigate back to
    /// the form's entry point and wait for it to render).
    async fn reset(&mut self) -> Result<(), ExploreError>;

    /// All currently visible question wrappers with resolvable identifiers,
    /// in render order -- including already-answered ones (the replayer needs
    /// to find those again). No filtering beyond visibility; the extractor
    /// decides answerability.
    async fn visible_questions(&mut self) -> Result<Vec<Question>, ExploreError>;

    /// Commit one option: click for radio; for checkbox, check only if not
    /// already checked. Returns after the settle interval.
    async fn commit(&mut self, field: &str, option: &FieldOption) -> Result<(), ExploreError>;

    /// Un-toggle a checkbox option if it is currently checked. Used as the
    /// fast-path revert before sibling replay.
    async fn clear(&mut self, field: &str, option: &FieldOption) -> Result<(), ExploreError>;

    /// Whether the terminal results surface is currently present.
    async fn results_surface(&mut self) -> Result<bool, ExploreError>;

    /// Full rendered HTML, for the raw snapshot artifact.
    async fn page_html(&mut self) -> Result<String, ExploreError>;
}
