//! Reset-and-replay backtracking.
//!
//! The session has no inverse operation, so returning to an earlier point
//! means resetting to the pristine initial state and re-committing the
//! recorded path in order. This costs O(depth) per sibling but assumes
//! nothing about the form's conditional logic beyond replay determinism.
//!
//! If a step's question or option cannot be located in the replayed state
//! (the form's own logic diverged from what was recorded), the step is
//! skipped with a warning and replay continues. This can desynchronize the
//! replayed state from the recorded path; the divergence shows up as a
//! different completion classification downstream.

use crate::error::ExploreError;
use crate::model::AnswerStep;
use crate::session::FormSession;

/// Reset the session and re-commit `path` in order.
///
/// On return the session is positioned as if the path had just been
/// answered live (modulo skipped steps).
pub async fn replay<S: FormSession + ?Sized>(
    session: &mut S,
    path: &[AnswerStep],
) -> Result<(), ExploreError> {
    tracing::debug!(steps = path.len(), "replaying answer path");
    session.reset().await?;

    for step in path {
        let questions = session.visible_questions().await?;
        let Some(question) = questions.iter().find(|q| q.id == step.field) else {
            tracing::warn!(field = %step.field, value = %step.value, "replay target question missing, skipping step");
            continue;
        };
        let Some(option) = question.option(&step.value) else {
            tracing::warn!(field = %step.field, value = %step.value, "replay target option missing, skipping step");
            continue;
        };
        let option = option.clone();
        session.commit(&step.field, &option).await?;
    }
    Ok(())
}
