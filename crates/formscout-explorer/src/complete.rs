//! Completion detection: the sole terminal condition for the recursion.
//!
//! The current rendered state is always exactly one of three things, and the
//! classification must be stable for a given state -- the walker consults it
//! before every next-question search and treats a flap as nondeterminism.

use std::collections::HashSet;

use crate::error::ExploreError;
use crate::extract;
use crate::session::FormSession;

/// Three-way classification of the current rendered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    /// The terminal results surface is present.
    Complete,
    /// No next unanswered question resolves and no results surface is
    /// present: this branch cannot proceed.
    IncompleteTerminal,
    /// An unanswered question is available.
    InProgress,
}

/// Pure classification from the two observed signals.
pub fn classify(results_surface: bool, has_next_question: bool) -> CompletionState {
    if results_surface {
        CompletionState::Complete
    } else if has_next_question {
        CompletionState::InProgress
    } else {
        CompletionState::IncompleteTerminal
    }
}

/// Classify the session's current state relative to a visited set.
///
/// Single probe, no polling -- callers that expect the UI to still be
/// settling use the walker's bounded reveal poll instead.
pub async fn classify_session<S: FormSession + ?Sized>(
    session: &mut S,
    visited: &HashSet<String>,
) -> Result<CompletionState, ExploreError> {
    let results = session.results_surface().await?;
    let questions = extract::visible_questions(session).await?;
    let has_next = extract::next_unanswered(&questions, visited).is_some();
    Ok(classify(results, has_next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_surface_wins() {
        // Even with a next question available, a results surface means done.
        assert_eq!(classify(true, true), CompletionState::Complete);
        assert_eq!(classify(true, false), CompletionState::Complete);
    }

    #[test]
    fn test_next_question_means_in_progress() {
        assert_eq!(classify(false, true), CompletionState::InProgress);
    }

    #[test]
    fn test_nothing_left_is_incomplete_terminal() {
        assert_eq!(classify(false, false), CompletionState::IncompleteTerminal);
    }
}
