//! Human-guided single-path recording.
//!
//! A degenerate, non-exhaustive variant of the walker: at each in-progress
//! state the current question is surfaced to a human, exactly the chosen
//! option(s) are committed, and the running path is appended. No
//! backtracking, no tree -- the output is one linear [`RecordedRun`].

use std::collections::HashSet;

use formscout_flow::{Choice, RecordedRun};

use crate::error::ExploreError;
use crate::model::{InputKind, Question};
use crate::session::FormSession;
use crate::{complete, extract};

/// Source of human answers, one question at a time.
///
/// The CLI backs this with terminal prompts; tests use a scripted picker.
pub trait OptionPicker: Send {
    /// Pick one option index for a single-select question, or `None` to
    /// skip it unanswered.
    fn pick_one(&mut self, question: &Question) -> Result<Option<usize>, ExploreError>;

    /// Pick any subset of option indices for a multi-select question.
    fn pick_many(&mut self, question: &Question) -> Result<Vec<usize>, ExploreError>;
}

/// Walk the form once, asking `picker` at every question.
///
/// Stops when the results surface appears or no unanswered question remains.
pub async fn record<S, P>(session: &mut S, picker: &mut P) -> Result<RecordedRun, ExploreError>
where
    S: FormSession,
    P: OptionPicker,
{
    let mut run = RecordedRun::default();
    let mut visited: HashSet<String> = HashSet::new();

    loop {
        match complete::classify_session(session, &visited).await? {
            complete::CompletionState::Complete => {
                tracing::info!("end of form");
                break;
            }
            complete::CompletionState::IncompleteTerminal => {
                tracing::info!("no more visible, unanswered questions");
                break;
            }
            complete::CompletionState::InProgress => {}
        }

        let questions = extract::visible_questions(session).await?;
        let Some(question) = extract::next_unanswered(&questions, &visited).cloned() else {
            break;
        };
        visited.insert(question.id.clone());

        let multi = question
            .options
            .first()
            .is_some_and(|o| o.kind == InputKind::Checkbox);

        if multi {
            let picked = picker.pick_many(&question)?;
            let mut values = Vec::with_capacity(picked.len());
            for index in picked {
                if let Some(option) = question.options.get(index) {
                    session.commit(&question.id, option).await?;
                    values.push(option.value.clone());
                }
            }
            run.push(question.id.clone(), Choice::Many(values));
        } else {
            match picker.pick_one(&question)? {
                Some(index) => {
                    if let Some(option) = question.options.get(index) {
                        session.commit(&question.id, option).await?;
                        run.push(question.id.clone(), Choice::One(option.value.clone()));
                    }
                }
                None => {
                    tracing::info!(id = %question.id, "question skipped by user");
                }
            }
        }

        // No reveal poll here: commit settles before returning, and the
        // classification at the top of the loop re-extracts.
    }

    Ok(run)
}
