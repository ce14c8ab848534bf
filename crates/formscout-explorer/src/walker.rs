//! The depth-first tree walker.
//!
//! Recursively explores every option of every reachable question, using
//! reset-and-replay to backtrack between sibling options. The traversal is
//! strictly sequential: the walker exclusively owns the one live session for
//! the whole run, so exactly one logical branch is active at any instant.
//!
//! Termination: every recursive call extends the path by one step, and a
//! question id never recurs on a path (the visited set refuses re-answering
//! a question that reappears deeper in the tree), so recursion depth is
//! bounded by the number of distinct questions in the form.

use std::collections::HashSet;
use std::time::Duration;

use futures_util::future::BoxFuture;

use formscout_flow::{Branch, FlowNode};

use crate::error::ExploreError;
use crate::extract;
use crate::model::{AnswerStep, InputKind, Question};
use crate::replay::replay;
use crate::session::FormSession;

/// Tuning for the bounded reveal poll.
///
/// After a commit the page updates asynchronously; the walker retries
/// extraction at `poll_interval` up to `poll_attempts` extra times before
/// concluding no new question appeared.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub poll_interval: Duration,
    pub poll_attempts: u32,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(200),
            poll_attempts: 20,
        }
    }
}

/// Outcome of one bounded reveal poll.
enum Probe {
    Question(Question),
    ResultsSurface,
    Nothing,
}

/// Explore the whole form and return the decision tree.
///
/// Resets the session, requires some initially visible question to carry a
/// radio option (forms with no radio entry at all are out of explored
/// scope), then walks every branch.
pub async fn explore<S: FormSession>(
    session: &mut S,
    options: &WalkOptions,
) -> Result<FlowNode, ExploreError> {
    session.reset().await?;

    let questions = extract::visible_questions(session).await?;
    if !questions.iter().any(Question::has_radio) {
        return Err(ExploreError::NoEntryQuestion);
    }

    walk(session, &[], &HashSet::new(), 0, options).await
}

/// Recursive walk from the state reached by `path`.
///
/// Boxed because async recursion needs an indirected future type.
fn walk<'a, S: FormSession>(
    session: &'a mut S,
    path: &'a [AnswerStep],
    visited: &'a HashSet<String>,
    depth: usize,
    options: &'a WalkOptions,
) -> BoxFuture<'a, Result<FlowNode, ExploreError>> {
    Box::pin(async move {
        if session.results_surface().await? {
            tracing::info!(depth, "end of form");
            return Ok(FlowNode::Complete);
        }

        let question = match poll_next(session, visited, options).await? {
            Probe::Question(q) => q,
            Probe::ResultsSurface => {
                tracing::info!(depth, "end of form");
                return Ok(FlowNode::Complete);
            }
            Probe::Nothing => {
                tracing::info!(depth, "no next question and no completion marker");
                return Ok(FlowNode::Incomplete);
            }
        };

        tracing::info!(depth, id = %question.id, prompt = %question.prompt, "question");

        let mut branches = Vec::with_capacity(question.options.len());
        for option in &question.options {
            tracing::info!(depth, value = %option.value, "option");
            session.commit(&question.id, option).await?;

            let mut new_path = path.to_vec();
            new_path.push(AnswerStep::new(&question.id, &option.value));
            let mut new_visited = visited.clone();
            new_visited.insert(question.id.clone());

            let child = walk(session, &new_path, &new_visited, depth + 1, options).await?;
            branches.push(Branch {
                value: option.value.clone(),
                next: child,
            });

            // Backtrack to the pre-option state for the next sibling. The
            // un-toggle is a fast path only; the replay does the real work.
            if option.kind == InputKind::Checkbox {
                session.clear(&question.id, option).await?;
            }
            replay(session, path).await?;
        }

        Ok(FlowNode::Question {
            id: question.id,
            prompt: question.prompt,
            branches,
        })
    })
}

/// Wait (bounded) for the next unanswered question or a results surface.
async fn poll_next<S: FormSession + ?Sized>(
    session: &mut S,
    visited: &HashSet<String>,
    options: &WalkOptions,
) -> Result<Probe, ExploreError> {
    for attempt in 0..=options.poll_attempts {
        let questions = extract::visible_questions(session).await?;
        if let Some(question) = extract::next_unanswered(&questions, visited) {
            return Ok(Probe::Question(question.clone()));
        }
        if session.results_surface().await? {
            return Ok(Probe::ResultsSurface);
        }
        if attempt < options.poll_attempts {
            tokio::time::sleep(options.poll_interval).await;
        }
    }
    Ok(Probe::Nothing)
}
