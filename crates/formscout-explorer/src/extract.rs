//! Field extraction: which rendered fields count as answerable questions.
//!
//! A field is a question for traversal purposes only if its prompt text and
//! its option set both resolved. Fields failing either check are silently
//! omitted -- that is the extraction-failure recovery policy, not an error.
//! Given the same rendered state this filter is deterministic and order
//! preserving.

use std::collections::HashSet;

use crate::error::ExploreError;
use crate::model::Question;
use crate::session::FormSession;

/// Filter raw visible fields down to answerable questions, preserving order.
pub fn answerable(raw: Vec<Question>) -> Vec<Question> {
    raw.into_iter()
        .filter(|q| !q.prompt.is_empty() && !q.options.is_empty())
        .collect()
}

/// The ordered set of currently visible, answerable questions.
pub async fn visible_questions<S: FormSession + ?Sized>(
    session: &mut S,
) -> Result<Vec<Question>, ExploreError> {
    Ok(answerable(session.visible_questions().await?))
}

/// First question not yet answered along the current branch.
pub fn next_unanswered<'a>(
    questions: &'a [Question],
    visited: &HashSet<String>,
) -> Option<&'a Question> {
    questions.iter().find(|q| !visited.contains(&q.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldOption, InputKind};

    fn question(id: &str, prompt: &str, values: &[&str]) -> Question {
        Question {
            id: id.to_string(),
            prompt: prompt.to_string(),
            options: values
                .iter()
                .map(|v| FieldOption {
                    value: v.to_string(),
                    kind: InputKind::Radio,
                })
                .collect(),
        }
    }

    #[test]
    fn test_unresolvable_fields_omitted() {
        let raw = vec![
            question("wsf-1", "Role", &["Provider"]),
            question("wsf-2", "", &["Orphan"]),
            question("wsf-3", "No options", &[]),
            question("wsf-4", "Risk", &["High", "Low"]),
        ];
        let kept = answerable(raw);
        let ids: Vec<&str> = kept.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["wsf-1", "wsf-4"]);
    }

    #[test]
    fn test_next_unanswered_skips_visited() {
        let questions = vec![
            question("wsf-1", "Role", &["Provider"]),
            question("wsf-2", "Risk", &["High"]),
        ];
        let mut visited = HashSet::new();
        visited.insert("wsf-1".to_string());
        assert_eq!(next_unanswered(&questions, &visited).unwrap().id, "wsf-2");

        visited.insert("wsf-2".to_string());
        assert!(next_unanswered(&questions, &visited).is_none());
    }

    #[test]
    fn test_order_preserved() {
        let raw = vec![
            question("b", "B", &["1"]),
            question("a", "A", &["1"]),
            question("c", "C", &["1"]),
        ];
        let kept = answerable(raw);
        let ids: Vec<&str> = kept.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
