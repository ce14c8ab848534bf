//! Recorded single-path runs from the interactive mode.
//!
//! Record mode does not build a tree; it commits one human-chosen answer per
//! question and saves the linear path as
//! `{"run": [["field-id", choice], ...]}` where `choice` is a bare string
//! for a radio answer and a list of strings for a multi-select answer.

use serde::{Deserialize, Serialize};

/// The committed answer(s) for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    /// A single radio selection.
    One(String),
    /// One or more checkbox selections.
    Many(Vec<String>),
}

/// One recorded answer step: the question's stable id and what was chosen.
///
/// On disk a step is a two-element array, `["field-id", choice]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, Choice)", into = "(String, Choice)")]
pub struct RecordedStep {
    pub field: String,
    pub choice: Choice,
}

impl From<(String, Choice)> for RecordedStep {
    fn from((field, choice): (String, Choice)) -> Self {
        Self { field, choice }
    }
}

impl From<RecordedStep> for (String, Choice) {
    fn from(step: RecordedStep) -> Self {
        (step.field, step.choice)
    }
}

/// A complete recorded walkthrough of the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedRun {
    pub run: Vec<RecordedStep>,
}

impl RecordedRun {
    pub fn push(&mut self, field: impl Into<String>, choice: Choice) {
        self.run.push(RecordedStep {
            field: field.into(),
            choice,
        });
    }

    pub fn len(&self) -> usize {
        self.run.len()
    }

    pub fn is_empty(&self) -> bool {
        self.run.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radio_step_serializes_as_pair() {
        let mut run = RecordedRun::default();
        run.push("wsf-1", Choice::One("Provider".to_string()));
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["run"][0], serde_json::json!(["wsf-1", "Provider"]));
    }

    #[test]
    fn test_checkbox_step_serializes_as_pair_with_list() {
        let mut run = RecordedRun::default();
        run.push(
            "wsf-3",
            Choice::Many(vec!["Biometrics".to_string(), "Scoring".to_string()]),
        );
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(
            json["run"][0],
            serde_json::json!(["wsf-3", ["Biometrics", "Scoring"]])
        );
    }

    #[test]
    fn test_run_parses_from_pair_arrays() {
        let parsed: RecordedRun =
            serde_json::from_str(r#"{"run": [["wsf-1", "User"], ["wsf-2", ["Low"]]]}"#).unwrap();
        assert_eq!(parsed.run[0].field, "wsf-1");
        assert_eq!(parsed.run[0].choice, Choice::One("User".to_string()));
        assert_eq!(
            parsed.run[1].choice,
            Choice::Many(vec!["Low".to_string()])
        );
    }

    #[test]
    fn test_run_round_trip() {
        let mut run = RecordedRun::default();
        run.push("wsf-1", Choice::One("User".to_string()));
        run.push("wsf-2", Choice::Many(vec!["Low".to_string()]));
        let text = serde_json::to_string(&run).unwrap();
        let parsed: RecordedRun = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, run);
        assert_eq!(parsed.len(), 2);
    }
}
