//! Transient traversal types: questions, options, and answer paths.
//!
//! A [`Question`] exists only while it is rendered in the live session; it is
//! never persisted on its own. The durable handle on session state is the
//! [`AnswerPath`]: the ordered list of committed choices from the form's
//! start, which the replayer can turn back into a live position.

/// Input kind of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Mutually exclusive within its question.
    Radio,
    /// Independent toggle. Explored one option at a time (select, explore,
    /// revert), not over all subsets.
    Checkbox,
}

/// One selectable value within a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub value: String,
    pub kind: InputKind,
}

/// One answerable question as currently rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Stable identifier assigned by the rendering surface (the wrapper
    /// element's id).
    pub id: String,
    pub prompt: String,
    /// Options in enumeration order; children of the output node follow
    /// this order exactly.
    pub options: Vec<FieldOption>,
}

impl Question {
    /// Whether any option is single-select.
    pub fn has_radio(&self) -> bool {
        self.options.iter().any(|o| o.kind == InputKind::Radio)
    }

    /// Look up an option by its value label.
    pub fn option(&self, value: &str) -> Option<&FieldOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// One committed choice: which question, which value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerStep {
    pub field: String,
    pub value: String,
}

impl AnswerStep {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Ordered answer sequence from the form's start. Invariant: no two steps
/// share a `field`.
pub type AnswerPath = Vec<AnswerStep>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_option_lookup() {
        let q = Question {
            id: "wsf-1".to_string(),
            prompt: "Role".to_string(),
            options: vec![
                FieldOption {
                    value: "Provider".to_string(),
                    kind: InputKind::Radio,
                },
                FieldOption {
                    value: "User".to_string(),
                    kind: InputKind::Radio,
                },
            ],
        };
        assert!(q.has_radio());
        assert_eq!(q.option("User").unwrap().value, "User");
        assert!(q.option("Deployer").is_none());
    }

    #[test]
    fn test_checkbox_only_question_has_no_radio() {
        let q = Question {
            id: "wsf-3".to_string(),
            prompt: "Practices".to_string(),
            options: vec![FieldOption {
                value: "Biometrics".to_string(),
                kind: InputKind::Checkbox,
            }],
        };
        assert!(!q.has_radio());
    }
}
