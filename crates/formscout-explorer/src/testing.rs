//! Scripted in-memory form sessions for tests.
//!
//! [`ScriptedForm`] implements [`FormSession`] over a small rule table:
//! each (question, option) pair either reveals another question, raises the
//! results surface, or does nothing. State behaves like the real thing --
//! resettable only as a whole, with visibility accumulating as answers are
//! committed -- so the walker, replayer, and recorder can be exercised
//! without a browser.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::error::ExploreError;
use crate::model::{AnswerStep, FieldOption, InputKind, Question};
use crate::session::FormSession;

/// What committing one option does to the scripted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Make the named question visible.
    Reveal(String),
    /// Raise the results surface.
    Results,
    /// Reveal nothing; the branch dead-ends unless the surface is up.
    Nothing,
}

/// Convenience constructor for an all-radio question.
pub fn radio_question(id: &str, prompt: &str, values: &[&str]) -> Question {
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

/// Convenience constructor for an all-checkbox question.
pub fn checkbox_question(id: &str, prompt: &str, values: &[&str]) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        options: values
            .iter()
            .map(|v| FieldOption {
                value: v.to_string(),
                kind: InputKind::Checkbox,
            })
            .collect(),
    }
}

/// Builder for [`ScriptedForm`].
#[derive(Default)]
pub struct ScriptedFormBuilder {
    initial: Vec<Question>,
    hidden: Vec<Question>,
    outcomes: HashMap<(String, String), Outcome>,
}

impl ScriptedFormBuilder {
    /// Add a question visible from the start.
    pub fn initial(mut self, question: Question) -> Self {
        self.initial.push(question);
        self
    }

    /// Add a question that only appears once revealed.
    pub fn hidden(mut self, question: Question) -> Self {
        self.hidden.push(question);
        self
    }

    /// Declare what committing (field, value) does.
    pub fn on(mut self, field: &str, value: &str, outcome: Outcome) -> Self {
        self.outcomes
            .insert((field.to_string(), value.to_string()), outcome);
        self
    }

    pub fn build(self) -> ScriptedForm {
        ScriptedForm {
            initial: self.initial,
            hidden: self.hidden,
            outcomes: self.outcomes,
            revealed: HashSet::new(),
            checked: HashSet::new(),
            committed: Vec::new(),
            results: false,
            reset_count: 0,
        }
    }
}

/// In-memory stateful form.
pub struct ScriptedForm {
    initial: Vec<Question>,
    hidden: Vec<Question>,
    outcomes: HashMap<(String, String), Outcome>,
    revealed: HashSet<String>,
    checked: HashSet<(String, String)>,
    committed: Vec<AnswerStep>,
    results: bool,
    reset_count: usize,
}

impl ScriptedForm {
    pub fn builder() -> ScriptedFormBuilder {
        ScriptedFormBuilder::default()
    }

    /// Every commit since the last construction, across resets, in order.
    pub fn committed(&self) -> &[AnswerStep] {
        &self.committed
    }

    /// How many times the session was reset.
    pub fn reset_count(&self) -> usize {
        self.reset_count
    }

    fn currently_visible(&self) -> Vec<Question> {
        let mut questions = self.initial.clone();
        questions.extend(
            self.hidden
                .iter()
                .filter(|q| self.revealed.contains(&q.id))
                .cloned(),
        );
        questions
    }

    fn apply_outcome(&mut self, field: &str, value: &str) {
        match self.outcomes.get(&(field.to_string(), value.to_string())) {
            Some(Outcome::Reveal(id)) => {
                self.revealed.insert(id.clone());
            }
            Some(Outcome::Results) => self.results = true,
            Some(Outcome::Nothing) | None => {}
        }
    }
}

#[async_trait]
impl FormSession for ScriptedForm {
    async fn reset(&mut self) -> Result<(), ExploreError> {
        self.revealed.clear();
        self.checked.clear();
        self.results = false;
        self.reset_count += 1;
        Ok(())
    }

    async fn visible_questions(&mut self) -> Result<Vec<Question>, ExploreError> {
        Ok(self.currently_visible())
    }

    async fn commit(&mut self, field: &str, option: &FieldOption) -> Result<(), ExploreError> {
        if option.kind == InputKind::Checkbox {
            let key = (field.to_string(), option.value.clone());
            if self.checked.contains(&key) {
                return Ok(());
            }
            self.checked.insert(key);
        }
        self.committed.push(AnswerStep::new(field, &option.value));
        self.apply_outcome(field, &option.value);
        Ok(())
    }

    async fn clear(&mut self, field: &str, option: &FieldOption) -> Result<(), ExploreError> {
        self.checked
            .remove(&(field.to_string(), option.value.clone()));
        Ok(())
    }

    async fn results_surface(&mut self) -> Result<bool, ExploreError> {
        Ok(self.results)
    }

    async fn page_html(&mut self) -> Result<String, ExploreError> {
        // A snapshot shaped like the real markup, for artifact tests.
        let mut html = String::from("<html><body>");
        for question in self.currently_visible() {
            let kind = match question.options.first().map(|o| o.kind) {
                Some(InputKind::Checkbox) => "checkbox",
                _ => "radio",
            };
            html.push_str(&format!(
                "<div class=\"wsf-field-wrapper\" id=\"{}\" data-type=\"{kind}\">",
                question.id
            ));
            html.push_str(&format!("<label>{}</label>", question.prompt));
            for option in &question.options {
                html.push_str(&format!("<input type=\"{kind}\" value=\"{}\">", option.value));
            }
            html.push_str("</div>");
        }
        html.push_str("</body></html>");
        Ok(html)
    }
}

/// Scripted [`OptionPicker`]: returns pre-programmed selections in order.
///
/// [`OptionPicker`]: crate::record::OptionPicker
#[derive(Default)]
pub struct ScriptedPicker {
    single: Vec<Option<usize>>,
    multi: Vec<Vec<usize>>,
}

impl ScriptedPicker {
    pub fn new(single: Vec<Option<usize>>, multi: Vec<Vec<usize>>) -> Self {
        Self { single, multi }
    }
}

impl crate::record::OptionPicker for ScriptedPicker {
    fn pick_one(&mut self, _question: &Question) -> Result<Option<usize>, ExploreError> {
        if self.single.is_empty() {
            return Ok(None);
        }
        Ok(self.single.remove(0))
    }

    fn pick_many(&mut self, _question: &Question) -> Result<Vec<usize>, ExploreError> {
        if self.multi.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.multi.remove(0))
    }
}
