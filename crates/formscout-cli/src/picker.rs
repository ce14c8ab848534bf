//! Terminal-backed option picker for record mode.

use dialoguer::{MultiSelect, Select};

use formscout_explorer::record::OptionPicker;
use formscout_explorer::{ExploreError, Question};

/// Prompts on the controlling terminal with arrow-key selection.
#[derive(Default)]
pub struct TerminalPicker;

impl OptionPicker for TerminalPicker {
    fn pick_one(&mut self, question: &Question) -> Result<Option<usize>, ExploreError> {
        let values: Vec<&str> = question.options.iter().map(|o| o.value.as_str()).collect();
        Select::new()
            .with_prompt(question.prompt.clone())
            .items(&values)
            .default(0)
            .interact_opt()
            .map_err(|e| ExploreError::Prompt(e.to_string()))
    }

    fn pick_many(&mut self, question: &Question) -> Result<Vec<usize>, ExploreError> {
        let values: Vec<&str> = question.options.iter().map(|o| o.value.as_str()).collect();
        MultiSelect::new()
            .with_prompt(format!("{} (space to toggle, enter to confirm)", question.prompt))
            .items(&values)
            .interact()
            .map_err(|e| ExploreError::Prompt(e.to_string()))
    }
}
