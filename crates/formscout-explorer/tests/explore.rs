//! Scenario tests for the exhaustive walker, on scripted forms.

use std::collections::HashSet;
use std::time::Duration;

use serde_json::json;

use formscout_explorer::testing::{checkbox_question, radio_question, Outcome, ScriptedForm};
use formscout_explorer::{explore, ExploreError};
use formscout_flow::FlowNode;

fn fast() -> formscout_explorer::WalkOptions {
    formscout_explorer::WalkOptions {
        poll_interval: Duration::ZERO,
        poll_attempts: 1,
    }
}

/// Walk the tree collecting every root-to-leaf id sequence.
fn id_paths(node: &FlowNode, prefix: Vec<String>, out: &mut Vec<Vec<String>>) {
    match node {
        FlowNode::Question { id, branches, .. } => {
            let mut prefix = prefix;
            prefix.push(id.clone());
            for branch in branches {
                id_paths(&branch.next, prefix.clone(), out);
            }
        }
        _ => out.push(prefix),
    }
}

#[tokio::test]
async fn single_question_every_answer_completes() {
    let mut form = ScriptedForm::builder()
        .initial(radio_question("wsf-1", "Role", &["Provider", "User"]))
        .on("wsf-1", "Provider", Outcome::Results)
        .on("wsf-1", "User", Outcome::Results)
        .build();

    let tree = explore(&mut form, &fast()).await.unwrap();
    assert_eq!(
        serde_json::to_value(&tree).unwrap(),
        json!({
            "id": "wsf-1",
            "question": "Role",
            "options": [
                { "value": "Provider", "next": { "end": true } },
                { "value": "User", "next": { "end": true } },
            ]
        })
    );
}

#[tokio::test]
async fn two_level_form_nests_one_branch() {
    let mut form = ScriptedForm::builder()
        .initial(radio_question("wsf-1", "Role", &["Provider", "User"]))
        .hidden(radio_question("wsf-2", "Risk", &["High", "Low"]))
        .on("wsf-1", "Provider", Outcome::Reveal("wsf-2".to_string()))
        .on("wsf-1", "User", Outcome::Results)
        .on("wsf-2", "High", Outcome::Results)
        .on("wsf-2", "Low", Outcome::Results)
        .build();

    let tree = explore(&mut form, &fast()).await.unwrap();
    let FlowNode::Question { id, branches, .. } = &tree else {
        panic!("root must be a question, got {tree:?}");
    };
    assert_eq!(id, "wsf-1");
    assert_eq!(branches.len(), 2);

    // Provider branch nests the Risk question; User goes straight to the end.
    let FlowNode::Question { id: nested, branches: risk, .. } = &branches[0].next else {
        panic!("Provider branch must nest a question");
    };
    assert_eq!(nested, "wsf-2");
    assert_eq!(risk.len(), 2);
    assert_eq!(risk[0].next, FlowNode::Complete);
    assert_eq!(branches[1].next, FlowNode::Complete);
}

#[tokio::test]
async fn dead_end_branch_yields_incomplete_leaf() {
    let mut form = ScriptedForm::builder()
        .initial(radio_question("wsf-1", "Role", &["Provider", "User"]))
        .on("wsf-1", "Provider", Outcome::Nothing)
        .on("wsf-1", "User", Outcome::Results)
        .build();

    let tree = explore(&mut form, &fast()).await.unwrap();
    let FlowNode::Question { branches, .. } = &tree else {
        panic!("root must be a question");
    };
    assert_eq!(
        serde_json::to_value(&branches[0].next).unwrap(),
        json!({ "incomplete": true })
    );
    assert_eq!(branches[1].next, FlowNode::Complete);
}

#[tokio::test]
async fn root_branch_count_matches_option_count_in_order() {
    let mut form = ScriptedForm::builder()
        .initial(radio_question("wsf-1", "Role", &["A", "B", "C", "D"]))
        .on("wsf-1", "A", Outcome::Results)
        .on("wsf-1", "B", Outcome::Results)
        .on("wsf-1", "C", Outcome::Results)
        .on("wsf-1", "D", Outcome::Results)
        .build();

    let tree = explore(&mut form, &fast()).await.unwrap();
    let FlowNode::Question { branches, .. } = &tree else {
        panic!("root must be a question");
    };
    let values: Vec<&str> = branches.iter().map(|b| b.value.as_str()).collect();
    assert_eq!(values, vec!["A", "B", "C", "D"]);
}

#[tokio::test]
async fn no_path_repeats_a_question_id() {
    let mut form = ScriptedForm::builder()
        .initial(radio_question("wsf-1", "Role", &["Provider", "User"]))
        .hidden(radio_question("wsf-2", "Risk", &["High", "Low"]))
        .hidden(radio_question("wsf-3", "Region", &["EU", "Other"]))
        .on("wsf-1", "Provider", Outcome::Reveal("wsf-2".to_string()))
        .on("wsf-1", "User", Outcome::Reveal("wsf-3".to_string()))
        .on("wsf-2", "High", Outcome::Reveal("wsf-3".to_string()))
        .on("wsf-2", "Low", Outcome::Results)
        .on("wsf-3", "EU", Outcome::Results)
        .on("wsf-3", "Other", Outcome::Results)
        .build();

    let tree = explore(&mut form, &fast()).await.unwrap();
    let mut paths = Vec::new();
    id_paths(&tree, Vec::new(), &mut paths);
    assert!(!paths.is_empty());
    for path in paths {
        let unique: HashSet<&String> = path.iter().collect();
        assert_eq!(unique.len(), path.len(), "repeated id on path {path:?}");
    }
}

#[tokio::test]
async fn checkbox_options_explored_one_at_a_time() {
    let mut form = ScriptedForm::builder()
        .initial(radio_question("wsf-1", "Role", &["Provider"]))
        .hidden(checkbox_question("wsf-2", "Practices", &["Biometrics", "Scoring"]))
        .on("wsf-1", "Provider", Outcome::Reveal("wsf-2".to_string()))
        .on("wsf-2", "Biometrics", Outcome::Results)
        .on("wsf-2", "Scoring", Outcome::Results)
        .build();

    let tree = explore(&mut form, &fast()).await.unwrap();
    let FlowNode::Question { branches, .. } = &tree else {
        panic!("root must be a question");
    };
    let FlowNode::Question { branches: practices, .. } = &branches[0].next else {
        panic!("Provider branch must nest the checkbox question");
    };
    // One branch per checkbox option, each ending complete -- never subsets.
    assert_eq!(practices.len(), 2);
    assert_eq!(practices[0].next, FlowNode::Complete);
    assert_eq!(practices[1].next, FlowNode::Complete);
}

#[tokio::test]
async fn form_without_any_radio_question_is_rejected() {
    let mut form = ScriptedForm::builder()
        .initial(checkbox_question("wsf-1", "Practices", &["Biometrics"]))
        .build();

    let err = explore(&mut form, &fast()).await.unwrap_err();
    assert!(matches!(err, ExploreError::NoEntryQuestion));
}

#[tokio::test]
async fn checkbox_question_ahead_of_a_radio_entry_is_accepted() {
    let mut form = ScriptedForm::builder()
        .initial(checkbox_question("wsf-1", "Practices", &["Biometrics"]))
        .initial(radio_question("wsf-2", "Role", &["Provider"]))
        .on("wsf-2", "Provider", Outcome::Results)
        .build();

    let tree = explore(&mut form, &fast()).await.unwrap();
    let FlowNode::Question { id, branches, .. } = &tree else {
        panic!("root must be a question");
    };
    assert_eq!(id, "wsf-1");
    let FlowNode::Question { id: nested, .. } = &branches[0].next else {
        panic!("radio question must follow the checkbox question");
    };
    assert_eq!(nested, "wsf-2");
}

#[tokio::test]
async fn empty_form_is_rejected() {
    let mut form = ScriptedForm::builder().build();
    let err = explore(&mut form, &fast()).await.unwrap_err();
    assert!(matches!(err, ExploreError::NoEntryQuestion));
}

#[tokio::test]
async fn backtracking_replays_the_parent_path() {
    let mut form = ScriptedForm::builder()
        .initial(radio_question("wsf-1", "Role", &["Provider", "User"]))
        .hidden(radio_question("wsf-2", "Risk", &["High", "Low"]))
        .on("wsf-1", "Provider", Outcome::Reveal("wsf-2".to_string()))
        .on("wsf-1", "User", Outcome::Results)
        .on("wsf-2", "High", Outcome::Results)
        .on("wsf-2", "Low", Outcome::Results)
        .build();

    explore(&mut form, &fast()).await.unwrap();
    // Sibling exploration forces resets: initial + one per backtrack.
    assert!(form.reset_count() >= 3, "resets: {}", form.reset_count());
    // After replaying [(wsf-1, Provider)], the next commit must be wsf-2.
    let commits: Vec<(String, String)> = form
        .committed()
        .iter()
        .map(|s| (s.field.clone(), s.value.clone()))
        .collect();
    assert!(commits.contains(&("wsf-2".to_string(), "Low".to_string())));
}
