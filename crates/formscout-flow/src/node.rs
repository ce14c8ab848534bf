//! The decision-tree node type and its on-disk JSON shape.
//!
//! A finished exploration is a tree of [`FlowNode`] values. The serialized
//! form is deliberately compact and self-describing:
//!
//! - completed-form leaf: `{"end": true}`
//! - dead-end leaf: `{"incomplete": true}`
//! - question node: `{"id": "...", "question": "...",
//!   "options": [{"value": "...", "next": <node>}, ...]}`
//!
//! For compatibility with older tree files, `{"end": false}` is accepted on
//! input as a dead-end leaf.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use crate::error::FlowError;

/// One outgoing branch of a question node: choosing `value` leads to `next`.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub value: String,
    pub next: FlowNode,
}

/// A node in the decision tree.
///
/// Exactly one of three cases, so the walker and serializer get
/// exhaustiveness checking instead of a loosely-typed record.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowNode {
    /// The form reached its results surface on this branch.
    Complete,
    /// The branch dead-ended: no next question and no completion marker.
    Incomplete,
    /// An answerable question with one branch per option, in the order the
    /// options were enumerated on the live page.
    Question {
        id: String,
        prompt: String,
        branches: Vec<Branch>,
    },
}

impl FlowNode {
    /// True for either leaf case.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, FlowNode::Question { .. })
    }

    /// Number of branches, or zero for leaves.
    pub fn branch_count(&self) -> usize {
        match self {
            FlowNode::Question { branches, .. } => branches.len(),
            _ => 0,
        }
    }

    /// Convert to the on-disk JSON representation.
    pub fn to_value(&self) -> Value {
        match self {
            FlowNode::Complete => json!({ "end": true }),
            FlowNode::Incomplete => json!({ "incomplete": true }),
            FlowNode::Question {
                id,
                prompt,
                branches,
            } => {
                let options: Vec<Value> = branches
                    .iter()
                    .map(|b| json!({ "value": b.value, "next": b.next.to_value() }))
                    .collect();
                json!({ "id": id, "question": prompt, "options": options })
            }
        }
    }

    /// Parse a node from its on-disk JSON representation.
    pub fn from_value(value: &Value) -> Result<Self, FlowError> {
        let obj = value.as_object().ok_or_else(|| FlowError::MalformedNode {
            detail: "node is not a JSON object".to_string(),
        })?;

        if obj.contains_key("question") {
            let id = obj
                .get("id")
                .and_then(|v| v.as_str())
                .ok_or_else(|| FlowError::MalformedNode {
                    detail: "question node missing string `id`".to_string(),
                })?
                .to_string();
            let prompt = obj
                .get("question")
                .and_then(|v| v.as_str())
                .ok_or_else(|| FlowError::MalformedNode {
                    detail: "question node missing string `question`".to_string(),
                })?
                .to_string();
            let options = obj
                .get("options")
                .and_then(|v| v.as_array())
                .ok_or_else(|| FlowError::MalformedNode {
                    detail: "question node missing `options` array".to_string(),
                })?;

            let mut branches = Vec::with_capacity(options.len());
            for opt in options {
                let value = opt
                    .get("value")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| FlowError::MalformedNode {
                        detail: "option missing string `value`".to_string(),
                    })?
                    .to_string();
                let next = opt.get("next").ok_or_else(|| FlowError::MalformedNode {
                    detail: "option missing `next`".to_string(),
                })?;
                branches.push(Branch {
                    value,
                    next: FlowNode::from_value(next)?,
                });
            }
            return Ok(FlowNode::Question {
                id,
                prompt,
                branches,
            });
        }

        if let Some(end) = obj.get("end").and_then(|v| v.as_bool()) {
            // `end: false` is the legacy encoding of a dead end.
            return Ok(if end {
                FlowNode::Complete
            } else {
                FlowNode::Incomplete
            });
        }

        if obj.get("incomplete").and_then(|v| v.as_bool()) == Some(true) {
            return Ok(FlowNode::Incomplete);
        }

        Err(FlowError::MalformedNode {
            detail: format!("unrecognized node shape: {value}"),
        })
    }
}

impl Serialize for FlowNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FlowNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        FlowNode::from_value(&value).map_err(D::Error::custom)
    }
}
