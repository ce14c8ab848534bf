//! Mermaid diagram rendering for decision trees.
//!
//! Produces a `graph TD` document with one node per tree node and one edge
//! per option, labelled with the option value that leads there. Double quotes
//! inside labels are escaped with Mermaid's `#quot;` entity.

use crate::node::FlowNode;

/// Render a decision tree as a Mermaid `graph TD` document.
pub fn render(root: &FlowNode) -> String {
    let mut writer = MermaidWriter::default();
    writer.emit(root, None, None);
    writer.finish()
}

#[derive(Default)]
struct MermaidWriter {
    next_id: usize,
    lines: Vec<String>,
}

impl MermaidWriter {
    fn alloc(&mut self) -> String {
        let id = format!("N{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn emit(&mut self, node: &FlowNode, parent: Option<&str>, via: Option<&str>) {
        let this = self.alloc();
        let label = match node {
            FlowNode::Complete => "End".to_string(),
            FlowNode::Incomplete => "Incomplete".to_string(),
            FlowNode::Question { prompt, .. } => escape(prompt),
        };

        match (parent, via) {
            (Some(parent), Some(via)) => {
                self.lines
                    .push(format!("  {parent}-->|\"{}\"|{this}[\"{label}\"]", escape(via)));
            }
            _ => self.lines.push(format!("  {this}[\"{label}\"]")),
        }

        if let FlowNode::Question { branches, .. } = node {
            for branch in branches {
                self.emit(&branch.next, Some(&this), Some(&branch.value));
            }
        }
    }

    fn finish(self) -> String {
        let mut out = String::from("graph TD\n");
        out.push_str(&self.lines.join("\n"));
        out.push('\n');
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('"', "#quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Branch;

    #[test]
    fn test_single_leaf() {
        let out = render(&FlowNode::Complete);
        assert_eq!(out, "graph TD\n  N0[\"End\"]\n");
    }

    #[test]
    fn test_edges_carry_option_values() {
        let tree = FlowNode::Question {
            id: "wsf-1".to_string(),
            prompt: "Role".to_string(),
            branches: vec![
                Branch {
                    value: "Provider".to_string(),
                    next: FlowNode::Complete,
                },
                Branch {
                    value: "User".to_string(),
                    next: FlowNode::Incomplete,
                },
            ],
        };
        let out = render(&tree);
        assert!(out.starts_with("graph TD\n"));
        assert!(out.contains("N0[\"Role\"]"));
        assert!(out.contains("N0-->|\"Provider\"|N1[\"End\"]"));
        assert!(out.contains("N0-->|\"User\"|N2[\"Incomplete\"]"));
    }

    #[test]
    fn test_quotes_escaped_in_labels() {
        let tree = FlowNode::Question {
            id: "wsf-1".to_string(),
            prompt: "Are you a \"provider\"?".to_string(),
            branches: vec![Branch {
                value: "Yes \"really\"".to_string(),
                next: FlowNode::Complete,
            }],
        };
        let out = render(&tree);
        assert!(out.contains("Are you a #quot;provider#quot;?"));
        assert!(out.contains("|\"Yes #quot;really#quot;\"|"));
        // No raw double quote may survive inside a label.
        assert!(!out.contains("\"provider\""));
    }

    #[test]
    fn test_node_ids_are_unique_and_sequential() {
        let tree = FlowNode::Question {
            id: "q".to_string(),
            prompt: "Q".to_string(),
            branches: vec![
                Branch {
                    value: "a".to_string(),
                    next: FlowNode::Complete,
                },
                Branch {
                    value: "b".to_string(),
                    next: FlowNode::Complete,
                },
                Branch {
                    value: "c".to_string(),
                    next: FlowNode::Complete,
                },
            ],
        };
        let out = render(&tree);
        for id in ["N0", "N1", "N2", "N3"] {
            assert!(out.contains(id), "missing {id} in:\n{out}");
        }
        assert!(!out.contains("N4"));
    }
}
