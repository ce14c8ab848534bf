//! Static field-list extraction from a raw HTML snapshot.
//!
//! Exploration saves the final rendered page as HTML; this module runs one
//! pass over that snapshot and summarizes every field wrapper it contains
//! (answered or not, visible or not). This is a flat inventory of the form's
//! markup, not a traversal artifact -- see `formscout-explorer` for the live
//! extraction that feeds the walker.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// Summary of one field wrapper found in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// The wrapper's `data-type` attribute, when present.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Text of the first `<label>` inside the wrapper.
    pub label: Option<String>,
    /// `value` attributes of all inputs inside the wrapper.
    pub options: Vec<String>,
}

/// Flat inventory of every field wrapper in a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormOutline {
    pub form: Vec<FieldSummary>,
}

/// Parse a raw HTML snapshot into a [`FormOutline`].
///
/// `wrapper_selector` is the CSS selector identifying field wrappers
/// (e.g. `div.wsf-field-wrapper`).
pub fn parse_form_snapshot(html: &str, wrapper_selector: &str) -> Result<FormOutline, FlowError> {
    let wrapper = Selector::parse(wrapper_selector).map_err(|_| FlowError::InvalidSelector {
        selector: wrapper_selector.to_string(),
    })?;
    let label_sel = Selector::parse("label").expect("static selector");
    let input_sel = Selector::parse("input").expect("static selector");

    let document = Html::parse_document(html);
    let mut form = Vec::new();
    for field in document.select(&wrapper) {
        form.push(summarize_field(&field, &label_sel, &input_sel));
    }
    Ok(FormOutline { form })
}

fn summarize_field(
    field: &ElementRef<'_>,
    label_sel: &Selector,
    input_sel: &Selector,
) -> FieldSummary {
    let kind = field.value().attr("data-type").map(str::to_string);
    let label = field
        .select(label_sel)
        .next()
        .map(|l| l.text().collect::<String>().trim().to_string());
    let options = field
        .select(input_sel)
        .filter_map(|i| i.value().attr("value"))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    FieldSummary {
        kind,
        label,
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <div class="wsf-field-wrapper" data-type="radio">
          <input type="radio" value="Provider"> <label>Provider</label>
          <input type="radio" value="User"> <label>User</label>
        </div>
    "#;

    #[test]
    fn test_extracts_fields_from_snapshot() {
        let outline = parse_form_snapshot(SAMPLE, "div.wsf-field-wrapper").unwrap();
        assert_eq!(outline.form.len(), 1);
        let field = &outline.form[0];
        assert_eq!(field.kind.as_deref(), Some("radio"));
        assert_eq!(field.label.as_deref(), Some("Provider"));
        assert!(field.options.contains(&"Provider".to_string()));
        assert!(field.options.contains(&"User".to_string()));
    }

    #[test]
    fn test_field_without_label_or_type() {
        let html = r#"<div class="wsf-field-wrapper"><input value="A"></div>"#;
        let outline = parse_form_snapshot(html, "div.wsf-field-wrapper").unwrap();
        assert_eq!(outline.form.len(), 1);
        assert_eq!(outline.form[0].kind, None);
        assert_eq!(outline.form[0].label, None);
        assert_eq!(outline.form[0].options, vec!["A".to_string()]);
    }

    #[test]
    fn test_empty_values_skipped() {
        let html = r#"<div class="wsf-field-wrapper"><input value=""><input value="B"></div>"#;
        let outline = parse_form_snapshot(html, "div.wsf-field-wrapper").unwrap();
        assert_eq!(outline.form[0].options, vec!["B".to_string()]);
    }

    #[test]
    fn test_no_wrappers_yields_empty_outline() {
        let outline = parse_form_snapshot("<html><body></body></html>", ".wsf-field-wrapper");
        assert!(outline.unwrap().form.is_empty());
    }

    #[test]
    fn test_bad_selector_rejected() {
        assert!(parse_form_snapshot("<html></html>", ":::").is_err());
    }

    #[test]
    fn test_outline_serializes_with_type_key() {
        let outline = parse_form_snapshot(SAMPLE, "div.wsf-field-wrapper").unwrap();
        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(json["form"][0]["type"], "radio");
        assert_eq!(json["form"][0]["label"], "Provider");
    }
}
