//! Form profile: where the form lives and how to recognize its pieces.
//!
//! Loaded from TOML; every field has a default targeting the EU AI Act
//! compliance checker (a WS-Form questionnaire). `FORMSCOUT_URL` and
//! `FORMSCOUT_DATA_DIR` override the start URL and output directory.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ExploreError;
use crate::walker::WalkOptions;

/// Configuration for one explorable form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormProfile {
    /// The form's entry URL; resetting the session navigates here.
    pub start_url: String,
    /// DevTools HTTP endpoint of the browser to attach to.
    pub devtools_endpoint: String,
    /// CSS selector matching one wrapper element per question.
    pub field_wrapper: String,
    /// Text whose presence in the rendered page marks the results surface.
    pub results_text_marker: String,
    /// CSS selector that only matches on the results surface.
    pub results_input_selector: String,
    /// Directory artifacts are written to.
    pub data_dir: PathBuf,
    /// Settle interval after every commit, milliseconds.
    pub settle_ms: u64,
    /// Extra settle after the form first renders, milliseconds.
    pub post_load_settle_ms: u64,
    /// Reveal-poll interval, milliseconds.
    pub reveal_poll_ms: u64,
    /// Maximum extra reveal-poll attempts after a commit.
    pub reveal_poll_attempts: u32,
    /// How long to wait for the form to render after navigation, ms.
    pub render_timeout_ms: u64,
    /// Per-command CDP timeout, milliseconds.
    pub command_timeout_ms: u64,
}

impl Default for FormProfile {
    fn default() -> Self {
        Self {
            start_url:
                "https://artificialintelligenceact.eu/assessment/eu-ai-act-compliance-checker/"
                    .to_string(),
            devtools_endpoint: "http://127.0.0.1:9222".to_string(),
            field_wrapper: "div.wsf-field-wrapper".to_string(),
            results_text_marker: "Your results".to_string(),
            results_input_selector: "input[type=\"email\"]".to_string(),
            data_dir: PathBuf::from("data"),
            settle_ms: 500,
            post_load_settle_ms: 1000,
            reveal_poll_ms: 200,
            reveal_poll_attempts: 20,
            render_timeout_ms: 10_000,
            command_timeout_ms: 30_000,
        }
    }
}

impl FormProfile {
    /// Parse a profile from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ExploreError> {
        toml::from_str(content).map_err(|e| ExploreError::Config(e.to_string()))
    }

    /// Serialize the profile to TOML.
    pub fn to_toml(&self) -> Result<String, ExploreError> {
        toml::to_string_pretty(self).map_err(|e| ExploreError::Config(e.to_string()))
    }

    /// Apply `FORMSCOUT_URL` / `FORMSCOUT_DATA_DIR` environment overrides.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("FORMSCOUT_URL") {
            if !url.is_empty() {
                self.start_url = url;
            }
        }
        if let Ok(dir) = std::env::var("FORMSCOUT_DATA_DIR") {
            if !dir.is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn post_load_settle(&self) -> Duration {
        Duration::from_millis(self.post_load_settle_ms)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    /// Walker tuning derived from this profile.
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            poll_interval: Duration::from_millis(self.reveal_poll_ms),
            poll_attempts: self.reveal_poll_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_compliance_checker() {
        let profile = FormProfile::default();
        assert!(profile.start_url.contains("compliance-checker"));
        assert_eq!(profile.field_wrapper, "div.wsf-field-wrapper");
        assert_eq!(profile.results_text_marker, "Your results");
        assert_eq!(profile.walk_options().poll_attempts, 20);
    }

    #[test]
    fn test_toml_round_trip() {
        let profile = FormProfile::default();
        let toml = profile.to_toml().unwrap();
        let parsed = FormProfile::from_toml(&toml).unwrap();
        assert_eq!(parsed.start_url, profile.start_url);
        assert_eq!(parsed.settle_ms, profile.settle_ms);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let profile = FormProfile::from_toml("start_url = \"https://example.org/form\"\n").unwrap();
        assert_eq!(profile.start_url, "https://example.org/form");
        assert_eq!(profile.reveal_poll_ms, 200);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(FormProfile::from_toml("settle_ms = \"soon\"").is_err());
    }
}
