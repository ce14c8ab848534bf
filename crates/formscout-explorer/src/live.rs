//! The CDP-backed live form session.
//!
//! [`LiveForm`] owns one [`PageDriver`] for the lifetime of a traversal.
//! Resetting navigates back to the start URL, waits for the load event, and
//! then polls for the field wrappers to render; commits click real inputs
//! and sleep the settle interval so the form's conditional logic can run.

use async_trait::async_trait;

use formscout_browser::driver::js_quote;
use formscout_browser::{new_page_target, pick_page_target, BrowserError, PageDriver};

use crate::error::ExploreError;
use crate::model::{FieldOption, InputKind, Question};
use crate::profile::FormProfile;
use crate::session::FormSession;

/// Live form session over a real browser page.
pub struct LiveForm {
    driver: PageDriver,
    profile: FormProfile,
}

impl LiveForm {
    /// Attach to a running browser via its DevTools endpoint, reusing the
    /// first page tab or opening a fresh one if none exists.
    pub async fn attach(profile: FormProfile) -> Result<Self, ExploreError> {
        let target = match pick_page_target(&profile.devtools_endpoint).await {
            Ok(target) => target,
            Err(BrowserError::NoPageTarget { .. }) => {
                new_page_target(&profile.devtools_endpoint, "about:blank").await?
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!(target = %target.id, url = %target.url, "attached to page target");
        let driver = PageDriver::connect(&target.ws_url, profile.command_timeout()).await?;
        Ok(Self { driver, profile })
    }

    pub fn profile(&self) -> &FormProfile {
        &self.profile
    }

    async fn settle(&self) {
        tokio::time::sleep(self.profile.settle()).await;
    }

    /// Values of all inputs of one kind inside a wrapper, in DOM order.
    async fn option_values(
        &self,
        wrapper: &str,
        input_type: &str,
    ) -> Result<Vec<String>, ExploreError> {
        let expr = format!(
            "Array.from(document.querySelectorAll({})).map(i => i.value)",
            js_quote(&format!("{wrapper} input[type=\"{input_type}\"]"))
        );
        let value = self.driver.evaluate(&expr).await?;
        Ok(value
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl FormSession for LiveForm {
    async fn reset(&mut self) -> Result<(), ExploreError> {
        self.driver.navigate(&self.profile.start_url).await?;
        self.driver.wait_for_load(self.profile.render_timeout()).await?;
        // The wrappers render from JS after the load event; poll for them too.
        self.driver
            .wait_for(
                &self.profile.field_wrapper,
                self.profile.render_timeout(),
                self.profile.walk_options().poll_interval,
            )
            .await?;
        tokio::time::sleep(self.profile.post_load_settle()).await;
        Ok(())
    }

    async fn visible_questions(&mut self) -> Result<Vec<Question>, ExploreError> {
        let ids = self.driver.element_ids(&self.profile.field_wrapper).await?;
        let mut questions = Vec::new();

        for id in ids.into_iter().filter(|id| !id.is_empty()) {
            let wrapper = wrapper_selector(&id);
            if !self.driver.is_visible(&wrapper).await? {
                continue;
            }

            let h4 = self.driver.inner_text(&format!("{wrapper} h4")).await?;
            let p = self.driver.inner_text(&format!("{wrapper} p")).await?;
            let label = self.driver.inner_text(&format!("{wrapper} label")).await?;
            let prompt = assemble_prompt(h4.as_deref(), p.as_deref(), label.as_deref());

            let mut options = Vec::new();
            for value in self.option_values(&wrapper, "radio").await? {
                options.push(FieldOption {
                    value,
                    kind: InputKind::Radio,
                });
            }
            for value in self.option_values(&wrapper, "checkbox").await? {
                options.push(FieldOption {
                    value,
                    kind: InputKind::Checkbox,
                });
            }

            questions.push(Question {
                id,
                prompt,
                options,
            });
        }
        Ok(questions)
    }

    async fn commit(&mut self, field: &str, option: &FieldOption) -> Result<(), ExploreError> {
        let selector = option_selector(field, &option.value);
        match option.kind {
            InputKind::Radio => self.driver.click(&selector).await?,
            InputKind::Checkbox => {
                if !self.driver.is_checked(&selector).await? {
                    self.driver.click(&selector).await?;
                }
            }
        }
        self.settle().await;
        Ok(())
    }

    async fn clear(&mut self, field: &str, option: &FieldOption) -> Result<(), ExploreError> {
        let selector = option_selector(field, &option.value);
        if self.driver.is_checked(&selector).await? {
            self.driver.click(&selector).await?;
            self.settle().await;
        }
        Ok(())
    }

    async fn results_surface(&mut self) -> Result<bool, ExploreError> {
        if self.driver.exists(&self.profile.results_input_selector).await? {
            return Ok(true);
        }
        let text = self.driver.page_text().await?;
        Ok(text.contains(&self.profile.results_text_marker))
    }

    async fn page_html(&mut self) -> Result<String, ExploreError> {
        Ok(self.driver.page_html().await?)
    }
}

/// CSS selector for a question wrapper by its id attribute.
fn wrapper_selector(id: &str) -> String {
    format!("[id={}]", js_quote(id))
}

/// CSS selector for one option input inside a wrapper.
fn option_selector(field: &str, value: &str) -> String {
    format!("{} input[value={}]", wrapper_selector(field), js_quote(value))
}

/// Question prompt: heading plus description, falling back to the label.
fn assemble_prompt(h4: Option<&str>, p: Option<&str>, label: Option<&str>) -> String {
    let mut prompt = String::new();
    if let Some(h4) = h4 {
        prompt.push_str(h4.trim());
        prompt.push(' ');
    }
    if let Some(p) = p {
        prompt.push_str(p.trim());
        prompt.push(' ');
    }
    let prompt = prompt.trim().to_string();
    if prompt.is_empty() {
        return label.map(|l| l.trim().to_string()).unwrap_or_default();
    }
    prompt
}
