//! High-level page driver for form traversal.
//!
//! [`PageDriver`] wraps the CDP client with the operations the explorer
//! needs: navigation with load-wait, JavaScript evaluation, selector-based
//! element reads (visibility, inner text, checked state), and
//! clicking through real synthesized mouse events at the element's box-model
//! center, which is what actually triggers the form's conditional logic.
//!
//! Elements are always addressed by CSS selector; the driver resolves them
//! fresh on every call because the page re-renders between interactions.

use std::time::Duration;

use serde_json::Value;

use crate::cdp::CdpClient;
use crate::error::BrowserError;

/// High-level driver over one DevTools page target.
pub struct PageDriver {
    client: CdpClient,
}

impl PageDriver {
    /// Connect to a page target and enable the Page, DOM, and Runtime
    /// domains.
    pub async fn connect(ws_url: &str, command_timeout: Duration) -> Result<Self, BrowserError> {
        let client = CdpClient::connect(ws_url, command_timeout).await?;
        client.enable("Page").await?;
        client.enable("DOM").await?;
        client.enable("Runtime").await?;
        Ok(Self { client })
    }

    // -- Navigation ---------------------------------------------------------

    /// Navigate to a URL. Browser-reported failures (e.g.
    /// `net::ERR_NAME_NOT_RESOLVED`) surface as `NavigationFailed`.
    pub async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let result = self
            .client
            .send("Page.navigate", serde_json::json!({ "url": url }))
            .await?;
        if let Some(reason) = result.get("errorText").and_then(|v| v.as_str()) {
            return Err(BrowserError::NavigationFailed {
                reason: reason.to_string(),
            });
        }
        Ok(())
    }

    /// Wait for `Page.loadEventFired` after a navigation.
    pub async fn wait_for_load(&self, timeout: Duration) -> Result<(), BrowserError> {
        self.client.wait_for_event("Page.loadEventFired", timeout).await?;
        Ok(())
    }

    /// Poll until at least one element matches `selector`, or time out.
    pub async fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
        poll: Duration,
    ) -> Result<(), BrowserError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.exists(selector).await? {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(BrowserError::ElementNotFound {
                    selector: selector.to_string(),
                });
            }
            tokio::time::sleep(poll).await;
        }
    }

    // -- JavaScript evaluation ----------------------------------------------

    /// Evaluate a JavaScript expression in page context, returning its value.
    ///
    /// Page-side exceptions surface as `JsException`.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, BrowserError> {
        let result = self
            .client
            .send(
                "Runtime.evaluate",
                serde_json::json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                }),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let message = exception
                .get("exception")
                .and_then(|e| e.get("description"))
                .and_then(|d| d.as_str())
                .or_else(|| exception.get("text").and_then(|t| t.as_str()))
                .unwrap_or("unknown exception")
                .to_string();
            return Err(BrowserError::JsException { message });
        }

        Ok(result
            .get("result")
            .and_then(|r| r.get("value"))
            .cloned()
            .unwrap_or(Value::Null))
    }

    // -- Element reads ------------------------------------------------------

    /// Whether any element matches `selector`.
    pub async fn exists(&self, selector: &str) -> Result<bool, BrowserError> {
        let expr = format!("document.querySelector({}) !== null", js_quote(selector));
        Ok(self.evaluate(&expr).await?.as_bool().unwrap_or(false))
    }

    /// Whether the first match for `selector` is rendered visible.
    ///
    /// An element counts as visible when it participates in layout
    /// (`offsetParent` set, or fixed-position with a nonempty client rect).
    pub async fn is_visible(&self, selector: &str) -> Result<bool, BrowserError> {
        let expr = format!(
            "(() => {{ const el = document.querySelector({}); if (!el) return false; \
             if (el.offsetParent !== null) return true; \
             const r = el.getClientRects(); \
             return getComputedStyle(el).position === 'fixed' && r.length > 0; }})()",
            js_quote(selector)
        );
        Ok(self.evaluate(&expr).await?.as_bool().unwrap_or(false))
    }

    /// Inner text of the first match, `None` if the element is missing.
    pub async fn inner_text(&self, selector: &str) -> Result<Option<String>, BrowserError> {
        let expr = format!("document.querySelector({})?.innerText ?? null", js_quote(selector));
        Ok(self.evaluate(&expr).await?.as_str().map(str::to_string))
    }

    /// Checked state of the first match (false for missing elements).
    pub async fn is_checked(&self, selector: &str) -> Result<bool, BrowserError> {
        let expr = format!("document.querySelector({})?.checked === true", js_quote(selector));
        Ok(self.evaluate(&expr).await?.as_bool().unwrap_or(false))
    }

    /// `id` attributes of every element matching `selector`, in DOM order.
    /// Elements without an id contribute an empty string.
    pub async fn element_ids(&self, selector: &str) -> Result<Vec<String>, BrowserError> {
        let expr = format!(
            "Array.from(document.querySelectorAll({})).map(el => el.id)",
            js_quote(selector)
        );
        let value = self.evaluate(&expr).await?;
        Ok(value
            .as_array()
            .map(|arr| {
                arr.iter()
                    .map(|v| v.as_str().unwrap_or("").to_string())
                    .collect()
            })
            .unwrap_or_default())
    }

    // -- Interaction --------------------------------------------------------

    /// Click the first element matching `selector` with synthesized mouse
    /// events at its box-model center.
    pub async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        let node_id = self.resolve_node(selector).await?;
        let (cx, cy) = self.node_center(node_id).await?;
        for phase in ["mousePressed", "mouseReleased"] {
            self.client
                .send(
                    "Input.dispatchMouseEvent",
                    serde_json::json!({
                        "type": phase,
                        "x": cx,
                        "y": cy,
                        "button": "left",
                        "clickCount": 1,
                    }),
                )
                .await?;
        }
        Ok(())
    }

    async fn resolve_node(&self, selector: &str) -> Result<i64, BrowserError> {
        let root = self
            .client
            .send("DOM.getDocument", serde_json::json!({}))
            .await?;
        let root_id = root
            .get("root")
            .and_then(|r| r.get("nodeId"))
            .and_then(|n| n.as_i64())
            .ok_or_else(|| BrowserError::Protocol {
                detail: "DOM.getDocument returned no root nodeId".to_string(),
            })?;

        let result = self
            .client
            .send(
                "DOM.querySelector",
                serde_json::json!({ "nodeId": root_id, "selector": selector }),
            )
            .await?;
        match result.get("nodeId").and_then(|n| n.as_i64()) {
            Some(id) if id != 0 => Ok(id),
            _ => Err(BrowserError::ElementNotFound {
                selector: selector.to_string(),
            }),
        }
    }

    async fn node_center(&self, node_id: i64) -> Result<(f64, f64), BrowserError> {
        let result = self
            .client
            .send("DOM.getBoxModel", serde_json::json!({ "nodeId": node_id }))
            .await?;
        let quad: Vec<f64> = result
            .get("model")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_f64()).collect())
            .unwrap_or_default();
        quad_center(&quad).ok_or_else(|| BrowserError::NotClickable {
            reason: format!("box model returned a degenerate quad ({} values)", quad.len()),
        })
    }

    // -- Page content -------------------------------------------------------

    /// Full rendered HTML of the page.
    pub async fn page_html(&self) -> Result<String, BrowserError> {
        let value = self.evaluate("document.documentElement.outerHTML").await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| BrowserError::Protocol {
                detail: "outerHTML did not return a string".to_string(),
            })
    }

    /// Full rendered text content (used for completion-marker search).
    pub async fn page_text(&self) -> Result<String, BrowserError> {
        let value = self.evaluate("document.body ? document.body.innerText : ''").await?;
        Ok(value.as_str().unwrap_or("").to_string())
    }
}

/// Quote a string as a JavaScript string literal.
pub fn js_quote(s: &str) -> String {
    // JSON string syntax is valid JS string syntax.
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Center of a CDP content quad (`[x1,y1, x2,y2, x3,y3, x4,y4]`).
///
/// Returns `None` for quads with fewer than 8 values or zero area.
pub fn quad_center(quad: &[f64]) -> Option<(f64, f64)> {
    if quad.len() < 8 {
        return None;
    }
    let xs: Vec<f64> = quad.iter().step_by(2).copied().collect();
    let ys: Vec<f64> = quad.iter().skip(1).step_by(2).copied().collect();
    let min_x = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min_y = ys.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_y = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max_x - min_x <= 0.0 || max_y - min_y <= 0.0 {
        return None;
    }
    Some(((min_x + max_x) / 2.0, (min_y + max_y) / 2.0))
}
