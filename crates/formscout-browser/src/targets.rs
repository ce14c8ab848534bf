//! DevTools page-target discovery over Chrome's HTTP endpoint.
//!
//! Chrome started with `--remote-debugging-port={port}` serves a JSON
//! target list at `http://{host}:{port}/json/list` and creates fresh tabs
//! via `/json/new`. We only ever attach to `page`-type targets.

use serde::Deserialize;

use crate::error::BrowserError;

/// One attachable target as reported by the DevTools HTTP endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PageTarget {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "webSocketDebuggerUrl", default)]
    pub ws_url: String,
}

impl PageTarget {
    /// True for ordinary page tabs (as opposed to service workers etc.).
    pub fn is_page(&self) -> bool {
        self.kind == "page" && !self.ws_url.is_empty()
    }
}

/// Pick the first attachable page target from a running browser.
pub async fn pick_page_target(endpoint: &str) -> Result<PageTarget, BrowserError> {
    let url = format!("{}/json/list", endpoint.trim_end_matches('/'));
    let targets: Vec<PageTarget> = reqwest::get(&url)
        .await
        .map_err(|e| BrowserError::DiscoveryFailed {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?
        .json()
        .await
        .map_err(|e| BrowserError::DiscoveryFailed {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

    targets
        .into_iter()
        .find(PageTarget::is_page)
        .ok_or_else(|| BrowserError::NoPageTarget {
            endpoint: endpoint.to_string(),
        })
}

/// Open a fresh tab and return its target.
///
/// Newer Chrome builds require PUT for `/json/new`.
pub async fn new_page_target(endpoint: &str, url: &str) -> Result<PageTarget, BrowserError> {
    let request_url = format!("{}/json/new?{}", endpoint.trim_end_matches('/'), url);
    let client = reqwest::Client::new();
    let target: PageTarget = client
        .put(&request_url)
        .send()
        .await
        .map_err(|e| BrowserError::DiscoveryFailed {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?
        .json()
        .await
        .map_err(|e| BrowserError::DiscoveryFailed {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

    if !target.is_page() {
        return Err(BrowserError::NoPageTarget {
            endpoint: endpoint.to_string(),
        });
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_list_deserializes() {
        let json = r#"[
            {
                "id": "T1",
                "type": "page",
                "title": "Compliance Checker",
                "url": "https://example.org/form",
                "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/page/T1"
            },
            {
                "id": "T2",
                "type": "service_worker",
                "url": "https://example.org/sw.js"
            }
        ]"#;
        let targets: Vec<PageTarget> = serde_json::from_str(json).unwrap();
        assert_eq!(targets.len(), 2);
        assert!(targets[0].is_page());
        assert!(!targets[1].is_page());
        assert_eq!(targets[0].ws_url, "ws://127.0.0.1:9222/devtools/page/T1");
    }

    #[test]
    fn test_page_without_ws_url_not_attachable() {
        let target = PageTarget {
            id: "T3".to_string(),
            kind: "page".to_string(),
            title: String::new(),
            url: String::new(),
            ws_url: String::new(),
        };
        assert!(!target.is_page());
    }
}
