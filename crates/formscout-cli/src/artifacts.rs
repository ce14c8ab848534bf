//! Artifact persistence: JSON and text files under the data directory.
//!
//! Intermediate directories are created as needed. Writes are
//! overwrite-or-fail; a failed write never leaves a truncated file in place
//! because the content is rendered fully before the file is touched.

use std::fs;
use std::path::Path;

use serde::Serialize;

/// Serialize `data` as pretty JSON and write it to `path`.
pub fn save_json<T: Serialize>(data: &T, path: &Path) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(data)?;
    save_text(&content, path)
}

/// Write raw text to `path`, creating parent directories first.
pub fn save_text(content: &str, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
