pub mod check;
pub mod config;
pub mod plugins;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

/// Read a JSON document from a file, or from stdin when `path` is `-`.
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}
