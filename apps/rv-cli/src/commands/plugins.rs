// plugins.rs — Run the bootstrap and tool-result plugins from the command line.

use std::path::Path;

use anyhow::Context;
use rv_hooks::{CanvasDocsEnforcer, SummarizeSpeechEnforcer, ToolResult};
use rv_policy::PolicyConfig;

use super::read_json;

/// Print the bootstrap notice, listing the configured documentation keywords.
pub fn bootstrap(config: &PolicyConfig) {
    let enforcer = CanvasDocsEnforcer::new(config.doc_keywords.clone());
    println!("{}", enforcer.enforcement_document());
}

/// Print the tool result after the speech enforcer has run. Results for
/// tools other than `summarize` are printed unchanged.
pub fn tool_result(input: &Path, voice: Option<&str>) -> anyhow::Result<()> {
    let raw = read_json(input)?;
    let result: ToolResult =
        serde_json::from_value(raw).context("input is not a tool result object")?;
    let enforcer = match voice {
        Some(v) => SummarizeSpeechEnforcer::new(v),
        None => SummarizeSpeechEnforcer::default(),
    };
    let rewritten = enforcer.on_tool_result_persist(&result).unwrap_or(result);
    println!("{}", serde_json::to_string_pretty(&rewritten)?);
    Ok(())
}
