// tool_result.rs — Speech notice on persisted summarize results.
//
// When the `summarize` tool's result is persisted, the plugin appends a
// notice telling the agent to speak the summary with `sag` using the
// configured voice, quoting the summary so it can be passed through as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::plugin::{plugin_config, HookPoint, HookRegistration};

pub const SUMMARIZE_TOOL: &str = "summarize";
pub const DEFAULT_VOICE: &str = "cgSgspJ2msm6clMCkdW9";

/// A tool result as the host persists it. Unknown fields are carried through.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    #[serde(default)]
    pub tool_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizeConfig {
    /// Voice ID passed to the speech tool.
    pub voice: String,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            voice: DEFAULT_VOICE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SummarizeSpeechEnforcer {
    config: SummarizeConfig,
}

impl SummarizeSpeechEnforcer {
    pub const PLUGIN_ID: &'static str = "summarize-tts-enforcer";

    pub fn new(voice: impl Into<String>) -> Self {
        Self {
            config: SummarizeConfig {
                voice: voice.into(),
            },
        }
    }

    pub fn from_host_config(host_config: &Value) -> Self {
        Self {
            config: plugin_config(host_config, Self::PLUGIN_ID),
        }
    }

    pub fn registration() -> HookRegistration {
        HookRegistration {
            plugin_id: Self::PLUGIN_ID.to_string(),
            point: HookPoint::ToolResultPersist,
            priority: 0,
        }
    }

    pub fn voice(&self) -> &str {
        &self.config.voice
    }

    /// Returns the rewritten result for `summarize`, `None` for any other tool.
    pub fn on_tool_result_persist(&self, result: &ToolResult) -> Option<ToolResult> {
        if result.tool_name != SUMMARIZE_TOOL {
            return None;
        }
        let original = result.output.as_deref().unwrap_or_default();
        let output = format!(
            "{original}\n\n⚠️  ENFORCEMENT: You MUST use the `sag` tool to speak this summary using voice ID \"{voice}\".\nDo NOT dump the summary as text. Use: sag \"{quoted}\"",
            voice = self.config.voice,
            quoted = original.replace('"', "\\\""),
        );
        tracing::debug!(plugin = Self::PLUGIN_ID, "added speech notice to summarize result");
        Some(ToolResult {
            output: Some(output),
            ..result.clone()
        })
    }
}
