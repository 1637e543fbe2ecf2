// bootstrap.rs — Canvas documentation notice for the agent bootstrap context.
//
// On agent:bootstrap the plugin appends CANVAS_ENFORCEMENT.md to the
// bootstrap file collection, telling the agent up front that documentation
// goes through the canvas tool. The keyword list uses the same vocabulary
// as the validator's docKeywords.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rv_policy::config::DEFAULT_DOC_KEYWORDS;

use crate::plugin::{plugin_config, HookPoint, HookRegistration};

pub const ENFORCEMENT_FILE_PATH: &str = "CANVAS_ENFORCEMENT.md";
const ENFORCEMENT_FILE_ROLE: &str = "workspace";

/// A file injected into the agent's bootstrap context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BootstrapFile {
    pub path: String,
    pub content: String,
    pub role: String,
}

/// The part of the bootstrap event context this plugin touches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapContext {
    /// `None` when the host did not provide a collection to append to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_files: Option<Vec<BootstrapFile>>,
}

/// A host lifecycle event (`type` / `action`) with its context.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BootstrapEvent {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub context: BootstrapContext,
}

impl BootstrapEvent {
    pub fn is_agent_bootstrap(&self) -> bool {
        self.kind == "agent" && self.action == "bootstrap"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasDocsConfig {
    #[serde(alias = "doc_keywords")]
    pub doc_keywords: Vec<String>,
}

impl Default for CanvasDocsConfig {
    fn default() -> Self {
        Self {
            doc_keywords: DEFAULT_DOC_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Appends the canvas enforcement document at agent bootstrap.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocsEnforcer {
    config: CanvasDocsConfig,
}

impl CanvasDocsEnforcer {
    pub const PLUGIN_ID: &'static str = "canvas-docs-enforcer";

    pub fn new(doc_keywords: Vec<String>) -> Self {
        Self {
            config: CanvasDocsConfig { doc_keywords },
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
            point: HookPoint::AgentBootstrap,
            priority: 0,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.config.doc_keywords
    }

    /// Handle a lifecycle event. Returns whether a file was appended.
    pub fn on_agent_bootstrap(&self, event: &mut BootstrapEvent) -> bool {
        if !event.is_agent_bootstrap() {
            return false;
        }
        let Some(files) = event.context.bootstrap_files.as_mut() else {
            return false;
        };
        files.push(BootstrapFile {
            path: ENFORCEMENT_FILE_PATH.to_string(),
            content: self.enforcement_document(),
            role: ENFORCEMENT_FILE_ROLE.to_string(),
        });
        tracing::debug!(plugin = Self::PLUGIN_ID, "appended {}", ENFORCEMENT_FILE_PATH);
        true
    }

    /// The markdown document injected into the bootstrap context.
    pub fn enforcement_document(&self) -> String {
        let keywords: Vec<String> = self
            .config
            .doc_keywords
            .iter()
            .map(|k| format!("- {}", k))
            .collect();

        format!(
            "## 📊 Canvas Documentation Enforcement

**MANDATORY RULE**: When creating documentation (guides, tutorials, references, specifications, etc.), you MUST use the `canvas` tool to present it.

**Keywords that trigger this rule:**
{}

**Do NOT:**
- Dump long markdown inline in your response
- Create multi-section documents as text

**DO:**
- Use `canvas` to present the documentation
- Use `canvas action=present` to show the rendered document
- Use `canvas action=snapshot` if the user wants to see it

**Example:**
```
canvas action=present url=data:text/html,...<your HTML here>
```

This ensures proper formatting, readability, and professional presentation.",
            keywords.join("\n")
        )
    }
}
