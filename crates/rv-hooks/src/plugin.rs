// plugin.rs — Hook registration descriptors and host plugin config lookup.
//
// The host registers plugin handlers per hook point with a priority;
// higher priorities run earlier. Plugin config lives in the host config
// under `plugins.entries.<plugin-id>.config`.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bootstrap::CanvasDocsEnforcer;
use crate::tool_result::SummarizeSpeechEnforcer;
use crate::validator::ResponseValidator;

/// Host lifecycle points the plugins attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookPoint {
    /// Before an agent response is transmitted. Handlers may cancel it.
    #[serde(rename = "message_sending")]
    MessageSending,
    /// While the agent's bootstrap context is assembled.
    #[serde(rename = "agent:bootstrap")]
    AgentBootstrap,
    /// Before a tool result is persisted to the transcript.
    #[serde(rename = "tool_result_persist")]
    ToolResultPersist,
}

impl HookPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookPoint::MessageSending => "message_sending",
            HookPoint::AgentBootstrap => "agent:bootstrap",
            HookPoint::ToolResultPersist => "tool_result_persist",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a plugin asks the host to wire it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookRegistration {
    pub plugin_id: String,
    pub point: HookPoint,
    pub priority: i32,
}

/// Registrations for every plugin in this crate, highest priority first.
pub fn registrations() -> Vec<HookRegistration> {
    vec![
        ResponseValidator::registration(),
        CanvasDocsEnforcer::registration(),
        SummarizeSpeechEnforcer::registration(),
    ]
}

/// Read `plugins.entries.<plugin_id>.config` from the host config.
///
/// Fields are taken one at a time: a `null` or wrong-typed field is treated
/// as absent and falls back to its default, while the other fields keep
/// their configured values. Falls back to `T::default()` when the entry is
/// missing or is not an object.
pub fn plugin_config<T>(host_config: &Value, plugin_id: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = host_config
        .get("plugins")
        .and_then(|p| p.get("entries"))
        .and_then(|e| e.get(plugin_id))
        .and_then(|entry| entry.get("config"))
    else {
        return T::default();
    };
    let Some(fields) = raw.as_object() else {
        tracing::warn!(plugin = plugin_id, "plugin config is not an object, using defaults");
        return T::default();
    };

    // Accept each field only if the config still parses with it added.
    let mut accepted = Map::new();
    for (key, value) in fields {
        if value.is_null() {
            continue;
        }
        accepted.insert(key.clone(), value.clone());
        if let Err(e) = T::deserialize(&Value::Object(accepted.clone())) {
            tracing::warn!(plugin = plugin_id, field = %key, "ignoring invalid config field: {}", e);
            accepted.remove(key);
        }
    }

    T::deserialize(&Value::Object(accepted)).unwrap_or_default()
}

/// All three plugins, configured from one host config object.
#[derive(Debug)]
pub struct PluginSet {
    pub validator: ResponseValidator,
    pub canvas_docs: CanvasDocsEnforcer,
    pub summarize: SummarizeSpeechEnforcer,
}

impl PluginSet {
    pub fn from_host_config(host_config: &Value) -> Self {
        Self {
            validator: ResponseValidator::from_host_config(host_config),
            canvas_docs: CanvasDocsEnforcer::from_host_config(host_config),
            summarize: SummarizeSpeechEnforcer::from_host_config(host_config),
        }
    }
}
