// validator.rs — The message_sending hook.
//
// Registered at high priority so it runs before the message is actually
// transmitted. Each call normalizes the host payload, evaluates it with the
// engine built at construction time, and answers {cancel, error}.

use serde_json::Value;

use rv_policy::{EvaluationContext, PolicyConfig, PolicyEngine, Verdict};

use crate::event::{normalize, HookOutcome};
use crate::plugin::{plugin_config, HookPoint, HookRegistration};

/// Blocks agent responses that break the configured content policies.
#[derive(Debug, Default)]
pub struct ResponseValidator {
    engine: PolicyEngine,
}

impl ResponseValidator {
    pub const PLUGIN_ID: &'static str = "response-validator";
    pub const PRIORITY: i32 = 100;

    pub fn new(config: &PolicyConfig) -> Self {
        Self::with_engine(PolicyEngine::new(config))
    }

    pub fn with_engine(engine: PolicyEngine) -> Self {
        Self { engine }
    }

    /// Build from the host config (`plugins.entries.response-validator.config`).
    pub fn from_host_config(host_config: &Value) -> Self {
        let config: PolicyConfig = plugin_config(host_config, Self::PLUGIN_ID);
        Self::new(&config)
    }

    pub fn registration() -> HookRegistration {
        HookRegistration {
            plugin_id: Self::PLUGIN_ID.to_string(),
            point: HookPoint::MessageSending,
            priority: Self::PRIORITY,
        }
    }

    pub fn engine(&self) -> &PolicyEngine {
        &self.engine
    }

    /// Handle a `message_sending` event.
    pub fn on_message_sending(&self, event: &Value, turn: &Value) -> HookOutcome {
        let ctx = normalize(event, turn);
        self.check(&ctx).into()
    }

    /// Evaluate an already-normalized context, logging blocks.
    pub fn check(&self, ctx: &EvaluationContext) -> Verdict {
        let trace = self.engine.evaluate_with_trace(ctx);

        match trace.steps.iter().find(|s| s.terminal) {
            Some(step) if trace.verdict.is_blocked() => {
                let preview: String = ctx.user_text.chars().take(100).collect();
                let tools: Vec<&str> = ctx.tool_names().collect();
                tracing::warn!(
                    plugin = Self::PLUGIN_ID,
                    rule = %step.rule,
                    response_len = ctx.response_len(),
                    "BLOCKED: {}",
                    trace.verdict.reason().unwrap_or_default()
                );
                tracing::warn!("  User message: {}...", preview);
                tracing::warn!("  Tool calls: {}", tools.join(", "));
            }
            _ => {
                tracing::debug!(plugin = Self::PLUGIN_ID, "response allowed");
            }
        }

        trace.verdict
    }
}
