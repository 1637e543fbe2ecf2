// event.rs — Host event normalization and hook outcome.
//
// The host's message_sending payloads name the same field several ways:
//
//   response text   event.content.text | event.text
//   user request    turn.triggeringMessage.text | turn.originalMessage.text
//   tool calls      turn.toolCalls[*].name | .tool | .toolName
//   audio mode      turn.session.audioEnabled | turn.audioEnabled
//
// normalize() resolves every alias here, once, so rules only ever see a
// canonical EvaluationContext. Missing or wrong-typed fields become empty
// values; normalization cannot fail.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use rv_policy::{EvaluationContext, ToolInvocation, Verdict};

const RESPONSE_TEXT: &[&str] = &["/content/text", "/text"];
const USER_TEXT: &[&str] = &["/triggeringMessage/text", "/originalMessage/text"];
const AUDIO_FLAG: &[&str] = &["/session/audioEnabled", "/audioEnabled"];
const TOOL_NAME_KEYS: &[&str] = &["name", "tool", "toolName"];

/// Build the canonical evaluation context from a host event and turn context.
pub fn normalize(event: &Value, turn: &Value) -> EvaluationContext {
    let tool_invocations = turn
        .get("toolCalls")
        .and_then(Value::as_array)
        .map(|calls| {
            calls
                .iter()
                .filter_map(|call| {
                    TOOL_NAME_KEYS
                        .iter()
                        .filter_map(|key| call.get(*key).and_then(Value::as_str))
                        .find(|name| !name.is_empty())
                        .map(ToolInvocation::new)
                })
                .collect()
        })
        .unwrap_or_default();

    EvaluationContext {
        user_text: first_text(turn, USER_TEXT).to_string(),
        response_text: first_text(event, RESPONSE_TEXT).to_string(),
        tool_invocations,
        audio_enabled: AUDIO_FLAG
            .iter()
            .any(|p| turn.pointer(p).and_then(Value::as_bool) == Some(true)),
    }
}

/// First non-empty string found at any of `pointers`, or "".
fn first_text<'a>(value: &'a Value, pointers: &[&str]) -> &'a str {
    pointers
        .iter()
        .filter_map(|p| value.pointer(p).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

/// What the hook answers to the host.
///
/// `cancel = true` means the host must not deliver the response and should
/// surface `error` as the reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HookOutcome {
    pub cancel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HookOutcome {
    pub fn allow() -> Self {
        Self::default()
    }

    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            cancel: true,
            error: Some(reason.into()),
        }
    }
}

impl From<Verdict> for HookOutcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Allow => Self::allow(),
            Verdict::Block { reason } => Self::block(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_primary_field_names() {
        let event = json!({ "content": { "text": "the response" } });
        let turn = json!({
            "triggeringMessage": { "text": "the request" },
            "toolCalls": [{ "name": "Write" }, { "name": "canvas" }],
            "session": { "audioEnabled": true }
        });
        let ctx = normalize(&event, &turn);
        assert_eq!(ctx.response_text, "the response");
        assert_eq!(ctx.user_text, "the request");
        assert_eq!(ctx.tool_names().collect::<Vec<_>>(), vec!["Write", "canvas"]);
        assert!(ctx.audio_enabled);
    }

    #[test]
    fn reads_alternative_field_names() {
        let event = json!({ "text": "flat response" });
        let turn = json!({
            "originalMessage": { "text": "original request" },
            "toolCalls": [{ "tool": "tts" }, { "toolName": "sag" }],
            "audioEnabled": true
        });
        let ctx = normalize(&event, &turn);
        assert_eq!(ctx.response_text, "flat response");
        assert_eq!(ctx.user_text, "original request");
        assert_eq!(ctx.tool_names().collect::<Vec<_>>(), vec!["tts", "sag"]);
        assert!(ctx.audio_enabled);
    }

    #[test]
    fn empty_primary_falls_through_to_alias() {
        let event = json!({ "content": { "text": "" }, "text": "fallback" });
        let turn = json!({
            "triggeringMessage": { "text": "" },
            "originalMessage": { "text": "from original" },
            "toolCalls": [{ "name": "", "tool": "canvas" }]
        });
        let ctx = normalize(&event, &turn);
        assert_eq!(ctx.response_text, "fallback");
        assert_eq!(ctx.user_text, "from original");
        assert_eq!(ctx.tool_names().collect::<Vec<_>>(), vec!["canvas"]);
    }

    #[test]
    fn missing_and_malformed_fields_are_empty() {
        let ctx = normalize(&json!(null), &json!({}));
        assert_eq!(ctx, EvaluationContext::default());

        let event = json!({ "content": { "text": 42 } });
        let turn = json!({
            "triggeringMessage": "not an object",
            "toolCalls": { "name": "canvas" },
            "session": { "audioEnabled": "yes" }
        });
        let ctx = normalize(&event, &turn);
        assert_eq!(ctx, EvaluationContext::default());
    }

    #[test]
    fn tool_calls_without_names_are_dropped() {
        let turn = json!({ "toolCalls": [{ "args": {} }, "canvas", { "name": 3 }, { "name": "read" }] });
        let ctx = normalize(&json!({}), &turn);
        assert_eq!(ctx.tool_names().collect::<Vec<_>>(), vec!["read"]);
    }

    #[test]
    fn audio_false_in_session_but_true_at_top_level() {
        let turn = json!({ "session": { "audioEnabled": false }, "audioEnabled": true });
        assert!(normalize(&json!({}), &turn).audio_enabled);
    }

    #[test]
    fn outcome_serialization() {
        assert_eq!(
            serde_json::to_value(HookOutcome::allow()).unwrap(),
            json!({ "cancel": false })
        );
        assert_eq!(
            serde_json::to_value(HookOutcome::from(Verdict::Block {
                reason: "no".to_string()
            }))
            .unwrap(),
            json!({ "cancel": true, "error": "no" })
        );
    }
}
