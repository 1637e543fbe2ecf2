// context.rs — The immutable input to one evaluation.
//
// The host builds a fresh EvaluationContext for every message-sending
// attempt. Rules only ever borrow it.

use serde::{Deserialize, Serialize};

/// A single tool call recorded during the turn that produced the response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolInvocation {
    pub name: String,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Snapshot of one message-sending attempt.
///
/// Missing fields deserialize as empty, which rules treat as "no evidence".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationContext {
    /// The user request that triggered the turn.
    #[serde(default)]
    pub user_text: String,
    /// The candidate response about to be delivered.
    #[serde(default)]
    pub response_text: String,
    /// Tool invocations of the turn, in the order they happened.
    #[serde(default)]
    pub tool_invocations: Vec<ToolInvocation>,
    /// Whether the session speaks its responses aloud.
    #[serde(default)]
    pub audio_enabled: bool,
}

impl EvaluationContext {
    pub fn new(user_text: impl Into<String>, response_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            response_text: response_text.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper: record the given tool names as invocations.
    pub fn with_tools<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tool_invocations = names.into_iter().map(ToolInvocation::new).collect();
        self
    }

    /// Builder-style helper: set the audio flag.
    pub fn with_audio(mut self, enabled: bool) -> Self {
        self.audio_enabled = enabled;
        self
    }

    /// Length of the response in characters (Unicode scalar values).
    pub fn response_len(&self) -> usize {
        self.response_text.chars().count()
    }

    /// Tool names of the turn, in invocation order.
    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tool_invocations.iter().map(|t| t.name.as_str())
    }
}
