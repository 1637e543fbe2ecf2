// rule.rs — The PolicyRule trait and the four built-in rules.
//
// Every rule has the same two-stage shape:
//
// 1. Trigger: does this response fall under the rule at all?
//    (keyword in the user request, length limits, audio mode)
// 2. Evidence: if triggered, did the turn invoke the required tools?
//
// A rule that is not triggered returns NotTriggered without ever looking
// at the tool invocations.

use crate::config::CompiledConfig;
use crate::context::EvaluationContext;
use crate::evidence::has_any;

/// Priority shared by the built-in rules. Equal priorities keep
/// registration order, so the built-ins always run 1 → 4.
pub const BUILTIN_PRIORITY: i32 = 100;

pub const REPORT_BLOCK_MESSAGE: &str = "❌ VALIDATION FAILED: Report requests require:\n1. Write tool (create file)\n2. canvas tool (present it)\n3. Brief summary in response";
pub const DOCUMENTATION_BLOCK_MESSAGE: &str =
    "❌ VALIDATION FAILED: Documentation must use canvas for presentation";
pub const UNSTRUCTURED_BLOCK_MESSAGE: &str =
    "❌ VALIDATION FAILED: Long structured content should use canvas for better presentation";

/// What a single rule concluded about a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule does not apply to this response.
    NotTriggered,
    /// The rule applies and the required evidence is present.
    Satisfied,
    /// The rule applies and the evidence is missing. Delivery must be blocked.
    Violated { reason: String },
}

impl RuleOutcome {
    pub fn is_violation(&self) -> bool {
        matches!(self, RuleOutcome::Violated { .. })
    }
}

/// A single content policy.
///
/// Rules must be side-effect free and must not depend on each other.
/// `Send + Sync` lets one registry serve concurrent evaluations.
pub trait PolicyRule: Send + Sync {
    /// Stable identifier used in traces and logs.
    fn name(&self) -> &str;

    /// Higher runs earlier. Ties keep registration order.
    fn priority(&self) -> i32 {
        BUILTIN_PRIORITY
    }

    fn check(&self, ctx: &EvaluationContext, cfg: &CompiledConfig) -> RuleOutcome;
}

/// Rule 1: report requests must be written to a file and presented.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportEvidenceRule;

impl PolicyRule for ReportEvidenceRule {
    fn name(&self) -> &str {
        "report_evidence"
    }

    fn check(&self, ctx: &EvaluationContext, cfg: &CompiledConfig) -> RuleOutcome {
        if !cfg.report_triggers.matches(&ctx.user_text) {
            return RuleOutcome::NotTriggered;
        }
        let tools = &cfg.tools;
        let has_write = has_any(&ctx.tool_invocations, &tools.write, &tools.aliases);
        let has_present = has_any(&ctx.tool_invocations, &tools.present, &tools.aliases);
        if has_write && has_present {
            RuleOutcome::Satisfied
        } else {
            RuleOutcome::Violated {
                reason: REPORT_BLOCK_MESSAGE.to_string(),
            }
        }
    }
}

/// Rule 2: long answers to documentation requests must be presented, not inlined.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentationPresentationRule;

impl PolicyRule for DocumentationPresentationRule {
    fn name(&self) -> &str {
        "documentation_presentation"
    }

    fn check(&self, ctx: &EvaluationContext, cfg: &CompiledConfig) -> RuleOutcome {
        if !cfg.doc_triggers.matches(&ctx.user_text) || ctx.response_len() <= cfg.doc_min_length {
            return RuleOutcome::NotTriggered;
        }
        let tools = &cfg.tools;
        if has_any(&ctx.tool_invocations, &tools.present, &tools.aliases) {
            RuleOutcome::Satisfied
        } else {
            RuleOutcome::Violated {
                reason: DOCUMENTATION_BLOCK_MESSAGE.to_string(),
            }
        }
    }
}

/// Rule 3: in audio mode, long responses must go through a speech tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct AudioLengthRule;

impl PolicyRule for AudioLengthRule {
    fn name(&self) -> &str {
        "audio_length"
    }

    fn check(&self, ctx: &EvaluationContext, cfg: &CompiledConfig) -> RuleOutcome {
        if !ctx.audio_enabled {
            return RuleOutcome::NotTriggered;
        }
        let len = ctx.response_len();
        if len <= cfg.audio_max_length {
            return RuleOutcome::NotTriggered;
        }
        let tools = &cfg.tools;
        if has_any(&ctx.tool_invocations, &tools.speech, &tools.aliases) {
            RuleOutcome::Satisfied
        } else {
            RuleOutcome::Violated {
                reason: format!(
                    "❌ VALIDATION FAILED: Audio enabled - response is {} chars (max: {})\nMust use TTS tool or shorten response",
                    len, cfg.audio_max_length
                ),
            }
        }
    }
}

/// Rule 4: long, heavily sectioned responses should be presented.
///
/// Unlike the other rules the presentation tool is part of the trigger:
/// once it was invoked the rule does not apply, so it never reports Satisfied.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnstructuredResponseRule;

impl PolicyRule for UnstructuredResponseRule {
    fn name(&self) -> &str {
        "unstructured_long_response"
    }

    fn check(&self, ctx: &EvaluationContext, cfg: &CompiledConfig) -> RuleOutcome {
        if ctx.response_len() <= cfg.long_response_length {
            return RuleOutcome::NotTriggered;
        }
        let tools = &cfg.tools;
        if has_any(&ctx.tool_invocations, &tools.present, &tools.aliases) {
            return RuleOutcome::NotTriggered;
        }
        if count_headings(&ctx.response_text) > cfg.max_headings {
            RuleOutcome::Violated {
                reason: UNSTRUCTURED_BLOCK_MESSAGE.to_string(),
            }
        } else {
            RuleOutcome::NotTriggered
        }
    }
}

/// Count markdown heading lines: one or more `#` followed by whitespace.
///
/// A line holding only `#` characters is not a heading and is not counted.
pub fn count_headings(text: &str) -> usize {
    text.split('\n')
        .filter(|line| {
            let rest = line.trim_start_matches('#');
            rest.len() < line.len() && rest.starts_with(char::is_whitespace)
        })
        .count()
}
