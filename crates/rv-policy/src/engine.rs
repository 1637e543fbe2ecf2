// engine.rs — Verdict engine.
//
// The PolicyEngine runs every registered rule, in registry order, against
// one EvaluationContext:
//
// 1. Rule not triggered → skip it
// 2. Rule triggered and evidence present → continue
// 3. Rule triggered and evidence missing → Block, stop immediately
// 4. No rule blocked → Allow
//
// Evaluation holds no mutable state. The engine can be shared across
// threads and the same inputs always produce the same verdict.

use serde::{Deserialize, Serialize};

use crate::config::{CompiledConfig, PolicyConfig};
use crate::context::EvaluationContext;
use crate::registry::PolicyRegistry;
use crate::rule::RuleOutcome;

/// The outcome of evaluating one candidate response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Deliver the response.
    Allow,
    /// Do not deliver; `reason` tells the agent what to fix.
    Block { reason: String },
}

impl Verdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Verdict::Block { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Allow => None,
            Verdict::Block { reason } => Some(reason.as_str()),
        }
    }
}

/// One rule consulted during evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationStep {
    /// Which rule ran (e.g., "report_evidence").
    pub rule: String,
    /// "not_triggered", "satisfied", or "violated".
    pub outcome: String,
    /// Whether this step decided the verdict.
    pub terminal: bool,
}

/// Verdict plus the rules that were consulted to reach it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationTrace {
    pub verdict: Verdict,
    pub steps: Vec<EvaluationStep>,
}

/// Runs the rule registry against evaluation contexts.
#[derive(Debug)]
pub struct PolicyEngine {
    config: CompiledConfig,
    registry: PolicyRegistry,
}

impl PolicyEngine {
    /// Engine with the built-in rules.
    pub fn new(config: &PolicyConfig) -> Self {
        Self::with_registry(config, PolicyRegistry::builtin())
    }

    /// Engine with a caller-supplied rule set.
    pub fn with_registry(config: &PolicyConfig, registry: PolicyRegistry) -> Self {
        Self {
            config: config.compile(),
            registry,
        }
    }

    pub fn config(&self) -> &CompiledConfig {
        &self.config
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Evaluate a candidate response. Returns the first Block, otherwise Allow.
    pub fn evaluate(&self, ctx: &EvaluationContext) -> Verdict {
        for rule in self.registry.rules() {
            if let RuleOutcome::Violated { reason } = rule.check(ctx, &self.config) {
                tracing::debug!(rule = rule.name(), "response blocked");
                return Verdict::Block { reason };
            }
        }
        Verdict::Allow
    }

    /// Same as `evaluate()` but records every rule consulted.
    pub fn evaluate_with_trace(&self, ctx: &EvaluationContext) -> EvaluationTrace {
        let mut steps = Vec::new();

        for rule in self.registry.rules() {
            let outcome = rule.check(ctx, &self.config);
            let label = match &outcome {
                RuleOutcome::NotTriggered => "not_triggered",
                RuleOutcome::Satisfied => "satisfied",
                RuleOutcome::Violated { .. } => "violated",
            };
            let terminal = outcome.is_violation();
            steps.push(EvaluationStep {
                rule: rule.name().to_string(),
                outcome: label.to_string(),
                terminal,
            });
            if let RuleOutcome::Violated { reason } = outcome {
                return EvaluationTrace {
                    verdict: Verdict::Block { reason },
                    steps,
                };
            }
        }

        EvaluationTrace {
            verdict: Verdict::Allow,
            steps,
        }
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new(&PolicyConfig::default())
    }
}

/// One-off evaluation with the built-in rules.
///
/// Compiles `cfg` on every call; hosts evaluating repeatedly should keep a
/// `PolicyEngine` instead.
pub fn evaluate(ctx: &EvaluationContext, cfg: &PolicyConfig) -> Verdict {
    PolicyEngine::new(cfg).evaluate(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{PolicyRule, DOCUMENTATION_BLOCK_MESSAGE, REPORT_BLOCK_MESSAGE};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sectioned(headings: usize, len: usize) -> String {
        let mut text = String::new();
        for i in 0..headings {
            text.push_str(&format!("# Heading {}\n", i));
        }
        while text.chars().count() < len {
            text.push_str("lorem ipsum dolor sit amet\n");
        }
        text
    }

    /// Rule that counts how often it is consulted.
    struct Counting {
        calls: Arc<AtomicUsize>,
        priority: i32,
    }

    impl PolicyRule for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn check(&self, _ctx: &EvaluationContext, _cfg: &CompiledConfig) -> RuleOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            RuleOutcome::NotTriggered
        }
    }

    #[test]
    fn allow_plain_response() {
        let engine = PolicyEngine::default();
        let ctx = EvaluationContext::new("hello", "hi there");
        assert_eq!(engine.evaluate(&ctx), Verdict::Allow);
    }

    #[test]
    fn scenario_a_report_without_tools_blocks() {
        let engine = PolicyEngine::default();
        let ctx = EvaluationContext::new("Please write up a report on Q3 sales", "Here it is.");
        let verdict = engine.evaluate(&ctx);
        assert_eq!(
            verdict,
            Verdict::Block {
                reason: REPORT_BLOCK_MESSAGE.to_string()
            }
        );
        let reason = verdict.reason().unwrap();
        assert!(reason.contains("Write tool"));
        assert!(reason.contains("canvas tool"));
    }

    #[test]
    fn scenario_b_report_with_tools_allows() {
        let engine = PolicyEngine::default();
        let ctx = EvaluationContext::new("Please write up a report on Q3 sales", "Saved and shown.")
            .with_tools(["Write", "canvas"]);
        assert_eq!(engine.evaluate(&ctx), Verdict::Allow);
    }

    #[test]
    fn scenario_c_long_tutorial_blocks() {
        let engine = PolicyEngine::default();
        let ctx = EvaluationContext::new("give me a tutorial", "t".repeat(600));
        assert_eq!(
            engine.evaluate(&ctx),
            Verdict::Block {
                reason: DOCUMENTATION_BLOCK_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn scenario_d_audio_too_long_blocks_with_lengths() {
        let engine = PolicyEngine::default();
        let ctx = EvaluationContext::new("hey", "a".repeat(350)).with_audio(true);
        let verdict = engine.evaluate(&ctx);
        let reason = verdict.reason().expect("expected a block");
        assert!(reason.contains("350"));
        assert!(reason.contains("300"));
    }

    #[test]
    fn scenario_e_structured_response_needs_presentation() {
        let engine = PolicyEngine::default();
        let text = sectioned(5, 1200);
        let ctx = EvaluationContext::new("hey", text.clone());
        assert!(engine.evaluate(&ctx).is_blocked());

        let presented = EvaluationContext::new("hey", text).with_tools(["canvas"]);
        assert_eq!(engine.evaluate(&presented), Verdict::Allow);
    }

    #[test]
    fn first_blocking_rule_wins() {
        // Both rule 1 (report) and rule 3 (audio) would block.
        let engine = PolicyEngine::default();
        let ctx = EvaluationContext::new("create a report", "a".repeat(400)).with_audio(true);
        assert_eq!(
            engine.evaluate(&ctx),
            Verdict::Block {
                reason: REPORT_BLOCK_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn later_rules_not_consulted_after_block() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = PolicyRegistry::builtin();
        registry.register(Counting {
            calls: Arc::clone(&calls),
            priority: 0,
        });
        let engine = PolicyEngine::with_registry(&PolicyConfig::default(), registry);

        engine.evaluate(&EvaluationContext::new("write a report", "x"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        engine.evaluate(&EvaluationContext::new("hello", "x"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let engine = PolicyEngine::default();
        let ctx = EvaluationContext::new("Write-up please, and a GUIDE", "z".repeat(700))
            .with_tools(["write"]);
        let first = engine.evaluate(&ctx);
        let second = engine.evaluate(&ctx);
        assert_eq!(first, second);
        assert_eq!(first, evaluate(&ctx, &PolicyConfig::default()));
    }

    #[test]
    fn empty_context_allows() {
        let engine = PolicyEngine::default();
        assert_eq!(engine.evaluate(&EvaluationContext::default()), Verdict::Allow);
    }

    #[test]
    fn empty_registry_allows_everything() {
        let engine = PolicyEngine::with_registry(&PolicyConfig::default(), PolicyRegistry::new());
        let ctx = EvaluationContext::new("write a report", "x");
        assert_eq!(engine.evaluate(&ctx), Verdict::Allow);
    }

    #[test]
    fn custom_config_changes_triggers() {
        let config = PolicyConfig {
            report_keywords: vec!["memo".to_string()],
            ..PolicyConfig::default()
        };
        let engine = PolicyEngine::new(&config);
        assert!(engine
            .evaluate(&EvaluationContext::new("draft a memo", "x"))
            .is_blocked());
        assert_eq!(
            engine.evaluate(&EvaluationContext::new("write a report", "x")),
            Verdict::Allow
        );
    }

    #[test]
    fn trace_stops_at_blocking_rule() {
        let engine = PolicyEngine::default();
        let ctx = EvaluationContext::new("give me a guide", "g".repeat(800));
        let trace = engine.evaluate_with_trace(&ctx);

        assert!(trace.verdict.is_blocked());
        assert_eq!(trace.steps.len(), 2);
        assert_eq!(trace.steps[0].rule, "report_evidence");
        assert_eq!(trace.steps[0].outcome, "not_triggered");
        assert!(!trace.steps[0].terminal);
        assert_eq!(trace.steps[1].rule, "documentation_presentation");
        assert_eq!(trace.steps[1].outcome, "violated");
        assert!(trace.steps[1].terminal);
        assert_eq!(trace.verdict, engine.evaluate(&ctx));
    }

    #[test]
    fn trace_covers_all_rules_on_allow() {
        let engine = PolicyEngine::default();
        let ctx = EvaluationContext::new("write a report", "done").with_tools(["Write", "canvas"]);
        let trace = engine.evaluate_with_trace(&ctx);

        assert_eq!(trace.verdict, Verdict::Allow);
        assert_eq!(trace.steps.len(), 4);
        assert_eq!(trace.steps[0].outcome, "satisfied");
        assert!(trace.steps.iter().all(|s| !s.terminal));
    }

    #[test]
    fn verdict_serializes_tagged() {
        let json = serde_json::to_value(Verdict::Block {
            reason: "nope".to_string(),
        })
        .unwrap();
        assert_eq!(json["verdict"], "block");
        assert_eq!(json["reason"], "nope");
        assert_eq!(serde_json::to_value(Verdict::Allow).unwrap()["verdict"], "allow");
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = Arc::new(PolicyEngine::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    let ctx = if i % 2 == 0 {
                        EvaluationContext::new("write a report", "x")
                    } else {
                        EvaluationContext::new("hello", "x")
                    };
                    engine.evaluate(&ctx).is_blocked()
                })
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, false, true, false]);
    }
}
