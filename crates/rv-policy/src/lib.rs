//! # rv-policy
//!
//! Response policy engine for agent message delivery.
//!
//! Before an agent response is sent, the [`PolicyEngine`] checks it against an
//! ordered set of [`PolicyRule`]s. Each rule looks at the user's request, the
//! candidate response text and the tools invoked during the turn, and may
//! block delivery with a human-readable reason.
//!
//! ## Key invariants
//!
//! - **Fail-fast**: the first rule that blocks decides the verdict; later
//!   rules are not consulted.
//! - **Trigger before evidence**: a rule whose trigger does not hold never
//!   looks at tool invocations and never blocks.
//! - **Pure**: the verdict depends only on the context, the configuration and
//!   the rule order. The same inputs always give the same verdict.
//! - **No evidence means block**: missing tool invocations count as absent
//!   evidence, never as a pass.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod registry;
pub mod rule;
pub mod trigger;

pub use config::{CompiledConfig, PolicyConfig, ToolsConfig};
pub use context::{EvaluationContext, ToolInvocation};
pub use engine::{evaluate, EvaluationStep, EvaluationTrace, PolicyEngine, Verdict};
pub use error::PolicyError;
pub use evidence::{has_any, ToolAliases};
pub use registry::PolicyRegistry;
pub use rule::{
    AudioLengthRule, DocumentationPresentationRule, PolicyRule, ReportEvidenceRule, RuleOutcome,
    UnstructuredResponseRule,
};
pub use trigger::{matches, TriggerSet};
