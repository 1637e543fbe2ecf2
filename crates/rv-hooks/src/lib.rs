//! # rv-hooks
//!
//! Host-side adapters for the response validator.
//!
//! The host agent runtime hands plugins loosely shaped JSON payloads. This
//! crate is the single place where those payloads are interpreted:
//!
//! - [`normalize`] maps a `message_sending` event and its turn context into an
//!   [`rv_policy::EvaluationContext`], accepting every alias the host uses.
//! - [`ResponseValidator`] runs the policy engine and answers with a
//!   [`HookOutcome`] (`{cancel, error}`).
//! - [`CanvasDocsEnforcer`] and [`SummarizeSpeechEnforcer`] append fixed
//!   instructional text to bootstrap context and to summarize tool results.
//!
//! Nothing here keeps state between calls.

pub mod bootstrap;
pub mod event;
pub mod plugin;
pub mod tool_result;
pub mod validator;

pub use bootstrap::{
    BootstrapContext, BootstrapEvent, BootstrapFile, CanvasDocsConfig, CanvasDocsEnforcer,
};
pub use event::{normalize, HookOutcome};
pub use plugin::{plugin_config, registrations, HookPoint, HookRegistration, PluginSet};
pub use tool_result::{SummarizeConfig, SummarizeSpeechEnforcer, ToolResult};
pub use validator::ResponseValidator;
