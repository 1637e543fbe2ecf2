// check.rs — Evaluate one message_sending payload.

use std::path::Path;

use rv_hooks::{normalize, HookOutcome, ResponseValidator};
use rv_policy::PolicyConfig;
use serde_json::Value;

use super::read_json;

/// Returns whether the response was blocked.
pub fn execute(
    config: &PolicyConfig,
    event_path: &Path,
    turn_path: Option<&Path>,
    trace: bool,
) -> anyhow::Result<bool> {
    let (event, turn) = load_payload(event_path, turn_path)?;
    let validator = ResponseValidator::new(config);

    if trace {
        let ctx = normalize(&event, &turn);
        let trace = validator.engine().evaluate_with_trace(&ctx);
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(trace.verdict.is_blocked());
    }

    let outcome: HookOutcome = validator.on_message_sending(&event, &turn);
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(outcome.cancel)
}

/// Split the input into (event, turn). A combined document is used when no
/// separate turn file is given; missing parts become `null`.
fn load_payload(event_path: &Path, turn_path: Option<&Path>) -> anyhow::Result<(Value, Value)> {
    let doc = read_json(event_path)?;
    match turn_path {
        Some(path) => Ok((doc, read_json(path)?)),
        None => Ok(split_combined(doc)),
    }
}

fn split_combined(mut doc: Value) -> (Value, Value) {
    let event = doc.get_mut("event").map(Value::take).unwrap_or(Value::Null);
    let turn = doc.get_mut("turn").map(Value::take).unwrap_or(Value::Null);
    (event, turn)
}
