// config.rs — Show effective configuration and hook registrations.

use serde_json::{json, Map, Value};

use rv_hooks::registrations;
use rv_policy::{PolicyConfig, PolicyEngine};

pub fn execute(config: &PolicyConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&describe(config))?);
    Ok(())
}

/// The loaded config next to what the engine actually runs with: rule order,
/// the trigger phrases that compiled, and the tool alias table.
pub fn describe(config: &PolicyConfig) -> Value {
    let engine = PolicyEngine::new(config);
    let compiled = engine.config();
    let aliases: Map<String, Value> = compiled
        .tools
        .aliases
        .iter()
        .map(|(alias, canonical)| (alias.to_string(), Value::from(canonical)))
        .collect();

    json!({
        "config": config,
        "rules": engine.registry().names(),
        "triggers": {
            "report": compiled.report_triggers.phrases().collect::<Vec<_>>(),
            "doc": compiled.doc_triggers.phrases().collect::<Vec<_>>(),
        },
        "audioMaxLength": compiled.audio_max_length,
        "aliases": aliases,
    })
}

pub fn hooks() {
    for reg in registrations() {
        println!(
            "{:<24} {:<20} priority {}",
            reg.plugin_id,
            reg.point.as_str(),
            reg.priority
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_lists_rules_in_order() {
        let described = describe(&PolicyConfig::default());
        assert_eq!(
            described["rules"],
            json!([
                "report_evidence",
                "documentation_presentation",
                "audio_length",
                "unstructured_long_response"
            ])
        );
        assert_eq!(described["aliases"]["Write"], "write");
        assert_eq!(described["audioMaxLength"], 300);
    }

    #[test]
    fn describe_shows_only_usable_triggers() {
        let config = PolicyConfig {
            report_keywords: vec!["memo".to_string(), "  ".to_string()],
            audio_max_length: 0,
            ..PolicyConfig::default()
        };
        let described = describe(&config);
        assert_eq!(described["triggers"]["report"], json!(["memo"]));
        assert_eq!(described["config"]["reportKeywords"], json!(["memo", "  "]));
        assert_eq!(described["audioMaxLength"], 300);
        assert!(described["triggers"]["doc"]
            .as_array()
            .unwrap()
            .contains(&json!("tutorial")));
    }
}
