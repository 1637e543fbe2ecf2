// config.rs — Policy configuration.
//
// PolicyConfig is the operator-facing shape: plain keyword lists and limits,
// camelCase like the host's plugin config, every field optional. The engine
// never evaluates against it directly. It compiles it once into a
// CompiledConfig holding precompiled trigger sets, and that copy is
// read-only for the engine's lifetime.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::evidence::ToolAliases;
use crate::trigger::TriggerSet;

/// Phrases that mark a request for a report.
pub const DEFAULT_REPORT_KEYWORDS: &[&str] = &[
    "report",
    "document",
    "write up",
    "write-up",
    "create a report",
    "summarize to file",
];

/// Phrases that mark a request for documentation.
pub const DEFAULT_DOC_KEYWORDS: &[&str] = &[
    "documentation",
    "guide",
    "tutorial",
    "reference",
    "manual",
    "readme",
    "wiki",
    "spec",
    "specification",
];

pub const DEFAULT_AUDIO_MAX_LENGTH: usize = 300;
pub const DEFAULT_DOC_MIN_LENGTH: usize = 500;
pub const DEFAULT_LONG_RESPONSE_LENGTH: usize = 1000;
pub const DEFAULT_MAX_HEADINGS: usize = 3;

/// Response validator configuration.
///
/// Read from a TOML/YAML/JSON file or from the host's plugin config:
/// ```toml
/// reportKeywords = ["report", "write up"]
/// docKeywords = ["guide", "tutorial"]
/// audioMaxLength = 300
///
/// [tools]
/// present = ["canvas"]
/// speech = ["tts", "sag"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyConfig {
    /// Phrases in the user request that trigger the report rule.
    #[serde(alias = "report_keywords")]
    pub report_keywords: Vec<String>,

    /// Phrases in the user request that trigger the documentation rule.
    #[serde(alias = "doc_keywords")]
    pub doc_keywords: Vec<String>,

    /// Longest response (in characters) allowed as plain text in audio mode.
    /// `0` means "not set" and falls back to the default.
    #[serde(alias = "audio_max_length")]
    pub audio_max_length: usize,

    /// Responses to documentation requests longer than this must be presented.
    #[serde(alias = "doc_min_length")]
    pub doc_min_length: usize,

    /// Responses longer than this are checked for unpresented structure.
    #[serde(alias = "long_response_length")]
    pub long_response_length: usize,

    /// More headings than this in a long response counts as structured content.
    #[serde(alias = "max_headings")]
    pub max_headings: usize,

    /// Which tool names count as evidence for each requirement.
    pub tools: ToolsConfig,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            report_keywords: to_strings(DEFAULT_REPORT_KEYWORDS),
            doc_keywords: to_strings(DEFAULT_DOC_KEYWORDS),
            audio_max_length: DEFAULT_AUDIO_MAX_LENGTH,
            doc_min_length: DEFAULT_DOC_MIN_LENGTH,
            long_response_length: DEFAULT_LONG_RESPONSE_LENGTH,
            max_headings: DEFAULT_MAX_HEADINGS,
            tools: ToolsConfig::default(),
        }
    }
}

/// Tool names accepted as evidence, grouped by requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// File-creation tools.
    pub write: Vec<String>,
    /// Rich-presentation tools.
    pub present: Vec<String>,
    /// Text-to-speech tools.
    pub speech: Vec<String>,
    /// Alternative spellings the host records for the same tool.
    pub aliases: ToolAliases,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            write: to_strings(&["write"]),
            present: to_strings(&["canvas"]),
            speech: to_strings(&["tts", "sag"]),
            aliases: ToolAliases::default(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl PolicyConfig {
    /// Load config from a file. The format follows the extension:
    /// `.toml`, `.yaml`/`.yml`, anything else is parsed as JSON.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_err = |reason: String| PolicyError::ConfigParse {
            path: path.to_path_buf(),
            reason,
        };
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| parse_err(e.to_string())),
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| parse_err(e.to_string()))
            }
            _ => serde_json::from_str(&content).map_err(|e| parse_err(e.to_string())),
        }
    }

    /// Load config from a file, falling back to defaults when it is missing
    /// or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using default policy config", e);
                Self::default()
            }
        }
    }

    /// The audio limit actually enforced (0 falls back to the default).
    pub fn effective_audio_max_length(&self) -> usize {
        if self.audio_max_length == 0 {
            DEFAULT_AUDIO_MAX_LENGTH
        } else {
            self.audio_max_length
        }
    }

    /// Compile trigger patterns and resolve defaults for evaluation.
    pub fn compile(&self) -> CompiledConfig {
        CompiledConfig {
            report_triggers: TriggerSet::new(&self.report_keywords),
            doc_triggers: TriggerSet::new(&self.doc_keywords),
            audio_max_length: self.effective_audio_max_length(),
            doc_min_length: self.doc_min_length,
            long_response_length: self.long_response_length,
            max_headings: self.max_headings,
            tools: self.tools.clone(),
        }
    }
}

/// Evaluation-ready configuration with precompiled trigger patterns.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    pub report_triggers: TriggerSet,
    pub doc_triggers: TriggerSet,
    pub audio_max_length: usize,
    pub doc_min_length: usize,
    pub long_response_length: usize,
    pub max_headings: usize,
    pub tools: ToolsConfig,
}

impl Default for CompiledConfig {
    fn default() -> Self {
        PolicyConfig::default().compile()
    }
}
