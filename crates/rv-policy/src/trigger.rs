// trigger.rs — Whole-word trigger phrase matching.
//
// A trigger phrase matches when it appears in the text case-insensitively
// and is bounded on both sides by a non-word character or the edge of the
// text. Phrases are always matched literally: regex metacharacters in a
// configured phrase are escaped before the pattern is built.
//
// Patterns are compiled once, when the TriggerSet is built, never per call.

use regex::{Regex, RegexBuilder};

/// A precompiled set of trigger phrases.
#[derive(Debug, Clone, Default)]
pub struct TriggerSet {
    triggers: Vec<(String, Regex)>,
}

impl TriggerSet {
    /// Compile a set of phrases.
    ///
    /// Blank phrases are ignored. A phrase whose pattern cannot be compiled
    /// is skipped with a warning rather than failing construction.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut triggers = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref();
            if phrase.trim().is_empty() {
                continue;
            }
            match compile_phrase(phrase) {
                Ok(re) => triggers.push((phrase.to_string(), re)),
                Err(e) => {
                    tracing::warn!(phrase, error = %e, "skipping trigger phrase that failed to compile");
                }
            }
        }
        Self { triggers }
    }

    /// Return the first phrase (in configuration order) present in `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.triggers
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(phrase, _)| phrase.as_str())
    }

    /// Whether any phrase is present in `text` as a whole word.
    pub fn matches(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// The phrases that compiled successfully, in configuration order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(|(phrase, _)| phrase.as_str())
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

/// One-off form of [`TriggerSet::matches`] for callers without a precompiled set.
pub fn matches<S: AsRef<str>>(text: &str, triggers: &[S]) -> bool {
    TriggerSet::new(triggers).matches(text)
}

fn compile_phrase(phrase: &str) -> Result<Regex, regex::Error> {
    let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(phrase));
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}
