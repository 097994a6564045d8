//! Dictionaries the parser and repair engine work against.
//!
//! A `Vocabulary` is plain configuration: built once (defaults or TOML),
//! normalized to lowercase, checked, then shared read-only.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::VocabularyError;

/// Intent names, target vocabulary and synonym table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Leading word of every structured command.
    #[serde(default = "default_program_name")]
    pub program_name: String,
    /// Canonical intents, in dictionary order.
    #[serde(default = "default_intents")]
    pub intents: Vec<String>,
    /// Intents that are invalid without a target.
    #[serde(default = "default_target_required")]
    pub target_required: Vec<String>,
    /// Read-only intent used when only a target was given.
    #[serde(default = "default_intent")]
    pub default_intent: String,
    /// Common targets, used for ordering and typo repair.
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,
    /// Informal verb → canonical intent.
    #[serde(default = "default_synonyms")]
    pub synonyms: BTreeMap<String, String>,
}

fn default_program_name() -> String {
    "mender".to_string()
}

fn default_intents() -> Vec<String> {
    to_strings(&[
        "status", "analyze", "improve", "fix", "test", "plan", "deploy",
    ])
}

fn default_target_required() -> Vec<String> {
    to_strings(&["analyze", "improve"])
}

fn default_intent() -> String {
    "status".to_string()
}

fn default_targets() -> Vec<String> {
    to_strings(&[
        "project",
        "security",
        "performance",
        "coverage",
        "quality",
        "dependencies",
        "docs",
        "risk",
        "build",
        "phase",
    ])
}

fn default_synonyms() -> BTreeMap<String, String> {
    let table: &[(&str, &str)] = &[
        ("status", "check show view info display lookup"),
        ("analyze", "inspect examine scan audit investigate"),
        ("improve", "optimize enhance refactor upgrade tune"),
        ("fix", "repair patch resolve debug"),
        ("test", "verify validate run"),
        ("plan", "design roadmap outline"),
        ("deploy", "ship release publish launch"),
    ];

    table
        .iter()
        .flat_map(|(intent, words)| {
            words
                .split_whitespace()
                .map(move |word| (word.to_string(), intent.to_string()))
        })
        .collect()
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            program_name: default_program_name(),
            intents: default_intents(),
            target_required: default_target_required(),
            default_intent: default_intent(),
            targets: default_targets(),
            synonyms: default_synonyms(),
        }
    }
}

impl Vocabulary {
    /// Parse a TOML vocabulary. Missing keys fall back to the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Self =
            toml::from_str(contents).map_err(|e| VocabularyError::Parse(e.to_string()))?;
        vocabulary.checked()
    }

    /// Load a TOML vocabulary from disk.
    pub fn from_file(path: &str) -> Result<Self, VocabularyError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| VocabularyError::Io(format!("{path}: {e}")))?;
        Self::from_toml_str(&contents)
    }

    /// Lowercase every entry, then validate cross-references.
    pub fn checked(self) -> Result<Self, VocabularyError> {
        let normalized = self.normalized();
        normalized.validate()?;
        Ok(normalized)
    }

    /// [`checked`](Self::checked) for a shared vocabulary.
    ///
    /// Hands back the same `Arc` when it was already normalized.
    pub fn checked_shared(shared: Arc<Self>) -> Result<Arc<Self>, VocabularyError> {
        let normalized = Self::clone(&shared).checked()?;
        if normalized == *shared {
            Ok(shared)
        } else {
            Ok(Arc::new(normalized))
        }
    }

    fn normalized(self) -> Self {
        let fold = |s: String| s.trim().to_lowercase();
        let lower = |items: Vec<String>| -> Vec<String> {
            items
                .into_iter()
                .map(fold)
                .filter(|s| !s.is_empty())
                .collect()
        };
        Self {
            program_name: self.program_name.trim().to_string(),
            intents: lower(self.intents),
            target_required: lower(self.target_required),
            default_intent: fold(self.default_intent),
            targets: lower(self.targets),
            synonyms: self
                .synonyms
                .into_iter()
                .map(|(k, v)| (fold(k), fold(v)))
                .collect(),
        }
    }

    /// Every intent referenced elsewhere must be declared.
    pub fn validate(&self) -> Result<(), VocabularyError> {
        if self.intents.is_empty() {
            return Err(VocabularyError::NoIntents);
        }
        if !self.is_intent(&self.default_intent) {
            return Err(VocabularyError::UndeclaredIntent {
                field: "default_intent",
                intent: self.default_intent.clone(),
            });
        }
        if let Some(intent) = self.target_required.iter().find(|i| !self.is_intent(i)) {
            return Err(VocabularyError::UndeclaredIntent {
                field: "target_required",
                intent: intent.clone(),
            });
        }
        if let Some(intent) = self.synonyms.values().find(|i| !self.is_intent(i)) {
            return Err(VocabularyError::UndeclaredIntent {
                field: "synonyms",
                intent: intent.clone(),
            });
        }
        Ok(())
    }

    /// Case-insensitive intent membership.
    pub fn is_intent(&self, word: &str) -> bool {
        contains_folded(&self.intents, word)
    }

    /// Case-insensitive target membership.
    pub fn is_target(&self, word: &str) -> bool {
        contains_folded(&self.targets, word)
    }

    pub fn requires_target(&self, intent: &str) -> bool {
        contains_folded(&self.target_required, intent)
    }

    /// Canonical intent for an informal verb.
    pub fn synonym(&self, word: &str) -> Option<&str> {
        self.synonyms.get(&word.to_lowercase()).map(String::as_str)
    }
}

fn contains_folded(items: &[String], word: &str) -> bool {
    let folded = word.to_lowercase();
    items.iter().any(|item| *item == folded)
}
