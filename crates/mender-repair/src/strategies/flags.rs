//! Flag normalization: `--Output-File TRUE` → `outputfile = "true"`.

use std::collections::BTreeMap;

use mender_grammar::Vocabulary;
use mender_protocol::{Command, FLAG_FALSE, FLAG_TRUE, RepairStrategyKind};

use super::{RepairStrategy, StrategyOutcome, validated};
use crate::confidence;

/// Canonicalizes modifier keys and boolean values.
pub struct FlagNormalization;

impl RepairStrategy for FlagNormalization {
    fn kind(&self) -> RepairStrategyKind {
        RepairStrategyKind::FlagNormalization
    }

    fn attempt(&self, command: &Command, vocabulary: &Vocabulary) -> Option<StrategyOutcome> {
        let mut changes = Vec::new();
        let mut normalized = BTreeMap::new();

        for (key, value) in &command.modifiers {
            let new_key = normalize_key(key);
            let new_value = normalize_value(value);
            if new_key != *key || new_value != *value {
                changes.push(format!("'{key}={value}' → '{new_key}={new_value}'"));
            }
            normalized.insert(new_key, new_value);
        }

        if changes.is_empty() {
            return None;
        }

        let repaired = validated(vocabulary, command.rewrite_modifiers(normalized))?;
        Some(StrategyOutcome::Single {
            command: repaired,
            confidence: confidence::FLAG_NORMALIZATION,
            explanation: format!("normalized modifiers: {}", changes.join(", ")),
        })
    }
}

/// Strip leading dashes, lowercase, drop inner `-` and `_`.
pub fn normalize_key(key: &str) -> String {
    key.trim_start_matches('-')
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical boolean spelling; other values pass through.
pub fn normalize_value(value: &str) -> String {
    if value.is_empty() || value.eq_ignore_ascii_case(FLAG_TRUE) {
        FLAG_TRUE.to_string()
    } else if value.eq_ignore_ascii_case(FLAG_FALSE) {
        FLAG_FALSE.to_string()
    } else {
        value.to_string()
    }
}
