//! Synonym expansion: informal verbs mapped onto canonical intents.

use mender_grammar::Vocabulary;
use mender_protocol::{Command, RepairStrategyKind};

use super::{RepairStrategy, StrategyOutcome, validated};
use crate::confidence;

/// Rewrites `check project` as `status project` and similar.
pub struct SynonymExpansion;

impl RepairStrategy for SynonymExpansion {
    fn kind(&self) -> RepairStrategyKind {
        RepairStrategyKind::SynonymExpansion
    }

    fn attempt(&self, command: &Command, vocabulary: &Vocabulary) -> Option<StrategyOutcome> {
        let canonical = vocabulary.synonym(&command.intent)?;
        let repaired = validated(
            vocabulary,
            command.rewrite(canonical, command.target.clone()),
        )?;
        Some(StrategyOutcome::Single {
            command: repaired,
            confidence: confidence::SYNONYM_EXPANSION,
            explanation: format!("interpreted '{}' as '{canonical}'", command.intent),
        })
    }
}
