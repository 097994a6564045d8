//! Argument-order repair: `security analyze` → `analyze security`.

use mender_grammar::Vocabulary;
use mender_protocol::{Command, RepairStrategyKind};

use super::{RepairStrategy, StrategyOutcome, validated};
use crate::confidence;

/// Fixes intent/target given in the wrong slots.
pub struct ArgumentOrder;

impl RepairStrategy for ArgumentOrder {
    fn kind(&self) -> RepairStrategyKind {
        RepairStrategyKind::ArgumentOrder
    }

    fn attempt(&self, command: &Command, vocabulary: &Vocabulary) -> Option<StrategyOutcome> {
        swapped(command, vocabulary)
            .or_else(|| promoted(command, vocabulary))
            .or_else(|| defaulted(command, vocabulary))
            .map(|(command, explanation)| StrategyOutcome::Single {
                command,
                confidence: confidence::ARGUMENT_ORDER,
                explanation,
            })
    }
}

/// Target is an intent name: swap the two fields.
fn swapped(command: &Command, vocabulary: &Vocabulary) -> Option<(Command, String)> {
    if command.intent.is_empty()
        || !command.has_target()
        || !vocabulary.is_intent(&command.target)
    {
        return None;
    }
    let intent = command.target.to_lowercase();
    let target = command.intent.clone();
    let explanation = format!("swapped intent and target: '{intent} {target}'");
    let repaired = validated(vocabulary, command.rewrite(intent, target))?;
    Some((repaired, explanation))
}

/// No intent, but the target slot holds one: promote it.
fn promoted(command: &Command, vocabulary: &Vocabulary) -> Option<(Command, String)> {
    if !command.intent.is_empty() || !vocabulary.is_intent(&command.target) {
        return None;
    }
    let intent = command.target.to_lowercase();
    let explanation = format!("moved '{intent}' from target to intent");
    let repaired = validated(vocabulary, command.rewrite(intent, ""))?;
    Some((repaired, explanation))
}

/// Only a target was given: run it through the default intent.
fn defaulted(command: &Command, vocabulary: &Vocabulary) -> Option<(Command, String)> {
    if command.intent.is_empty() || command.has_target() || !vocabulary.is_target(&command.intent) {
        return None;
    }
    let intent = vocabulary.default_intent.clone();
    let target = command.intent.clone();
    let explanation = format!("'{target}' is a target; using default intent '{intent}'");
    let repaired = validated(vocabulary, command.rewrite(intent, target))?;
    Some((repaired, explanation))
}
