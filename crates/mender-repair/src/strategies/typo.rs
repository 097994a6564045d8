//! Typo correction by edit distance against the intent and target dictionaries.
//!
//! Attempts run in order, first success wins:
//! 1. intent only, when the intent is unknown and the target is not a near-miss,
//! 2. target only, when the intent is known and the target is a near-miss,
//! 3. both, when the intent is unknown and the target is a near-miss.
//!
//! A unique closest match yields a single fix scored by distance; several
//! equidistant matches yield candidates and never a single fix.
//!
//! A near-miss target is corrected together with an unknown intent, never
//! left as typed: `anlyze rild` offers `analyze risk` and `analyze build`
//! at 0.6 even though the intent alone has a unique fix.

use mender_grammar::Vocabulary;
use mender_protocol::{Command, RepairStrategyKind};

use super::{RepairStrategy, StrategyOutcome, validated};
use crate::confidence::{self, MAX_TYPO_DISTANCE};
use crate::distance::{DictionaryMatch, closest_matches};

/// Corrects misspelled intents and targets.
pub struct TypoCorrection;

impl RepairStrategy for TypoCorrection {
    fn kind(&self) -> RepairStrategyKind {
        RepairStrategyKind::TypoCorrection
    }

    fn attempt(&self, command: &Command, vocabulary: &Vocabulary) -> Option<StrategyOutcome> {
        let intent_matches = if vocabulary.is_intent(&command.intent) {
            None
        } else {
            Some(closest_matches(
                &command.intent,
                &vocabulary.intents,
                MAX_TYPO_DISTANCE,
            ))
        };

        let target_matches = if command.has_target() && !vocabulary.is_target(&command.target) {
            Some(closest_matches(
                &command.target,
                &vocabulary.targets,
                MAX_TYPO_DISTANCE,
            ))
            .filter(|m| !m.is_empty())
        } else {
            None
        };

        match (intent_matches, target_matches) {
            (Some(intents), None) => correct_intent(command, vocabulary, &intents),
            (None, Some(targets)) => correct_target(command, vocabulary, &targets),
            (Some(intents), Some(targets)) => correct_both(command, vocabulary, &intents, &targets),
            (None, None) => None,
        }
    }
}

fn correct_intent(
    command: &Command,
    vocabulary: &Vocabulary,
    matches: &[DictionaryMatch],
) -> Option<StrategyOutcome> {
    correct_field(command, vocabulary, matches, &command.intent, |m| {
        command.rewrite(m.entry.clone(), command.target.clone())
    })
}

fn correct_target(
    command: &Command,
    vocabulary: &Vocabulary,
    matches: &[DictionaryMatch],
) -> Option<StrategyOutcome> {
    correct_field(command, vocabulary, matches, &command.target, |m| {
        command.rewrite(command.intent.clone(), m.entry.clone())
    })
}

/// Shared single-field logic: one match → fix, several → options.
fn correct_field(
    command: &Command,
    vocabulary: &Vocabulary,
    matches: &[DictionaryMatch],
    token: &str,
    build: impl Fn(&DictionaryMatch) -> Command,
) -> Option<StrategyOutcome> {
    match matches {
        [] => None,
        [only] => {
            let repaired = validated(vocabulary, build(only))?;
            Some(StrategyOutcome::Single {
                command: repaired,
                confidence: confidence::for_typo_distance(only.distance),
                explanation: format!(
                    "corrected '{token}' to '{}' (edit distance {})",
                    only.entry, only.distance
                ),
            })
        }
        several => {
            let candidates: Vec<Command> = several
                .iter()
                .filter_map(|m| validated(vocabulary, build(m)))
                .collect();
            if candidates.is_empty() {
                return None;
            }
            tracing::debug!(
                token,
                candidate_count = candidates.len(),
                intent = %command.intent,
                "ambiguous typo"
            );
            Some(StrategyOutcome::Options {
                candidates,
                confidence: confidence::AMBIGUOUS_SINGLE_FIELD,
                explanation: format!("'{token}' is ambiguous: {}", entries(several).join(", ")),
            })
        }
    }
}

fn correct_both(
    command: &Command,
    vocabulary: &Vocabulary,
    intents: &[DictionaryMatch],
    targets: &[DictionaryMatch],
) -> Option<StrategyOutcome> {
    if let ([intent], [target]) = (intents, targets) {
        let repaired = validated(
            vocabulary,
            command.rewrite(intent.entry.clone(), target.entry.clone()),
        )?;
        let distance = intent.distance.max(target.distance);
        return Some(StrategyOutcome::Single {
            command: repaired,
            confidence: confidence::for_typo_distance(distance),
            explanation: format!(
                "corrected '{}' to '{}' and '{}' to '{}'",
                command.intent, intent.entry, command.target, target.entry
            ),
        });
    }

    let candidates: Vec<Command> = intents
        .iter()
        .flat_map(|i| targets.iter().map(move |t| (i, t)))
        .filter_map(|(i, t)| {
            validated(
                vocabulary,
                command.rewrite(i.entry.clone(), t.entry.clone()),
            )
        })
        .collect();

    if candidates.is_empty() {
        return None;
    }

    Some(StrategyOutcome::Options {
        candidates,
        confidence: confidence::AMBIGUOUS_BOTH_FIELDS,
        explanation: format!(
            "'{} {}' is ambiguous: intent one of [{}], target one of [{}]",
            command.intent,
            command.target,
            entries(intents).join(", "),
            entries(targets).join(", ")
        ),
    })
}

fn entries(matches: &[DictionaryMatch]) -> Vec<&str> {
    matches.iter().map(|m| m.entry.as_str()).collect()
}
