//! Repair engine: runs the strategy chain over an invalid command.
//!
//! Valid commands short-circuit at confidence 1.0. Invalid ones go through
//! the strategies in order; the first that fires decides the result. If none
//! fires the result has zero confidence and tells the caller to escalate.

use std::sync::Arc;

use serde::Serialize;

use mender_grammar::{Vocabulary, VocabularyError};
use mender_protocol::{Command, RepairAction, RepairResult, RepairStrategyKind};

use crate::confidence;
use crate::error::{EngineResult, RepairError};
use crate::policy::decide_action;
use crate::strategies::{RepairStrategy, StrategyOutcome, default_pipeline};

/// Repair result together with the action the policy chose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairDecision {
    pub result: RepairResult,
    pub action: RepairAction,
}

/// Deterministic self-healing engine bound to one vocabulary.
///
/// Holds no mutable state; one instance can serve concurrent callers.
pub struct RepairEngine {
    vocabulary: Arc<Vocabulary>,
    strategies: Vec<Box<dyn RepairStrategy>>,
}

impl RepairEngine {
    /// Engine with the standard strategy chain.
    pub fn new(vocabulary: Arc<Vocabulary>) -> Result<Self, VocabularyError> {
        Self::with_strategies(vocabulary, default_pipeline())
    }

    /// Engine with a custom chain, tried in the given order.
    ///
    /// The vocabulary is normalized to lowercase before use.
    pub fn with_strategies(
        vocabulary: Arc<Vocabulary>,
        strategies: Vec<Box<dyn RepairStrategy>>,
    ) -> Result<Self, VocabularyError> {
        let vocabulary = Vocabulary::checked_shared(vocabulary)?;
        Ok(Self {
            vocabulary,
            strategies,
        })
    }

    /// Engine over the built-in dictionaries.
    pub fn with_defaults() -> Result<Self, VocabularyError> {
        Self::new(Arc::new(Vocabulary::default()))
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// Strategy kinds in the order they are tried.
    pub fn strategy_order(&self) -> Vec<RepairStrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Repair a command.
    ///
    /// Only a blank command is an error. Unrepairable input yields a
    /// zero-confidence result with an explanation.
    pub fn repair(&self, command: &Command) -> EngineResult<RepairResult> {
        if command.is_blank() {
            return Err(RepairError::UndefinedCommand);
        }

        if command.is_valid {
            return Ok(RepairResult {
                original: command.clone(),
                repaired: Some(command.clone()),
                confidence: confidence::ALREADY_VALID,
                explanation: "already valid".to_string(),
                candidates: Vec::new(),
                strategy: Some(RepairStrategyKind::AlreadyValid),
            });
        }

        for strategy in &self.strategies {
            let kind = strategy.kind();
            let Some(outcome) = strategy.attempt(command, &self.vocabulary) else {
                tracing::debug!(strategy = %kind, raw = %command.raw(), "strategy did not apply");
                continue;
            };

            tracing::info!(
                strategy = %kind,
                confidence = outcome.confidence(),
                raw = %command.raw(),
                "repair strategy fired"
            );
            return Ok(into_result(command, kind, outcome));
        }

        tracing::debug!(raw = %command.raw(), "no deterministic repair found");
        Ok(RepairResult {
            original: command.clone(),
            repaired: None,
            confidence: confidence::UNREPAIRED,
            explanation: "deterministic repair failed; intent inference required".to_string(),
            candidates: Vec::new(),
            strategy: None,
        })
    }

    /// Repair, then apply the decision policy.
    pub fn repair_with_decision(&self, command: &Command) -> EngineResult<RepairDecision> {
        let result = self.repair(command)?;
        let action = decide_action(&result);
        Ok(RepairDecision { result, action })
    }
}

fn into_result(
    original: &Command,
    kind: RepairStrategyKind,
    outcome: StrategyOutcome,
) -> RepairResult {
    match outcome {
        StrategyOutcome::Single {
            command,
            confidence,
            explanation,
        } => RepairResult {
            original: original.clone(),
            repaired: Some(command),
            confidence,
            explanation,
            candidates: Vec::new(),
            strategy: Some(kind),
        },
        StrategyOutcome::Options {
            candidates,
            confidence,
            explanation,
        } => RepairResult {
            original: original.clone(),
            repaired: None,
            confidence,
            explanation,
            candidates,
            strategy: Some(kind),
        },
    }
}
