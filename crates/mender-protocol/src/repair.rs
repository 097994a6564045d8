use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// Which repair strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStrategyKind {
    /// Nothing to repair.
    AlreadyValid,
    FlagNormalization,
    ArgumentOrder,
    SynonymExpansion,
    TypoCorrection,
}

impl RepairStrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyValid => "already_valid",
            Self::FlagNormalization => "flag_normalization",
            Self::ArgumentOrder => "argument_order",
            Self::SynonymExpansion => "synonym_expansion",
            Self::TypoCorrection => "typo_correction",
        }
    }
}

impl fmt::Display for RepairStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one repair attempt. Ephemeral, never persisted.
///
/// `repaired` and a multi-entry `candidates` list are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairResult {
    /// The command that was submitted for repair.
    pub original: Command,
    /// Single high/medium-confidence fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repaired: Option<Command>,
    /// Calibrated certainty in [0.0, 1.0].
    pub confidence: f64,
    /// What changed and why.
    pub explanation: String,
    /// Plausible alternatives when no single fix wins. May hold a single
    /// entry when the other equidistant fixes failed validation.
    #[serde(default)]
    pub candidates: Vec<Command>,
    /// Strategy that fired, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<RepairStrategyKind>,
}

impl RepairResult {
    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// True when no strategy could repair the command.
    pub fn is_unrepaired(&self) -> bool {
        self.repaired.is_none() && self.candidates.is_empty()
    }
}

/// What the caller should do with a repair result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairAction {
    /// Apply the single repair without asking.
    AutoCorrect,
    /// Let the user choose between candidates.
    PresentOptions,
    /// Escalate the raw text to the intent inference service.
    FailToBackend,
}

impl RepairAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoCorrect => "auto-correct",
            Self::PresentOptions => "present-options",
            Self::FailToBackend => "fail-to-backend",
        }
    }
}

impl fmt::Display for RepairAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_tags_match_wire_names() {
        assert_eq!(RepairAction::AutoCorrect.to_string(), "auto-correct");
        assert_eq!(RepairAction::PresentOptions.to_string(), "present-options");
        assert_eq!(RepairAction::FailToBackend.to_string(), "fail-to-backend");
    }

    #[test]
    fn action_serialization() {
        let json = serde_json::to_string(&RepairAction::PresentOptions).unwrap();
        assert_eq!(json, r#""present-options""#);
        let back: RepairAction = serde_json::from_str(r#""fail-to-backend""#).unwrap();
        assert_eq!(back, RepairAction::FailToBackend);
    }

    #[test]
    fn strategy_kind_serialization() {
        let json = serde_json::to_string(&RepairStrategyKind::TypoCorrection).unwrap();
        assert_eq!(json, r#""typo_correction""#);
        assert_eq!(RepairStrategyKind::ArgumentOrder.as_str(), "argument_order");
    }

    #[test]
    fn unrepaired_result() {
        let result = RepairResult {
            original: Command::new("mender xyzabc"),
            repaired: None,
            confidence: 0.0,
            explanation: "no repair".into(),
            candidates: vec![],
            strategy: None,
        };
        assert!(result.is_unrepaired());
        assert!(!result.has_candidates());

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("repaired"));
        assert!(!json.contains("strategy"));
    }
}
