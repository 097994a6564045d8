//! Repair strategies, tried in fixed priority order.
//!
//! Each strategy is a pure function of the command and the vocabulary. It
//! either produces a validated fix (or a set of validated alternatives) or
//! steps aside for the next one.

pub mod flags;
pub mod order;
pub mod synonyms;
pub mod typo;

use mender_grammar::{Vocabulary, validate_grammar};
use mender_protocol::{Command, RepairStrategyKind};

pub use flags::FlagNormalization;
pub use order::ArgumentOrder;
pub use synonyms::SynonymExpansion;
pub use typo::TypoCorrection;

/// What a strategy produced when it fired.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategyOutcome {
    /// One validated fix.
    Single {
        command: Command,
        confidence: f64,
        explanation: String,
    },
    /// Equally plausible validated fixes.
    ///
    /// Built from several equidistant matches, so it stays a choice even
    /// when validation leaves a single candidate; `candidates` may have
    /// length one.
    Options {
        candidates: Vec<Command>,
        confidence: f64,
        explanation: String,
    },
}

impl StrategyOutcome {
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Single { confidence, .. } | Self::Options { confidence, .. } => *confidence,
        }
    }
}

/// One link in the repair chain.
pub trait RepairStrategy: Send + Sync {
    /// Which strategy this is (for results and logging).
    fn kind(&self) -> RepairStrategyKind;

    /// Try to repair `command`. `None` passes control to the next strategy.
    fn attempt(&self, command: &Command, vocabulary: &Vocabulary) -> Option<StrategyOutcome>;
}

/// The standard chain: flags, argument order, synonyms, typos.
pub fn default_pipeline() -> Vec<Box<dyn RepairStrategy>> {
    vec![
        Box::new(FlagNormalization),
        Box::new(ArgumentOrder),
        Box::new(SynonymExpansion),
        Box::new(TypoCorrection),
    ]
}

/// Return `candidate` marked valid if it passes the grammar.
pub(crate) fn validated(vocabulary: &Vocabulary, mut candidate: Command) -> Option<Command> {
    validate_grammar(vocabulary, &candidate).ok()?;
    candidate.is_valid = true;
    Some(candidate)
}
