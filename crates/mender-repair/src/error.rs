//! Repair engine error types.

use thiserror::Error;

use mender_grammar::VocabularyError;

/// Errors that stop a repair attempt.
///
/// An unrepairable command is not an error; it yields a zero-confidence
/// result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepairError {
    #[error("undefined command: nothing to repair")]
    UndefinedCommand,

    #[error("invalid vocabulary: {0}")]
    Vocabulary(#[from] VocabularyError),
}

/// Convenience alias for repair engine results.
pub type EngineResult<T> = Result<T, RepairError>;
