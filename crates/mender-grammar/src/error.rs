//! Grammar and vocabulary error types.

use thiserror::Error;

/// Errors produced while parsing or validating a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("empty input")]
    EmptyInput,

    #[error("missing intent")]
    MissingIntent,

    #[error("invalid grammar: {0}")]
    InvalidGrammar(#[from] GrammarViolation),
}

/// The specific rule an invalid command breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarViolation {
    #[error("unknown intent '{0}'")]
    UnknownIntent(String),

    #[error("intent '{0}' requires a target")]
    MissingTarget(String),
}

/// Errors raised when loading or checking a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid vocabulary file: {0}")]
    Parse(String),

    #[error("vocabulary declares no intents")]
    NoIntents,

    #[error("{field} refers to undeclared intent '{intent}'")]
    UndeclaredIntent { field: &'static str, intent: String },

    #[error("invalid program name pattern: {0}")]
    Pattern(String),
}

/// Convenience alias for grammar results.
pub type GrammarResult<T> = Result<T, GrammarError>;
