//! Grammar layer for the mender command interpreter.
//!
//! Turns raw text (`mender <intent> [target] [modifiers...]`) into a
//! `Command`, decides whether the text is structured at all, and validates
//! commands against a `Vocabulary` supplied at construction time.

pub mod error;
pub mod modifiers;
pub mod parser;
pub mod vocabulary;

pub use error::{GrammarError, GrammarResult, GrammarViolation, VocabularyError};
pub use modifiers::tokenize_modifiers;
pub use parser::{GrammarParser, InputForm, ParsedInput, validate_grammar};
pub use vocabulary::Vocabulary;
