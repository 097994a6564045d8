//! Shared test harness for E2E integration tests.
//!
//! Wires parser, repair engine and interpreter over one vocabulary so tests
//! exercise the same code paths as the `mender` binary.

#![allow(dead_code)]

use std::sync::Arc;

use mender_cli::{Interpretation, Interpreter, OfflineBackend};
use mender_grammar::{GrammarParser, ParsedInput, Vocabulary};
use mender_protocol::{Command, CommandMetadata, RepairAction, RepairResult};
use mender_repair::{RepairEngine, decide_action};

/// Parser + engine + interpreter sharing one vocabulary.
pub struct TestHarness {
    pub vocabulary: Arc<Vocabulary>,
    pub parser: GrammarParser,
    pub engine: RepairEngine,
    pub interpreter: Interpreter,
}

impl TestHarness {
    /// Harness over the built-in dictionaries.
    pub fn with_defaults() -> Self {
        Self::with_vocabulary(Vocabulary::default())
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        let vocabulary = Arc::new(vocabulary);
        Self {
            parser: GrammarParser::new(Arc::clone(&vocabulary)).unwrap(),
            engine: RepairEngine::new(Arc::clone(&vocabulary)).unwrap(),
            interpreter: Interpreter::new(Arc::clone(&vocabulary), Box::new(OfflineBackend))
                .unwrap(),
            vocabulary,
        }
    }

    /// `<program> <rest>` for this harness's vocabulary.
    pub fn line(&self, rest: &str) -> String {
        format!("{} {rest}", self.vocabulary.program_name)
    }

    pub fn parse(&self, rest: &str) -> ParsedInput {
        self.parser.parse(&self.line(rest)).unwrap()
    }

    /// Parse then repair, returning the result and the policy's action.
    pub fn run(&self, rest: &str) -> (RepairResult, RepairAction) {
        let parsed = self.parse(rest);
        let result = self.engine.repair(&parsed.command).unwrap();
        let action = decide_action(&result);
        (result, action)
    }

    pub fn interpret(&self, rest: &str) -> Interpretation {
        self.interpreter
            .interpret(&self.line(rest), CommandMetadata::default())
            .unwrap()
    }

    /// An invalid command built directly, bypassing the parser.
    pub fn synthetic(&self, intent: &str, target: &str) -> Command {
        Command::new(self.line(&format!("{intent} {target}"))).rewrite(intent, target)
    }
}

/// The repaired command, panicking with context when there is none.
pub fn repaired(result: &RepairResult) -> &Command {
    result
        .repaired
        .as_ref()
        .unwrap_or_else(|| panic!("expected a repair, got: {}", result.explanation))
}

/// Intent of each candidate, in order.
pub fn intents(candidates: &[Command]) -> Vec<&str> {
    candidates.iter().map(|c| c.intent.as_str()).collect()
}
