//! Interpreter: parse, repair, decide, and hand off when local repair fails.
//!
//! Local-first: the grammar parser and deterministic repair engine handle
//! everything they can. Only a `fail-to-backend` decision reaches the
//! inference backend, and it gets the raw text untouched.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use mender_grammar::{GrammarError, GrammarParser, InputForm, Vocabulary, VocabularyError};
use mender_protocol::{
    Command, CommandMetadata, InferenceRequest, InferredIntent, RepairAction, RepairStrategyKind,
};
use mender_repair::{RepairEngine, RepairError};

use crate::backend::InferenceBackend;

/// Errors that prevent any interpretation.
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Repair(#[from] RepairError),

    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}

/// Everything the front-end needs to report for one input.
#[derive(Debug, Clone, Serialize)]
pub struct Interpretation {
    pub action: RepairAction,
    pub form: InputForm,
    pub confidence: f64,
    pub explanation: String,
    /// Grammar failure reported by the parser, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<RepairStrategyKind>,
    /// The command as parsed.
    pub original: Command,
    /// The command to run, for auto-correct.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Command>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<Command>,
    /// Request for the inference service, on fail-to-backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handoff: Option<InferenceRequest>,
    /// Backend answer, when the backend had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred: Option<InferredIntent>,
}

impl Interpretation {
    /// Process exit status: 0 resolved, 2 needs a choice, 3 needs inference.
    pub fn exit_code(&self) -> i32 {
        match self.action {
            RepairAction::AutoCorrect => 0,
            RepairAction::PresentOptions => 2,
            RepairAction::FailToBackend if self.inferred.is_some() => 0,
            RepairAction::FailToBackend => 3,
        }
    }
}

/// Raw input text for a program name and its arguments.
///
/// No arguments yields an empty string so the parser reports empty input.
pub fn command_line(program_name: &str, args: &[String]) -> String {
    let joined = args.join(" ");
    if joined.trim().is_empty() {
        String::new()
    } else {
        format!("{program_name} {joined}")
    }
}

/// Front-end composing parser, repair engine and inference backend.
pub struct Interpreter {
    parser: GrammarParser,
    engine: RepairEngine,
    backend: Box<dyn InferenceBackend>,
    context: Option<String>,
}

impl Interpreter {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        backend: Box<dyn InferenceBackend>,
    ) -> Result<Self, InterpretError> {
        Ok(Self {
            parser: GrammarParser::new(Arc::clone(&vocabulary))?,
            engine: RepairEngine::new(vocabulary)?,
            backend,
            context: None,
        })
    }

    /// Context forwarded with every hand-off.
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.parser.vocabulary()
    }

    /// Interpret one line of input.
    pub fn interpret(
        &self,
        input: &str,
        metadata: CommandMetadata,
    ) -> Result<Interpretation, InterpretError> {
        let parsed = self.parser.parse(input)?;
        let command = parsed.command.with_metadata(metadata);

        let decision = self.engine.repair_with_decision(&command)?;
        let result = decision.result;

        let (handoff, inferred) = if decision.action == RepairAction::FailToBackend {
            let request = InferenceRequest {
                context: self.context.clone(),
                command_id: command.metadata.id,
                ..InferenceRequest::new(command.raw())
            };
            tracing::warn!(
                backend = self.backend.name(),
                raw = %request.raw,
                "local repair failed, handing off to inference"
            );
            let inferred = self.backend.infer(&request);
            (Some(request), inferred)
        } else {
            (None, None)
        };

        tracing::info!(
            action = %decision.action,
            confidence = result.confidence,
            "input interpreted"
        );

        Ok(Interpretation {
            action: decision.action,
            form: parsed.form,
            confidence: result.confidence,
            explanation: result.explanation,
            grammar_error: parsed.grammar_error.map(|e| e.to_string()),
            strategy: result.strategy,
            original: result.original,
            resolved: result.repaired,
            candidates: result.candidates,
            handoff,
            inferred,
        })
    }
}
