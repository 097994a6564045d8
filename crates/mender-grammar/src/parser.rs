//! Structured command parser.
//!
//! Matches `<program> <intent> [<target>] [<modifiers>...]` case-insensitively.
//! Anything that does not fit the pattern is handed back as natural language
//! (an invalid command with no error) for the inference service to handle.

use std::sync::Arc;

use regex::Regex;
use serde::Serialize;

use mender_protocol::Command;

use crate::error::{GrammarError, GrammarResult, GrammarViolation, VocabularyError};
use crate::modifiers::tokenize_modifiers;
use crate::vocabulary::Vocabulary;

/// How the input was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputForm {
    /// Fits the fixed command pattern.
    Structured,
    /// Free text for the inference service.
    NaturalLanguage,
}

/// Result of parsing non-empty input.
///
/// `grammar_error` is set when structured input fails validation; the
/// command is still returned (marked invalid) so callers can show it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    pub command: Command,
    pub form: InputForm,
    pub grammar_error: Option<GrammarError>,
}

impl ParsedInput {
    pub fn is_natural_language(&self) -> bool {
        self.form == InputForm::NaturalLanguage
    }
}

/// Parser bound to one vocabulary. Immutable after construction.
#[derive(Debug, Clone)]
pub struct GrammarParser {
    vocabulary: Arc<Vocabulary>,
    pattern: Regex,
}

impl GrammarParser {
    /// Parser over `vocabulary`, normalized to lowercase first.
    pub fn new(vocabulary: Arc<Vocabulary>) -> Result<Self, VocabularyError> {
        let vocabulary = Vocabulary::checked_shared(vocabulary)?;
        let pattern = command_pattern(&vocabulary.program_name)?;
        Ok(Self {
            vocabulary,
            pattern,
        })
    }

    /// Parser over the built-in dictionaries.
    pub fn with_defaults() -> Result<Self, VocabularyError> {
        Self::new(Arc::new(Vocabulary::default()))
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// Parse raw text into a command.
    ///
    /// Only blank input is an error. Structured input that breaks the
    /// grammar comes back as `Ok` with `grammar_error` populated.
    pub fn parse(&self, input: &str) -> GrammarResult<ParsedInput> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(GrammarError::EmptyInput);
        }

        let Some(caps) = self.pattern.captures(trimmed) else {
            tracing::debug!(input = %trimmed, "no structured match, treating as natural language");
            return Ok(ParsedInput {
                command: Command::new(input),
                form: InputForm::NaturalLanguage,
                grammar_error: None,
            });
        };

        let intent = caps.name("intent").map_or("", |m| m.as_str());
        let target = caps.name("target").map_or("", |m| m.as_str());
        let tail = caps.name("tail").map_or("", |m| m.as_str());

        let mut command = Command::from_parts(
            input,
            intent.to_lowercase(),
            target.to_lowercase(),
            tokenize_modifiers(tail),
        );

        let grammar_error = match self.validate(&command) {
            Ok(()) => {
                command.is_valid = true;
                None
            }
            Err(e) => {
                tracing::debug!(
                    intent = %command.intent,
                    target = %command.target,
                    error = %e,
                    "structured input failed validation"
                );
                Some(e)
            }
        };

        Ok(ParsedInput {
            command,
            form: InputForm::Structured,
            grammar_error,
        })
    }

    /// Check a command against this parser's vocabulary.
    pub fn validate(&self, command: &Command) -> GrammarResult<()> {
        validate_grammar(&self.vocabulary, command)
    }
}

/// Grammar rules: intent present, intent known, target present when required.
///
/// Modifiers are never inspected.
pub fn validate_grammar(vocabulary: &Vocabulary, command: &Command) -> GrammarResult<()> {
    if command.intent.is_empty() {
        return Err(GrammarError::MissingIntent);
    }
    if !vocabulary.is_intent(&command.intent) {
        let intent = command.intent.clone();
        return Err(GrammarViolation::UnknownIntent(intent).into());
    }
    if vocabulary.requires_target(&command.intent) && !command.has_target() {
        let intent = command.intent.clone();
        return Err(GrammarViolation::MissingTarget(intent).into());
    }
    Ok(())
}

/// `<program> <intent> [<target>] [<tail>]`, intent/target as word tokens.
fn command_pattern(program_name: &str) -> Result<Regex, VocabularyError> {
    let pattern = format!(
        r"(?is)^{}\s+(?P<intent>\w+)(?:\s+(?P<target>\w+))?(?:\s+(?P<tail>.*))?$",
        regex::escape(program_name)
    );
    Regex::new(&pattern).map_err(|e| VocabularyError::Pattern(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> GrammarParser {
        GrammarParser::with_defaults().unwrap()
    }

    fn parse(input: &str) -> ParsedInput {
        parser().parse(input).unwrap()
    }

    // ── Structured input ────────────────────────────────────────

    #[test]
    fn parse_status_project() {
        let parsed = parse("mender status project");
        assert_eq!(parsed.form, InputForm::Structured);
        assert_eq!(parsed.command.intent, "status");
        assert_eq!(parsed.command.target, "project");
        assert!(parsed.command.is_valid);
        assert!(parsed.grammar_error.is_none());
    }

    #[test]
    fn parse_intent_only() {
        let parsed = parse("mender plan");
        assert_eq!(parsed.command.intent, "plan");
        assert!(parsed.command.target.is_empty());
        assert!(parsed.command.is_valid);
    }

    #[test]
    fn parse_is_case_insensitive_for_program_and_intent() {
        let parsed = parse("MENDER Status Project");
        assert_eq!(parsed.command.intent, "status");
        assert_eq!(parsed.command.target, "project");
        assert!(parsed.command.is_valid);
    }

    #[test]
    fn parse_with_modifiers() {
        let parsed = parse("mender analyze security --depth 3 --format=json --Verbose");
        let cmd = &parsed.command;
        assert_eq!(cmd.intent, "analyze");
        assert_eq!(cmd.target, "security");
        assert_eq!(cmd.modifiers["depth"], "3");
        assert_eq!(cmd.modifiers["format"], "json");
        assert_eq!(cmd.modifiers["Verbose"], "true");
        assert!(cmd.is_valid);
    }

    #[test]
    fn parse_flags_without_target() {
        let parsed = parse("mender status --verbose");
        assert!(parsed.command.target.is_empty());
        assert_eq!(parsed.command.modifiers["verbose"], "true");
        assert!(parsed.command.is_valid);
    }

    #[test]
    fn parse_collapses_repeated_whitespace() {
        let parsed = parse("  mender    status     project    --verbose  ");
        assert_eq!(parsed.command.intent, "status");
        assert_eq!(parsed.command.target, "project");
        assert_eq!(parsed.command.modifiers.len(), 1);
    }

    #[test]
    fn parse_keeps_raw_text() {
        let parsed = parse("mender Status project");
        assert_eq!(parsed.command.raw(), "mender Status project");
    }

    #[test]
    fn parse_preserves_long_targets() {
        let target = "a".repeat(500);
        let parsed = parse(&format!("mender status {target}"));
        assert_eq!(parsed.command.target.len(), 500);
        assert_eq!(parsed.command.target, target);
    }

    #[test]
    fn parse_underscore_tokens() {
        let parsed = parse("mender fix login_flow");
        assert_eq!(parsed.command.target, "login_flow");
        assert!(parsed.command.is_valid);
    }

    #[test]
    fn parse_does_not_stamp_metadata() {
        let parsed = parse("mender status");
        assert!(parsed.command.metadata.id.is_none());
        assert!(parsed.command.metadata.timestamp.is_none());
    }

    #[test]
    fn parse_is_idempotent() {
        let p = parser();
        let input = "mender analyze performance --depth 2 quick";
        let a = p.parse(input).unwrap();
        let b = p.parse(input).unwrap();
        assert_eq!(a, b);
    }

    // ── Grammar failures ────────────────────────────────────────

    #[test]
    fn unknown_intent_returns_invalid_command_with_error() {
        let parsed = parse("mender stauts project");
        assert_eq!(parsed.form, InputForm::Structured);
        assert_eq!(parsed.command.intent, "stauts");
        assert_eq!(parsed.command.target, "project");
        assert!(!parsed.command.is_valid);
        assert_eq!(
            parsed.grammar_error,
            Some(GrammarError::InvalidGrammar(GrammarViolation::UnknownIntent(
                "stauts".into()
            )))
        );
    }

    #[test]
    fn missing_required_target() {
        let parsed = parse("mender analyze");
        assert!(!parsed.command.is_valid);
        assert_eq!(
            parsed.grammar_error,
            Some(GrammarError::InvalidGrammar(GrammarViolation::MissingTarget(
                "analyze".into()
            )))
        );
    }

    #[test]
    fn empty_input_is_error() {
        let p = parser();
        assert_eq!(p.parse(""), Err(GrammarError::EmptyInput));
        assert_eq!(p.parse("   \t\n "), Err(GrammarError::EmptyInput));
    }

    // ── Natural language ────────────────────────────────────────

    #[test]
    fn free_text_is_natural_language() {
        let parsed = parse("please tell me how the project is doing");
        assert!(parsed.is_natural_language());
        assert!(!parsed.command.is_valid);
        assert!(parsed.grammar_error.is_none());
        assert!(parsed.command.intent.is_empty());
    }

    #[test]
    fn program_name_alone_is_natural_language() {
        assert!(parse("mender").is_natural_language());
    }

    #[test]
    fn punctuated_intent_is_natural_language() {
        assert!(parse("mender what's-up?").is_natural_language());
    }

    #[test]
    fn program_name_must_be_a_whole_word() {
        assert!(parse("menders status").is_natural_language());
    }

    // ── validate_grammar ────────────────────────────────────────

    #[test]
    fn validate_missing_intent() {
        let vocab = Vocabulary::default();
        let cmd = Command::new("mender");
        assert_eq!(
            validate_grammar(&vocab, &cmd),
            Err(GrammarError::MissingIntent)
        );
    }

    #[test]
    fn validate_accepts_empty_target_for_optional_intents() {
        let vocab = Vocabulary::default();
        for intent in ["status", "fix", "test", "plan", "deploy"] {
            let cmd = Command::new("").rewrite(intent, "");
            assert!(validate_grammar(&vocab, &cmd).is_ok(), "{intent}");
        }
    }

    #[test]
    fn validate_ignores_modifiers() {
        let vocab = Vocabulary::default();
        let cmd = Command::new("")
            .rewrite("status", "project")
            .with_modifier("--Whatever", "");
        assert!(validate_grammar(&vocab, &cmd).is_ok());
    }

    #[test]
    fn custom_program_name() {
        let vocab = Vocabulary {
            program_name: "ops.cli".into(),
            ..Vocabulary::default()
        };
        let p = GrammarParser::new(Arc::new(vocab)).unwrap();
        let parsed = p.parse("ops.cli status").unwrap();
        assert_eq!(parsed.form, InputForm::Structured);
        // The dot is literal, not a wildcard.
        assert!(p.parse("opsXcli status").unwrap().is_natural_language());
    }

    #[test]
    fn mixed_case_vocabulary_is_lowercased() {
        let vocab = Vocabulary {
            intents: vec!["Scan".into(), "plan".into()],
            target_required: vec![],
            default_intent: "PLAN".into(),
            synonyms: Default::default(),
            ..Vocabulary::default()
        };
        let p = GrammarParser::new(Arc::new(vocab)).unwrap();
        assert_eq!(p.vocabulary().intents, vec!["scan", "plan"]);
        assert_eq!(p.vocabulary().default_intent, "plan");

        let parsed = p.parse("mender scan cluster").unwrap();
        assert!(parsed.command.is_valid);
        assert_eq!(parsed.grammar_error, None);
        assert_eq!(parsed.command.intent, "scan");
    }
}
