//! E2E tests for the canonical parse → repair → decide scenarios.

mod helpers;

use helpers::{TestHarness, intents, repaired};
use mender_grammar::InputForm;
use mender_protocol::{RepairAction, RepairStrategyKind};

/// A well-formed command passes straight through at full confidence.
#[test]
fn e2e_valid_status_project() {
    let h = TestHarness::with_defaults();

    let parsed = h.parse("status project");
    assert_eq!(parsed.command.intent, "status");
    assert_eq!(parsed.command.target, "project");
    assert!(parsed.command.is_valid);

    let (result, action) = h.run("status project");
    assert_eq!(result.confidence, 1.0);
    assert_eq!(repaired(&result), &parsed.command);
    assert_eq!(action, RepairAction::AutoCorrect);
}

/// Transposed letters are two edits away and still auto-correct.
#[test]
fn e2e_two_edit_typo() {
    let h = TestHarness::with_defaults();

    let (result, action) = h.run("stauts project");
    assert_eq!(repaired(&result).intent, "status");
    assert_eq!(repaired(&result).target, "project");
    assert_eq!(result.confidence, 0.85);
    assert_eq!(action, RepairAction::AutoCorrect);
}

/// Informal verbs map onto canonical intents.
#[test]
fn e2e_synonym() {
    let h = TestHarness::with_defaults();

    let (result, action) = h.run("check project");
    assert_eq!(repaired(&result).intent, "status");
    assert_eq!(result.confidence, 0.95);
    assert_eq!(result.strategy, Some(RepairStrategyKind::SynonymExpansion));
    assert_eq!(action, RepairAction::AutoCorrect);
}

/// Intent and target given the wrong way round.
#[test]
fn e2e_swapped_order() {
    let h = TestHarness::with_defaults();

    let (result, action) = h.run("security analyze");
    let fixed = repaired(&result);
    assert_eq!(fixed.intent, "analyze");
    assert_eq!(fixed.target, "security");
    assert_eq!(result.confidence, 0.95);
    assert_eq!(action, RepairAction::AutoCorrect);
}

/// Gibberish falls through every strategy to the inference backend.
#[test]
fn e2e_unrepairable_fails_to_backend() {
    let h = TestHarness::with_defaults();

    let (result, action) = h.run("xyzabc qwerty");
    assert_eq!(result.confidence, 0.0);
    assert!(result.repaired.is_none());
    assert!(result.candidates.is_empty());
    assert_eq!(action, RepairAction::FailToBackend);
}

/// Mis-cased flags are normalized on a command flagged invalid by its caller.
#[test]
fn e2e_flag_normalization() {
    let h = TestHarness::with_defaults();

    let parsed = h.parse("status project --Verbose");
    assert_eq!(parsed.command.modifiers["Verbose"], "true");

    let mut command = parsed.command;
    command.is_valid = false;
    let decision = h.engine.repair_with_decision(&command).unwrap();

    let fixed = repaired(&decision.result);
    assert_eq!(fixed.modifiers["verbose"], "true");
    assert!(!fixed.modifiers.contains_key("Verbose"));
    assert_eq!(decision.result.confidence, 0.98);
    assert_eq!(decision.action, RepairAction::AutoCorrect);
}

/// Bare target runs through the default read-only intent.
#[test]
fn e2e_bare_target_defaults_to_status() {
    let h = TestHarness::with_defaults();

    let (result, action) = h.run("security");
    assert_eq!(repaired(&result).intent, "status");
    assert_eq!(repaired(&result).target, "security");
    assert_eq!(result.strategy, Some(RepairStrategyKind::ArgumentOrder));
    assert_eq!(action, RepairAction::AutoCorrect);
}

/// Equidistant typo matches become options, never a single repair.
#[test]
fn e2e_ambiguous_typo_presents_options() {
    let h = TestHarness::with_defaults();

    let (result, action) = h.run("plst project");
    assert_eq!(action, RepairAction::PresentOptions);
    assert!(result.repaired.is_none());
    assert!((0.5..=0.9).contains(&result.confidence));
    assert_eq!(intents(&result.candidates), vec!["test", "plan"]);
}

/// Modifiers ride along through a typo repair untouched.
#[test]
fn e2e_modifiers_survive_repair() {
    let h = TestHarness::with_defaults();

    let (result, _) = h.run("anlyze performance --depth 3 --Format=JSON");
    let fixed = repaired(&result);
    assert_eq!(fixed.intent, "analyze");
    assert_eq!(fixed.modifiers["depth"], "3");
    assert_eq!(fixed.modifiers["Format"], "JSON");
    assert_eq!(fixed.raw(), result.original.raw());
}

/// The interpreter hands natural language to the backend verbatim.
#[test]
fn e2e_interpreter_natural_language_handoff() {
    let h = TestHarness::with_defaults();
    let raw = "what changed in the project since yesterday?";

    let out = h.interpreter.interpret(raw, Default::default()).unwrap();
    assert_eq!(out.form, InputForm::NaturalLanguage);
    assert_eq!(out.action, RepairAction::FailToBackend);
    assert_eq!(out.handoff.unwrap().raw, raw);
}

/// The JSON document printed by the binary carries the action tag.
#[test]
fn e2e_interpretation_json() {
    let h = TestHarness::with_defaults();

    let json = serde_json::to_value(h.interpret("securty analyze")).unwrap();
    // Argument order runs before typo correction, so the swap wins.
    assert_eq!(json["action"], "auto-correct");
    assert_eq!(json["strategy"], "argument_order");
    assert_eq!(json["resolved"]["intent"], "analyze");
    assert_eq!(json["resolved"]["target"], "securty");
}
