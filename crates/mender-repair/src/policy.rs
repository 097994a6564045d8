//! Decision policy: what to do with a repair result.

use mender_protocol::{RepairAction, RepairResult};

use crate::confidence;

/// Above this (strictly), a single repair is applied automatically.
pub const AUTO_CORRECT_THRESHOLD: f64 = 0.9;
/// Lowest confidence at which candidates are still worth showing.
pub const PRESENT_OPTIONS_FLOOR: f64 = 0.5;
/// A lone repair from this level up to the auto-correct threshold
/// (exclusive) is applied too: it is the two-edit typo fix.
pub const SINGLE_FIX_FLOOR: f64 = confidence::TYPO_TWO_EDITS;

/// Map a repair result to an action. Pure; no side effects.
///
/// - `confidence > 0.9` with a repair → auto-correct
/// - a lone repair (no candidates) with `0.85 <= confidence < 0.9` → auto-correct
/// - `0.5 <= confidence <= 0.9` with candidates → present options
/// - anything else → fail to backend
pub fn decide_action(result: &RepairResult) -> RepairAction {
    if result.is_unrepaired() {
        return RepairAction::FailToBackend;
    }
    let c = result.confidence;

    if result.repaired.is_some() {
        if c > AUTO_CORRECT_THRESHOLD {
            return RepairAction::AutoCorrect;
        }
        let single_fix_band = SINGLE_FIX_FLOOR..AUTO_CORRECT_THRESHOLD;
        if !result.has_candidates() && single_fix_band.contains(&c) {
            return RepairAction::AutoCorrect;
        }
    }

    let options_band = PRESENT_OPTIONS_FLOOR..=AUTO_CORRECT_THRESHOLD;
    if result.has_candidates() && options_band.contains(&c) {
        return RepairAction::PresentOptions;
    }

    RepairAction::FailToBackend
}
