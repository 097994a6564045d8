//! Quantized confidence levels.
//!
//! Scores are fixed per strategy and edit distance; the decision policy
//! boundaries depend on these exact values.

/// Command was valid before repair.
pub const ALREADY_VALID: f64 = 1.0;
pub const FLAG_NORMALIZATION: f64 = 0.98;
pub const ARGUMENT_ORDER: f64 = 0.95;
pub const SYNONYM_EXPANSION: f64 = 0.95;
/// Single typo fix, one edit away.
pub const TYPO_ONE_EDIT: f64 = 0.95;
/// Single typo fix, two edits away.
pub const TYPO_TWO_EDITS: f64 = 0.85;
/// Several equidistant fixes for one field.
pub const AMBIGUOUS_SINGLE_FIELD: f64 = 0.7;
/// Several fixes where intent and target both changed.
pub const AMBIGUOUS_BOTH_FIELDS: f64 = 0.6;
/// Nothing local worked.
pub const UNREPAIRED: f64 = 0.0;

/// Largest edit distance typo correction will consider.
pub const MAX_TYPO_DISTANCE: usize = 2;

/// Confidence for a single typo fix at `distance` edits.
pub fn for_typo_distance(distance: usize) -> f64 {
    match distance {
        0 | 1 => TYPO_ONE_EDIT,
        _ => TYPO_TWO_EDITS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typo_distance_mapping() {
        assert_eq!(for_typo_distance(1), 0.95);
        assert_eq!(for_typo_distance(2), 0.85);
    }

    #[test]
    fn levels_are_ordered() {
        let levels = [
            ALREADY_VALID,
            FLAG_NORMALIZATION,
            ARGUMENT_ORDER,
            TYPO_TWO_EDITS,
            AMBIGUOUS_SINGLE_FIELD,
            AMBIGUOUS_BOTH_FIELDS,
            UNREPAIRED,
        ];
        assert!(levels.windows(2).all(|w| w[0] > w[1]));
    }
}
