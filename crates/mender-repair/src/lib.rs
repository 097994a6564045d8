//! Self-healing repair for invalid commands.
//!
//! An invalid `Command` runs through four deterministic strategies in fixed
//! priority order (flag normalization, argument order, synonyms, typos).
//! The first one that produces a validated fix wins, and its quantized
//! confidence drives the decision policy: auto-correct, present options, or
//! hand the raw text to the inference backend.

pub mod confidence;
pub mod distance;
pub mod engine;
pub mod error;
pub mod policy;
pub mod strategies;

pub use distance::{DictionaryMatch, closest_matches, edit_distance};
pub use engine::{RepairDecision, RepairEngine};
pub use error::{EngineResult, RepairError};
pub use policy::decide_action;
pub use strategies::{RepairStrategy, StrategyOutcome};
