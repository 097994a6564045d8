//! mender front-end: library crate behind the `mender` binary.
//!
//! Wires the grammar parser, repair engine and decision policy into one
//! `Interpreter`, and exposes config and the inference hand-off so other
//! crates (e.g. `mender-e2e-tests`) can drive the same code paths.

pub mod backend;
pub mod config;
pub mod interpreter;

pub use backend::{InferenceBackend, OfflineBackend};
pub use config::{CliConfig, LogFormat};
pub use interpreter::{InterpretError, Interpretation, Interpreter, command_line};
