//! Payloads exchanged with the intent inference service.
//!
//! The interpreter only builds an `InferenceRequest` once local repair has
//! given up; the raw text is forwarded untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hand-off sent to the inference service on `fail-to-backend`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// Exactly what the user typed.
    pub raw: String,
    /// Optional free-form context (project, recent commands, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// ID of the command being escalated, when stamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_id: Option<Uuid>,
}

impl InferenceRequest {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            context: None,
            command_id: None,
        }
    }
}

/// Structured answer from the inference service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredIntent {
    pub intent: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub modifiers: BTreeMap<String, String>,
    /// Service confidence score (0.0 - 1.0).
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
    /// Follow-up questions when the service needs more detail.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clarifications: Vec<String>,
}
