//! Hand-off to the intent inference service.
//!
//! Reached only after local repair decides `fail-to-backend`. The shipped
//! backend is offline: it logs the hand-off and leaves the request for the
//! caller to forward.

use mender_protocol::{InferenceRequest, InferredIntent};

/// Something that can turn raw text into an intent when local repair fails.
pub trait InferenceBackend: Send + Sync {
    /// Infer an intent for the raw text. `None` if the backend has no answer.
    fn infer(&self, request: &InferenceRequest) -> Option<InferredIntent>;

    /// Name of this backend (for logging).
    fn name(&self) -> &str;
}

/// Backend that never answers; the request is returned to the caller.
pub struct OfflineBackend;

impl InferenceBackend for OfflineBackend {
    fn infer(&self, request: &InferenceRequest) -> Option<InferredIntent> {
        tracing::debug!(raw = %request.raw, "offline backend: leaving request for caller");
        None
    }

    fn name(&self) -> &str {
        "offline"
    }
}
