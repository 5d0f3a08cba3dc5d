use ambience_core::error::CoreError;
use ambience_gateway::GatewayError;

/// Failure reported at a workflow boundary.
///
/// Workflows log these and leave view state as it was before the call;
/// the error is returned so the caller can show it or offer a retry.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Input rejected before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The gateway failed (transport) or the backend said no (rejected).
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<CoreError> for WorkflowError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            other => Self::Validation(other.to_string()),
        }
    }
}

impl WorkflowError {
    /// `true` when the backend answered with a non-success status.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Gateway(GatewayError::Rejected { .. }))
    }
}
