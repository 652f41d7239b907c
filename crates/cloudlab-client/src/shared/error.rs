use cloudlab_core::{DispatchOutcome, FailureKind, MissingParameter};
use thiserror::Error;

/// Dispatch-layer errors. Every variant maps onto one `FailureKind`; nothing
/// here propagates past the dispatcher boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error(transparent)]
    InvalidParameters(#[from] MissingParameter),
    #[error("RPC failed: {0}")]
    Rpc(String),
}

impl DispatchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DispatchError::UnsupportedOperation(_) => FailureKind::UnsupportedOperation,
            DispatchError::InvalidParameters(_) => FailureKind::InvalidParameters,
            DispatchError::Rpc(_) => FailureKind::RpcError,
        }
    }
}

impl From<DispatchError> for DispatchOutcome {
    fn from(err: DispatchError) -> Self {
        let kind = err.kind();
        let detail = match &err {
            // The unsupported-operation detail is the raw selector value.
            DispatchError::UnsupportedOperation(selector) => selector.clone(),
            other => other.to_string(),
        };
        DispatchOutcome::failure(kind, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_operation_outcome_carries_selector_verbatim() {
        let outcome: DispatchOutcome =
            DispatchError::UnsupportedOperation("Frobnicate".to_string()).into();
        assert_eq!(
            outcome,
            DispatchOutcome::failure(FailureKind::UnsupportedOperation, "Frobnicate")
        );
    }

    #[test]
    fn test_missing_parameter_maps_to_invalid_parameters() {
        let err = DispatchError::from(MissingParameter("bucketName".to_string()));
        assert_eq!(err.kind(), FailureKind::InvalidParameters);
        assert!(err.to_string().contains("bucketName"));
    }

    #[test]
    fn test_rpc_error_kind() {
        let err = DispatchError::Rpc("connection refused".to_string());
        assert_eq!(err.kind(), FailureKind::RpcError);
        assert!(err.to_string().starts_with("RPC failed"));
    }
}
