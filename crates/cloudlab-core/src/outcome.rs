use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a failed dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    InvalidParameters,
    UnsupportedOperation,
    RpcError,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidParameters => "INVALID_PARAMETERS",
            FailureKind::UnsupportedOperation => "UNSUPPORTED_OPERATION",
            FailureKind::RpcError => "RPC_ERROR",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reply of the one remote call, one variant per operation, fields copied
/// verbatim from the wire reply. Destroy additionally echoes the instance ID
/// from the request so the record can name what was destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationReply {
    InstanceCreated {
        instance_id: String,
        public_ip: String,
    },
    InstanceDestroyed {
        instance_id: String,
        status: String,
    },
    ApplicationDeployed {
        output: String,
    },
    DatabaseDeployed {
        output: String,
    },
    AppConnectedToDatabase {
        output: String,
    },
    ModuleRan {
        output: String,
    },
}

/// Deployment-family completion markers, owned by the outcome and consumed
/// only by an external orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionFlags {
    pub app_done: bool,
    pub db_done: bool,
}

impl CompletionFlags {
    fn for_reply(reply: &OperationReply) -> Self {
        Self {
            app_done: matches!(reply, OperationReply::ApplicationDeployed { .. }),
            db_done: matches!(reply, OperationReply::DatabaseDeployed { .. }),
        }
    }
}

/// Terminal result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    Success {
        reply: OperationReply,
        flags: CompletionFlags,
    },
    Failure {
        kind: FailureKind,
        detail: String,
    },
}

impl DispatchOutcome {
    pub fn success(reply: OperationReply) -> Self {
        let flags = CompletionFlags::for_reply(&reply);
        DispatchOutcome::Success { reply, flags }
    }

    pub fn failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        DispatchOutcome::Failure {
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Success { .. })
    }

    pub fn flags(&self) -> CompletionFlags {
        match self {
            DispatchOutcome::Success { flags, .. } => *flags,
            DispatchOutcome::Failure { .. } => CompletionFlags::default(),
        }
    }
}
