pub mod outcome;
pub mod params;
pub mod selector;

pub use outcome::{CompletionFlags, DispatchOutcome, FailureKind, OperationReply};
pub use params::{MissingParameter, ParameterSet};
pub use selector::{OperationSelector, ServiceGroup};
