use std::time::Duration;

use cloudlab_core::{DispatchOutcome, OperationReply, OperationSelector, ParameterSet};
use cloudlab_proto::v1;
use tracing::{info, warn};

use crate::channel::RemoteChannel;
use crate::features::dispatch::service::OpsInvoker;
use crate::shared::error::DispatchError;

/// Maps one selector to its (required-parameter set, request builder,
/// invoker) triple and executes it. Exactly one operation runs per dispatch;
/// every failure is folded into the returned outcome.
pub struct Dispatcher {
    invoker: OpsInvoker,
}

impl Dispatcher {
    pub fn new(channel: &RemoteChannel, call_timeout: Duration) -> Self {
        Self {
            invoker: OpsInvoker::new(channel, call_timeout),
        }
    }

    pub async fn dispatch(&self, selector: &str, params: &ParameterSet) -> DispatchOutcome {
        let operation = match OperationSelector::parse(selector) {
            Some(operation) => operation,
            None => {
                warn!(selector, "Unsupported operation selector");
                return DispatchError::UnsupportedOperation(selector.to_string()).into();
            }
        };

        info!(
            %operation,
            group = ?operation.service_group(),
            required = ?operation.required_params(),
            "Dispatching operation"
        );

        match self.execute(operation, params).await {
            Ok(reply) => DispatchOutcome::success(reply),
            Err(error) => {
                warn!(%operation, error = %error, "Dispatch failed");
                error.into()
            }
        }
    }

    async fn execute(
        &self,
        operation: OperationSelector,
        params: &ParameterSet,
    ) -> Result<OperationReply, DispatchError> {
        // The full required set is validated before any request is built, so
        // a missing parameter never reaches the network.
        params.require_all(operation.required_params())?;

        match operation {
            OperationSelector::CreateInstance => {
                self.invoker
                    .create_instance(v1::CreateInstanceRequest::try_from(params)?)
                    .await
            }
            OperationSelector::DestroyInstance => {
                self.invoker
                    .destroy_instance(v1::DestroyInstanceRequest::try_from(params)?)
                    .await
            }
            OperationSelector::DeployApplication => {
                self.invoker
                    .deploy_application(v1::DeployApplicationRequest::try_from(params)?)
                    .await
            }
            OperationSelector::DeployDatabase => {
                self.invoker
                    .deploy_database(v1::DeployDatabaseRequest::try_from(params)?)
                    .await
            }
            OperationSelector::ConnectAppToDatabase => {
                self.invoker
                    .connect_app_to_database(v1::ConnectAppToDatabaseRequest::try_from(params)?)
                    .await
            }
            OperationSelector::RunModule => {
                self.invoker
                    .run_module(v1::RunModuleRequest::try_from(params)?)
                    .await
            }
        }
    }
}
