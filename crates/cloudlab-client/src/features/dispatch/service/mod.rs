use std::future::Future;
use std::time::Duration;

use cloudlab_core::OperationReply;
use cloudlab_proto::v1;
use cloudlab_proto::v1::compute_ops_client::ComputeOpsClient;
use cloudlab_proto::v1::deployment_ops_client::DeploymentOpsClient;
use tokio::time::timeout;
use tonic::transport::Channel;

use crate::channel::{CallTracker, RemoteChannel};
use crate::shared::error::DispatchError;

/// Operation invokers: one method per operation, each performing exactly one
/// unary call over the shared channel and awaiting exactly one reply. Any
/// transport failure, remote error status, or elapsed deadline is folded into
/// `DispatchError::Rpc` here; nothing raises past this boundary. No retries.
pub struct OpsInvoker {
    compute: ComputeOpsClient<Channel>,
    deployment: DeploymentOpsClient<Channel>,
    tracker: CallTracker,
    call_timeout: Duration,
}

impl OpsInvoker {
    pub fn new(channel: &RemoteChannel, call_timeout: Duration) -> Self {
        Self {
            compute: ComputeOpsClient::new(channel.grpc()),
            deployment: DeploymentOpsClient::new(channel.grpc()),
            tracker: channel.tracker(),
            call_timeout,
        }
    }

    pub async fn create_instance(
        &self,
        request: v1::CreateInstanceRequest,
    ) -> Result<OperationReply, DispatchError> {
        let _guard = self.tracker.guard();
        let mut client = self.compute.clone();
        let reply = self.unary(client.create_instance(request)).await?;
        Ok(reply.into())
    }

    pub async fn destroy_instance(
        &self,
        request: v1::DestroyInstanceRequest,
    ) -> Result<OperationReply, DispatchError> {
        let instance_id = request.instance_id.clone();
        let _guard = self.tracker.guard();
        let mut client = self.compute.clone();
        let reply = self.unary(client.destroy_instance(request)).await?;
        Ok(reply.into_reply(instance_id))
    }

    pub async fn deploy_application(
        &self,
        request: v1::DeployApplicationRequest,
    ) -> Result<OperationReply, DispatchError> {
        let _guard = self.tracker.guard();
        let mut client = self.deployment.clone();
        let reply = self.unary(client.deploy_application(request)).await?;
        Ok(reply.into())
    }

    pub async fn deploy_database(
        &self,
        request: v1::DeployDatabaseRequest,
    ) -> Result<OperationReply, DispatchError> {
        let _guard = self.tracker.guard();
        let mut client = self.deployment.clone();
        let reply = self.unary(client.deploy_database(request)).await?;
        Ok(reply.into())
    }

    pub async fn connect_app_to_database(
        &self,
        request: v1::ConnectAppToDatabaseRequest,
    ) -> Result<OperationReply, DispatchError> {
        let _guard = self.tracker.guard();
        let mut client = self.deployment.clone();
        let reply = self.unary(client.connect_app_to_database(request)).await?;
        Ok(reply.into())
    }

    pub async fn run_module(
        &self,
        request: v1::RunModuleRequest,
    ) -> Result<OperationReply, DispatchError> {
        let _guard = self.tracker.guard();
        let mut client = self.deployment.clone();
        let reply = self.unary(client.run_module(request)).await?;
        Ok(reply.into())
    }

    /// Await one unary reply within the per-call deadline.
    async fn unary<T, F>(&self, call: F) -> Result<T, DispatchError>
    where
        F: Future<Output = Result<tonic::Response<T>, tonic::Status>>,
    {
        match timeout(self.call_timeout, call).await {
            Ok(Ok(response)) => Ok(response.into_inner()),
            Ok(Err(status)) => Err(DispatchError::Rpc(status.to_string())),
            Err(_) => Err(DispatchError::Rpc(format!(
                "deadline exceeded after {:?}",
                self.call_timeout
            ))),
        }
    }
}
