//! Request builders and reply conversions.
//!
//! Each request builder is a pure `TryFrom<&ParameterSet>`: it pulls exactly
//! the parameters the operation declares, fails with `MissingParameter` before
//! any network activity, and ignores unknown extra entries.

use cloudlab_core::{MissingParameter, OperationReply, ParameterSet};

use crate::v1;

impl TryFrom<&ParameterSet> for v1::CreateInstanceRequest {
    type Error = MissingParameter;

    fn try_from(params: &ParameterSet) -> Result<Self, Self::Error> {
        Ok(Self {
            region: params.require("region")?.to_string(),
            os: params.require("os")?.to_string(),
            machine_size: params.require("machineSize")?.to_string(),
            key_pair: params.require("keyPair")?.to_string(),
            bucket_name: params.require("bucketName")?.to_string(),
        })
    }
}

impl TryFrom<&ParameterSet> for v1::DestroyInstanceRequest {
    type Error = MissingParameter;

    fn try_from(params: &ParameterSet) -> Result<Self, Self::Error> {
        Ok(Self {
            instance_id: params.require("instanceID")?.to_string(),
            region: params.require("region")?.to_string(),
        })
    }
}

impl TryFrom<&ParameterSet> for v1::DeployApplicationRequest {
    type Error = MissingParameter;

    fn try_from(params: &ParameterSet) -> Result<Self, Self::Error> {
        Ok(Self {
            credentials: params.require("credentials")?.to_string(),
            bucket_name: params.require("bucketName")?.to_string(),
            username: params.require("username")?.to_string(),
            public_ip: params.require("publicIP")?.to_string(),
        })
    }
}

impl TryFrom<&ParameterSet> for v1::DeployDatabaseRequest {
    type Error = MissingParameter;

    fn try_from(params: &ParameterSet) -> Result<Self, Self::Error> {
        Ok(Self {
            credentials: params.require("credentials")?.to_string(),
            bucket_name: params.require("bucketName")?.to_string(),
            username: params.require("username")?.to_string(),
            public_ip: params.require("publicIP")?.to_string(),
        })
    }
}

impl TryFrom<&ParameterSet> for v1::ConnectAppToDatabaseRequest {
    type Error = MissingParameter;

    fn try_from(params: &ParameterSet) -> Result<Self, Self::Error> {
        Ok(Self {
            credentials: params.require("credentials")?.to_string(),
            bucket_name: params.require("bucketName")?.to_string(),
            username: params.require("username")?.to_string(),
            public_ip: params.require("publicIP")?.to_string(),
        })
    }
}

impl TryFrom<&ParameterSet> for v1::RunModuleRequest {
    type Error = MissingParameter;

    fn try_from(params: &ParameterSet) -> Result<Self, Self::Error> {
        Ok(Self {
            credentials: params.require("credentials")?.to_string(),
            bucket_name: params.require("bucketName")?.to_string(),
            username: params.require("username")?.to_string(),
            public_ip: params.require("publicIP")?.to_string(),
            module_name: params.require("moduleName")?.to_string(),
            install_file: params.require("installFile")?.to_string(),
        })
    }
}

impl From<v1::CreateInstanceReply> for OperationReply {
    fn from(reply: v1::CreateInstanceReply) -> Self {
        OperationReply::InstanceCreated {
            instance_id: reply.instance_id,
            public_ip: reply.public_ip,
        }
    }
}

impl From<v1::DeployApplicationReply> for OperationReply {
    fn from(reply: v1::DeployApplicationReply) -> Self {
        OperationReply::ApplicationDeployed {
            output: reply.output,
        }
    }
}

impl From<v1::DeployDatabaseReply> for OperationReply {
    fn from(reply: v1::DeployDatabaseReply) -> Self {
        OperationReply::DatabaseDeployed {
            output: reply.output,
        }
    }
}

impl From<v1::ConnectAppToDatabaseReply> for OperationReply {
    fn from(reply: v1::ConnectAppToDatabaseReply) -> Self {
        OperationReply::AppConnectedToDatabase {
            output: reply.output,
        }
    }
}

impl From<v1::RunModuleReply> for OperationReply {
    fn from(reply: v1::RunModuleReply) -> Self {
        OperationReply::ModuleRan {
            output: reply.output,
        }
    }
}

impl v1::DestroyInstanceReply {
    /// Destroy replies carry only the status; the instance ID is echoed from
    /// the request that named it.
    pub fn into_reply(self, instance_id: String) -> OperationReply {
        OperationReply::InstanceDestroyed {
            instance_id,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_instance_params() -> ParameterSet {
        [
            ("region", "us-east-1"),
            ("os", "ami-123"),
            ("machineSize", "t2.micro"),
            ("keyPair", "k1"),
            ("bucketName", "b1"),
        ]
        .into_iter()
        .collect()
    }

    fn deployment_params() -> ParameterSet {
        [
            ("credentials", "k1"),
            ("bucketName", "b1"),
            ("username", "ubuntu"),
            ("publicIP", "1.2.3.4"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_create_instance_request_maps_all_fields() {
        let request = v1::CreateInstanceRequest::try_from(&create_instance_params()).unwrap();
        assert_eq!(request.region, "us-east-1");
        assert_eq!(request.os, "ami-123");
        assert_eq!(request.machine_size, "t2.micro");
        assert_eq!(request.key_pair, "k1");
        assert_eq!(request.bucket_name, "b1");
    }

    #[test]
    fn test_create_instance_request_missing_parameter() {
        let mut params = create_instance_params();
        params.remove("machineSize");

        let err = v1::CreateInstanceRequest::try_from(&params).unwrap_err();
        assert_eq!(err, MissingParameter("machineSize".to_string()));
    }

    #[test]
    fn test_destroy_instance_request_maps_fields() {
        let params: ParameterSet = [("instanceID", "i-abcdef"), ("region", "us-east-1")]
            .into_iter()
            .collect();

        let request = v1::DestroyInstanceRequest::try_from(&params).unwrap();
        assert_eq!(request.instance_id, "i-abcdef");
        assert_eq!(request.region, "us-east-1");
    }

    #[test]
    fn test_deployment_requests_share_field_mapping() {
        let params = deployment_params();

        let app = v1::DeployApplicationRequest::try_from(&params).unwrap();
        assert_eq!(app.credentials, "k1");
        assert_eq!(app.bucket_name, "b1");
        assert_eq!(app.username, "ubuntu");
        assert_eq!(app.public_ip, "1.2.3.4");

        let db = v1::DeployDatabaseRequest::try_from(&params).unwrap();
        assert_eq!(db.public_ip, "1.2.3.4");

        let connect = v1::ConnectAppToDatabaseRequest::try_from(&params).unwrap();
        assert_eq!(connect.credentials, "k1");
    }

    #[test]
    fn test_run_module_request_requires_module_fields() {
        let mut params = deployment_params();
        let err = v1::RunModuleRequest::try_from(&params).unwrap_err();
        assert_eq!(err, MissingParameter("moduleName".to_string()));

        params.insert("moduleName", "wordpress");
        params.insert("installFile", "git://install");
        let request = v1::RunModuleRequest::try_from(&params).unwrap();
        assert_eq!(request.module_name, "wordpress");
        assert_eq!(request.install_file, "git://install");
    }

    #[test]
    fn test_builders_ignore_extra_parameters() {
        let mut params = create_instance_params();
        params.insert("unusedExtra", "whatever");

        let request = v1::CreateInstanceRequest::try_from(&params).unwrap();
        assert_eq!(request.region, "us-east-1");
    }

    #[test]
    fn test_create_reply_conversion() {
        let reply: OperationReply = v1::CreateInstanceReply {
            instance_id: "i-abcdef".to_string(),
            public_ip: "1.2.3.4".to_string(),
        }
        .into();

        assert_eq!(
            reply,
            OperationReply::InstanceCreated {
                instance_id: "i-abcdef".to_string(),
                public_ip: "1.2.3.4".to_string(),
            }
        );
    }

    #[test]
    fn test_destroy_reply_echoes_instance_id() {
        let reply = v1::DestroyInstanceReply {
            status: "terminated".to_string(),
        }
        .into_reply("i-abcdef".to_string());

        assert_eq!(
            reply,
            OperationReply::InstanceDestroyed {
                instance_id: "i-abcdef".to_string(),
                status: "terminated".to_string(),
            }
        );
    }

    #[test]
    fn test_output_reply_conversions() {
        let app: OperationReply = v1::DeployApplicationReply {
            output: "app ok".to_string(),
        }
        .into();
        assert_eq!(
            app,
            OperationReply::ApplicationDeployed {
                output: "app ok".to_string()
            }
        );

        let module: OperationReply = v1::RunModuleReply {
            output: "module ok".to_string(),
        }
        .into();
        assert_eq!(
            module,
            OperationReply::ModuleRan {
                output: "module ok".to_string()
            }
        );
    }
}
