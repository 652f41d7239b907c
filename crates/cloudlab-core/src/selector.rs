use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which of the two remote service groups carries an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceGroup {
    Compute,
    Deployment,
}

/// Declarative selection of exactly one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationSelector {
    CreateInstance,
    DestroyInstance,
    DeployApplication,
    DeployDatabase,
    ConnectAppToDatabase,
    RunModule,
}

impl OperationSelector {
    pub const ALL: [OperationSelector; 6] = [
        OperationSelector::CreateInstance,
        OperationSelector::DestroyInstance,
        OperationSelector::DeployApplication,
        OperationSelector::DeployDatabase,
        OperationSelector::ConnectAppToDatabase,
        OperationSelector::RunModule,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CreateInstance" => Some(OperationSelector::CreateInstance),
            "DestroyInstance" => Some(OperationSelector::DestroyInstance),
            "DeployApplication" => Some(OperationSelector::DeployApplication),
            "DeployDatabase" => Some(OperationSelector::DeployDatabase),
            "ConnectAppToDatabase" => Some(OperationSelector::ConnectAppToDatabase),
            "RunModule" => Some(OperationSelector::RunModule),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationSelector::CreateInstance => "CreateInstance",
            OperationSelector::DestroyInstance => "DestroyInstance",
            OperationSelector::DeployApplication => "DeployApplication",
            OperationSelector::DeployDatabase => "DeployDatabase",
            OperationSelector::ConnectAppToDatabase => "ConnectAppToDatabase",
            OperationSelector::RunModule => "RunModule",
        }
    }

    /// Parameter names this operation's request builder consumes, spelled
    /// exactly as the external configuration names them.
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            OperationSelector::CreateInstance => {
                &["region", "os", "machineSize", "keyPair", "bucketName"]
            }
            OperationSelector::DestroyInstance => &["instanceID", "region"],
            OperationSelector::DeployApplication
            | OperationSelector::DeployDatabase
            | OperationSelector::ConnectAppToDatabase => {
                &["credentials", "bucketName", "username", "publicIP"]
            }
            OperationSelector::RunModule => &[
                "credentials",
                "bucketName",
                "username",
                "publicIP",
                "moduleName",
                "installFile",
            ],
        }
    }

    pub fn service_group(&self) -> ServiceGroup {
        match self {
            OperationSelector::CreateInstance | OperationSelector::DestroyInstance => {
                ServiceGroup::Compute
            }
            OperationSelector::DeployApplication
            | OperationSelector::DeployDatabase
            | OperationSelector::ConnectAppToDatabase
            | OperationSelector::RunModule => ServiceGroup::Deployment,
        }
    }
}

impl fmt::Display for OperationSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationSelector {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OperationSelector::parse(value).ok_or_else(|| format!("unsupported operation: {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for selector in OperationSelector::ALL {
            assert_eq!(OperationSelector::parse(selector.as_str()), Some(selector));
        }
    }

    #[test]
    fn test_parse_unknown_selector() {
        assert_eq!(OperationSelector::parse("Frobnicate"), None);
        assert_eq!(OperationSelector::parse(""), None);
        assert_eq!(OperationSelector::parse("createinstance"), None);
    }

    #[test]
    fn test_from_str_reports_value() {
        let err = "Frobnicate".parse::<OperationSelector>().unwrap_err();
        assert!(err.contains("Frobnicate"));
    }

    #[test]
    fn test_required_params_create_instance() {
        assert_eq!(
            OperationSelector::CreateInstance.required_params(),
            ["region", "os", "machineSize", "keyPair", "bucketName"]
        );
    }

    #[test]
    fn test_required_params_destroy_instance() {
        assert_eq!(
            OperationSelector::DestroyInstance.required_params(),
            ["instanceID", "region"]
        );
    }

    #[test]
    fn test_required_params_deployment_family() {
        for selector in [
            OperationSelector::DeployApplication,
            OperationSelector::DeployDatabase,
            OperationSelector::ConnectAppToDatabase,
        ] {
            assert_eq!(
                selector.required_params(),
                ["credentials", "bucketName", "username", "publicIP"]
            );
        }
    }

    #[test]
    fn test_required_params_run_module_extends_deployment() {
        let params = OperationSelector::RunModule.required_params();
        assert_eq!(params.len(), 6);
        assert!(params.contains(&"moduleName"));
        assert!(params.contains(&"installFile"));
    }

    #[test]
    fn test_service_groups() {
        assert_eq!(
            OperationSelector::CreateInstance.service_group(),
            ServiceGroup::Compute
        );
        assert_eq!(
            OperationSelector::DestroyInstance.service_group(),
            ServiceGroup::Compute
        );
        assert_eq!(
            OperationSelector::RunModule.service_group(),
            ServiceGroup::Deployment
        );
    }
}
