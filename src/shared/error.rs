// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;
pub type Result<T> = std::result::Result<T, OverrideError>;

#[derive(Error, Debug)]
pub enum OverrideError {
    #[error("Unable to get build from pod: {0}")]
    CarrierMissing(String),

    #[error("Unable to decode build from pod: {0}")]
    CarrierMalformed(String),

    #[error("Unable to set build in pod: {0}")]
    EncodeFailure(String),

    #[error("Unable to apply image pull policy to pod: {0}")]
    PullPolicyApplyFailure(String),

    #[error("Kubernetes API error: {0}")]
    KubeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Resource not found: {resource_type} '{name}' in namespace '{namespace}'")]
    NotFound {
        resource_type: String,
        name: String,
        namespace: String,
    },

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl From<kube::Error> for OverrideError {
    fn from(err: kube::Error) -> Self {
        OverrideError::KubeError(err.to_string())
    }
}

impl OverrideError {
    pub fn carrier_missing(context: impl Into<String>) -> Self {
        Self::CarrierMissing(context.into())
    }

    pub fn carrier_malformed(context: impl Into<String>) -> Self {
        Self::CarrierMalformed(context.into())
    }

    pub fn encode_failure(context: impl Into<String>) -> Self {
        Self::EncodeFailure(context.into())
    }

    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn not_found(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}
