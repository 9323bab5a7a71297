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

use crate::infrastructure::constants::RESOURCE_TYPE_POD;
use crate::shared::error::OverrideError;
use k8s_openapi::api::core::v1::Pod;
use kube::{Api, Client};

/// Read-only access to build pods in one namespace.
#[async_trait::async_trait]
pub trait BuildPodClient: Send + Sync {
    async fn get_pod(&self, name: &str) -> Result<Pod, OverrideError>;

    fn namespace(&self) -> &str;
}

pub struct BuildPodClientImpl {
    client: Client,
    namespace: String,
}

impl BuildPodClientImpl {
    pub async fn new(namespace: String) -> Result<Self, OverrideError> {
        let client = Client::try_default().await.map_err(|e| {
            OverrideError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client, namespace })
    }

    pub async fn new_with_config(
        namespace: String,
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self, OverrideError> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        if kubeconfig_path.is_none() && context.is_none() {
            return Self::new(namespace).await;
        }

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path).map_err(|e| {
                OverrideError::KubeError(format!("Failed to load kubeconfig: {}", e))
            })?
        } else {
            Kubeconfig::read().map_err(|e| {
                OverrideError::KubeError(format!("Failed to load kubeconfig: {}", e))
            })?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                OverrideError::KubeError(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            OverrideError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client, namespace })
    }
}

#[async_trait::async_trait]
impl BuildPodClient for BuildPodClientImpl {
    async fn get_pod(&self, name: &str) -> Result<Pod, OverrideError> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), &self.namespace);

        match api.get(name).await {
            Ok(pod) => Ok(pod),
            Err(kube::Error::Api(ae)) if ae.code == 404 => Err(OverrideError::not_found(
                RESOURCE_TYPE_POD,
                name,
                &self.namespace,
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}
