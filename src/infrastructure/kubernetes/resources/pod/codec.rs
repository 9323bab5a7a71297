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

//! Build codecs
//!
//! A build pod carries the build it executes as an encoded JSON document. The codecs here
//! read that document out of the pod and write an updated one back in.

use crate::domain::build::Build;
use crate::infrastructure::constants::{BUILD_ANNOTATION_KEY, BUILD_ENV_VAR};
use crate::shared::error::{OverrideError, Result};
use k8s_openapi::api::core::v1::{Container, EnvVar, Pod};

pub trait BuildCodec {
    /// Decode the build embedded in `pod`.
    fn get_build_from_pod(&self, pod: &Pod) -> Result<Build>;

    /// Encode `build` into `pod`, replacing whatever the pod carried before.
    fn set_build_in_pod(&self, pod: &mut Pod, build: &Build) -> Result<()>;
}

impl<C: BuildCodec + ?Sized> BuildCodec for &C {
    fn get_build_from_pod(&self, pod: &Pod) -> Result<Build> {
        (**self).get_build_from_pod(pod)
    }

    fn set_build_in_pod(&self, pod: &mut Pod, build: &Build) -> Result<()> {
        (**self).set_build_in_pod(pod, build)
    }
}

pub fn decode_build(encoded: &str) -> Result<Build> {
    serde_json::from_str(encoded).map_err(|e| OverrideError::carrier_malformed(e.to_string()))
}

pub fn encode_build(build: &Build) -> Result<String> {
    serde_json::to_string(build).map_err(|e| OverrideError::encode_failure(e.to_string()))
}

/// Carries the build in the `BUILD` environment variable of the pod's containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvBuildCodec;

impl EnvBuildCodec {
    fn set_build_env(container: &mut Container, encoded: &str) -> bool {
        let mut found = false;
        for env in container.env.iter_mut().flatten() {
            if env.name == BUILD_ENV_VAR {
                env.value = Some(encoded.to_string());
                env.value_from = None;
                found = true;
            }
        }
        found
    }
}

impl BuildCodec for EnvBuildCodec {
    fn get_build_from_pod(&self, pod: &Pod) -> Result<Build> {
        let container = pod
            .spec
            .as_ref()
            .and_then(|spec| spec.containers.first())
            .ok_or_else(|| OverrideError::carrier_missing("pod has no containers"))?;

        let encoded = container
            .env
            .iter()
            .flatten()
            .find(|env| env.name == BUILD_ENV_VAR)
            .and_then(|env| env.value.as_deref())
            .unwrap_or_default();

        if encoded.is_empty() {
            return Err(OverrideError::carrier_missing(format!(
                "{} environment variable is empty on container {}",
                BUILD_ENV_VAR, container.name
            )));
        }

        decode_build(encoded)
    }

    fn set_build_in_pod(&self, pod: &mut Pod, build: &Build) -> Result<()> {
        let encoded = encode_build(build)?;

        let spec = pod
            .spec
            .as_mut()
            .filter(|spec| !spec.containers.is_empty())
            .ok_or_else(|| OverrideError::carrier_missing("pod has no containers"))?;

        for container in spec.init_containers.iter_mut().flatten() {
            Self::set_build_env(container, &encoded);
        }

        let mut containers = spec.containers.iter_mut();
        if let Some(first) = containers.next() {
            if !Self::set_build_env(first, &encoded) {
                first.env.get_or_insert_with(Vec::new).push(EnvVar {
                    name: BUILD_ENV_VAR.to_string(),
                    value: Some(encoded.clone()),
                    ..Default::default()
                });
            }
        }
        for container in containers {
            Self::set_build_env(container, &encoded);
        }

        Ok(())
    }
}

/// Carries the build in a single pod annotation.
#[derive(Debug, Clone)]
pub struct AnnotationBuildCodec {
    key: String,
}

impl AnnotationBuildCodec {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for AnnotationBuildCodec {
    fn default() -> Self {
        Self::new(BUILD_ANNOTATION_KEY)
    }
}

impl BuildCodec for AnnotationBuildCodec {
    fn get_build_from_pod(&self, pod: &Pod) -> Result<Build> {
        let encoded = pod
            .metadata
            .annotations
            .as_ref()
            .and_then(|annotations| annotations.get(&self.key))
            .map(String::as_str)
            .unwrap_or_default();

        if encoded.is_empty() {
            return Err(OverrideError::carrier_missing(format!(
                "annotation {} is empty",
                self.key
            )));
        }

        decode_build(encoded)
    }

    fn set_build_in_pod(&self, pod: &mut Pod, build: &Build) -> Result<()> {
        let encoded = encode_build(build)?;
        pod.metadata
            .annotations
            .get_or_insert_with(Default::default)
            .insert(self.key.clone(), encoded);
        Ok(())
    }
}
