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

use crate::infrastructure::constants::{
    PULL_POLICY_ALWAYS, PULL_POLICY_IF_NOT_PRESENT, PULL_POLICY_NEVER,
};
use crate::infrastructure::kubernetes::resources::pod::pod_ref;
use crate::shared::error::{OverrideError, Result};
use k8s_openapi::api::core::v1::Pod;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullPolicy {
    Always,
    IfNotPresent,
    Never,
}

impl PullPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullPolicy::Always => PULL_POLICY_ALWAYS,
            PullPolicy::IfNotPresent => PULL_POLICY_IF_NOT_PRESENT,
            PullPolicy::Never => PULL_POLICY_NEVER,
        }
    }

    /// `Always` when the base image must be pulled, `IfNotPresent` otherwise.
    pub fn from_force_pull(force_pull: bool) -> Self {
        if force_pull {
            PullPolicy::Always
        } else {
            PullPolicy::IfNotPresent
        }
    }
}

impl std::fmt::Display for PullPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PullPolicy {
    type Err = OverrideError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            PULL_POLICY_ALWAYS => Ok(PullPolicy::Always),
            PULL_POLICY_IF_NOT_PRESENT => Ok(PullPolicy::IfNotPresent),
            PULL_POLICY_NEVER => Ok(PullPolicy::Never),
            _ => Err(OverrideError::ConfigError(format!(
                "Invalid image pull policy: {}",
                s
            ))),
        }
    }
}

/// Set the image pull policy of every init container and every container of `pod`.
///
/// Never fails today; the `Result` keeps the call site uniform with the other pod
/// mutations.
pub fn apply_pull_policy_to_pod(pod: &mut Pod, policy: PullPolicy) -> Result<()> {
    let pod_name = pod_ref(pod);
    let Some(spec) = pod.spec.as_mut() else {
        return Ok(());
    };

    for container in spec.init_containers.iter_mut().flatten() {
        trace!(
            "Setting ImagePullPolicy to {:?} on init container {} of pod {}",
            policy.as_str(),
            container.name,
            pod_name
        );
        container.image_pull_policy = Some(policy.as_str().to_string());
    }
    for container in spec.containers.iter_mut() {
        trace!(
            "Setting ImagePullPolicy to {:?} on container {} of pod {}",
            policy.as_str(),
            container.name,
            pod_name
        );
        container.image_pull_policy = Some(policy.as_str().to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{Container, PodSpec};

    fn container(name: &str, policy: Option<&str>) -> Container {
        Container {
            name: name.to_string(),
            image: Some(format!("{}:latest", name)),
            image_pull_policy: policy.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_policy_applies_to_all_containers() {
        let mut pod = Pod {
            spec: Some(PodSpec {
                init_containers: Some(vec![
                    container("git-clone", Some("Never")),
                    container("manage-dockerfile", None),
                ]),
                containers: vec![container("custom-build", Some("IfNotPresent"))],
                ..Default::default()
            }),
            ..Default::default()
        };

        apply_pull_policy_to_pod(&mut pod, PullPolicy::Always).unwrap();

        let spec = pod.spec.unwrap();
        let names: Vec<&str> = spec
            .init_containers
            .iter()
            .flatten()
            .chain(spec.containers.iter())
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["git-clone", "manage-dockerfile", "custom-build"]);

        for c in spec.init_containers.iter().flatten().chain(spec.containers.iter()) {
            assert_eq!(c.image_pull_policy.as_deref(), Some("Always"));
            assert_eq!(c.image, Some(format!("{}:latest", c.name)));
        }
    }

    #[test]
    fn test_policy_on_pod_without_spec() {
        let mut pod = Pod::default();
        assert!(apply_pull_policy_to_pod(&mut pod, PullPolicy::Never).is_ok());
        assert!(pod.spec.is_none());
    }

    #[test]
    fn test_policy_from_force_pull() {
        assert_eq!(PullPolicy::from_force_pull(true), PullPolicy::Always);
        assert_eq!(PullPolicy::from_force_pull(false), PullPolicy::IfNotPresent);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Never".parse::<PullPolicy>().unwrap(), PullPolicy::Never);
        assert_eq!(
            "IfNotPresent".parse::<PullPolicy>().unwrap().to_string(),
            "IfNotPresent"
        );
        assert!("always".parse::<PullPolicy>().is_err());
    }
}
