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

use crate::domain::build::{Build, BuildStrategy};
use crate::domain::config::BuildOverridesConfig;
use crate::domain::overrides::labels::override_label;
use crate::infrastructure::constants::LABEL_OS_STABLE;
use crate::infrastructure::kubernetes::resources::pod::{
    apply_pull_policy_to_pod, pod_ref, BuildCodec, EnvBuildCodec, PullPolicy,
};
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::{Pod, Toleration};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Applies an override policy to build pods.
///
/// Holds a read-only reference to the policy and the codec used to reach the build
/// embedded in each pod. Without a policy, [`BuildOverrides::apply_overrides`] leaves pods
/// untouched.
#[derive(Debug, Clone)]
pub struct BuildOverrides<'a, C = EnvBuildCodec> {
    config: Option<&'a BuildOverridesConfig>,
    codec: C,
}

impl<'a> BuildOverrides<'a> {
    pub fn new(config: Option<&'a BuildOverridesConfig>) -> Self {
        Self::with_codec(config, EnvBuildCodec)
    }
}

impl<'a, C: BuildCodec> BuildOverrides<'a, C> {
    pub fn with_codec(config: Option<&'a BuildOverridesConfig>, codec: C) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> Option<&'a BuildOverridesConfig> {
        self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Apply the configured overrides to `pod` and the build it carries.
    ///
    /// Categories are applied in a fixed order: force pull, image labels, node selector,
    /// annotations, tolerations. The build is written back into the pod last. On error
    /// the pod may already be partially mutated.
    pub fn apply_overrides(&self, pod: &mut Pod) -> Result<()> {
        let Some(config) = self.config else {
            return Ok(());
        };

        let mut build = self.codec.get_build_from_pod(pod)?;
        let build_ref = format!("{}/{}", build.namespace(), build.name());

        debug!("Applying overrides to build {}", build_ref);

        if let Some(force_pull) = config.force_pull {
            apply_force_pull(pod, &mut build, force_pull, &build_ref)?;
        }

        for label in &config.image_labels {
            trace!(
                "Overriding image label {}={} in build {}",
                label.name,
                label.value,
                build_ref
            );
            override_label(label.clone(), &mut build.spec.output.image_labels);
        }

        apply_node_selector(pod, &config.node_selector);
        apply_annotations(pod, &config.annotations);
        apply_tolerations(pod, &config.tolerations);

        self.codec.set_build_in_pod(pod, &build)
    }
}

fn apply_force_pull(
    pod: &mut Pod,
    build: &mut Build,
    force_pull: bool,
    build_ref: &str,
) -> Result<()> {
    match &mut build.spec.strategy {
        BuildStrategy::Docker(docker) => {
            trace!(
                "Setting docker strategy ForcePull to {} in build {}",
                force_pull,
                build_ref
            );
            docker.force_pull = force_pull;
        }
        BuildStrategy::Source(source) => {
            trace!(
                "Setting source strategy ForcePull to {} in build {}",
                force_pull,
                build_ref
            );
            source.force_pull = force_pull;
        }
        BuildStrategy::Custom(custom) => {
            apply_pull_policy_to_pod(pod, PullPolicy::from_force_pull(force_pull))?;

            trace!(
                "Setting custom strategy ForcePull to {} in build {}",
                force_pull,
                build_ref
            );
            custom.force_pull = force_pull;
        }
    }
    Ok(())
}

fn apply_node_selector(pod: &mut Pod, overrides: &BTreeMap<String, String>) {
    if overrides.is_empty() {
        return;
    }

    let pod_name = pod_ref(pod);
    let node_selector = pod
        .spec
        .get_or_insert_with(Default::default)
        .node_selector
        .get_or_insert_with(Default::default);

    for (key, value) in overrides {
        // The pod's own OS targeting stays authoritative.
        if key.trim() == LABEL_OS_STABLE {
            trace!(
                "Skipping override nodeselector {}={} on build pod {}",
                key,
                value,
                pod_name
            );
            continue;
        }
        trace!(
            "Adding override nodeselector {}={} to build pod {}",
            key,
            value,
            pod_name
        );
        node_selector.insert(key.clone(), value.clone());
    }
}

fn apply_annotations(pod: &mut Pod, overrides: &BTreeMap<String, String>) {
    if overrides.is_empty() {
        return;
    }

    let pod_name = pod_ref(pod);
    let annotations = pod
        .metadata
        .annotations
        .get_or_insert_with(Default::default);

    for (key, value) in overrides {
        trace!(
            "Adding override annotation {}={} to build pod {}",
            key,
            value,
            pod_name
        );
        annotations.insert(key.clone(), value.clone());
    }
}

fn apply_tolerations(pod: &mut Pod, overrides: &[Toleration]) {
    if overrides.is_empty() {
        return;
    }

    trace!("Overriding tolerations for pod {}", pod_ref(pod));
    pod.spec.get_or_insert_with(Default::default).tolerations = Some(overrides.to_vec());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::build::{
        CustomBuildStrategy, DockerBuildStrategy, ImageLabel, SourceBuildStrategy,
    };
    use crate::infrastructure::kubernetes::resources::pod::AnnotationBuildCodec;
    use crate::shared::error::OverrideError;
    use k8s_openapi::api::core::v1::{Container, PodSpec};

    fn toleration(key: &str) -> Toleration {
        Toleration {
            key: Some(key.to_string()),
            operator: Some("Exists".to_string()),
            effect: Some("NoSchedule".to_string()),
            ..Default::default()
        }
    }

    fn build_pod(strategy: BuildStrategy) -> (Pod, AnnotationBuildCodec) {
        let codec = AnnotationBuildCodec::default();
        let mut pod = Pod {
            spec: Some(PodSpec {
                containers: vec![Container {
                    name: "build".to_string(),
                    image_pull_policy: Some("Never".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        codec
            .set_build_in_pod(&mut pod, &Build::new("proj", "app-1", strategy))
            .unwrap();
        (pod, codec)
    }

    #[test]
    fn test_no_config_is_noop() {
        let (mut pod, codec) = build_pod(BuildStrategy::Docker(DockerBuildStrategy::default()));
        let before = pod.clone();

        BuildOverrides::with_codec(None, &codec)
            .apply_overrides(&mut pod)
            .unwrap();

        assert_eq!(pod, before);
    }

    #[test]
    fn test_no_config_does_not_decode() {
        let mut pod = Pod::default();
        assert!(BuildOverrides::new(None).apply_overrides(&mut pod).is_ok());
    }

    #[test]
    fn test_decode_failure_leaves_pod_untouched() {
        let config = BuildOverridesConfig {
            annotations: BTreeMap::from([("a".to_string(), "1".to_string())]),
            ..Default::default()
        };
        let mut pod = Pod::default();

        let err = BuildOverrides::with_codec(Some(&config), AnnotationBuildCodec::default())
            .apply_overrides(&mut pod)
            .unwrap_err();

        assert!(matches!(err, OverrideError::CarrierMissing(_)));
        assert_eq!(pod, Pod::default());
    }

    #[test]
    fn test_source_force_pull() {
        let (mut pod, codec) = build_pod(BuildStrategy::Source(SourceBuildStrategy::default()));
        let config = BuildOverridesConfig {
            force_pull: Some(true),
            ..Default::default()
        };

        BuildOverrides::with_codec(Some(&config), &codec)
            .apply_overrides(&mut pod)
            .unwrap();

        let build = codec.get_build_from_pod(&pod).unwrap();
        assert!(matches!(
            build.spec.strategy,
            BuildStrategy::Source(SourceBuildStrategy { force_pull: true, .. })
        ));
        let container = &pod.spec.as_ref().unwrap().containers[0];
        assert_eq!(container.image_pull_policy.as_deref(), Some("Never"));
    }

    #[test]
    fn test_custom_force_pull_true_sets_always() {
        let (mut pod, codec) = build_pod(BuildStrategy::Custom(CustomBuildStrategy::default()));
        let config = BuildOverridesConfig {
            force_pull: Some(true),
            ..Default::default()
        };

        BuildOverrides::with_codec(Some(&config), &codec)
            .apply_overrides(&mut pod)
            .unwrap();

        let build = codec.get_build_from_pod(&pod).unwrap();
        assert_eq!(build.spec.strategy.strategy_type(), "Custom");
        assert!(build.spec.strategy.force_pull());
        let container = &pod.spec.as_ref().unwrap().containers[0];
        assert_eq!(container.image_pull_policy.as_deref(), Some("Always"));
    }

    #[test]
    fn test_labels_merge_into_build_output() {
        let (mut pod, codec) = build_pod(BuildStrategy::Docker(DockerBuildStrategy::default()));
        let config = BuildOverridesConfig {
            image_labels: vec![ImageLabel::new("A", "1"), ImageLabel::new("A", "2")],
            ..Default::default()
        };

        BuildOverrides::with_codec(Some(&config), &codec)
            .apply_overrides(&mut pod)
            .unwrap();

        let build = codec.get_build_from_pod(&pod).unwrap();
        assert_eq!(build.spec.output.image_labels, vec![ImageLabel::new("A", "2")]);
    }

    #[test]
    fn test_only_os_key_allocates_empty_selector() {
        let (mut pod, codec) = build_pod(BuildStrategy::Docker(DockerBuildStrategy::default()));
        let config = BuildOverridesConfig {
            node_selector: BTreeMap::from([(LABEL_OS_STABLE.to_string(), "windows".to_string())]),
            ..Default::default()
        };

        BuildOverrides::with_codec(Some(&config), &codec)
            .apply_overrides(&mut pod)
            .unwrap();

        let selector = pod.spec.unwrap().node_selector.unwrap();
        assert!(selector.is_empty());
    }

    #[test]
    fn test_existing_os_key_is_kept() {
        let (mut pod, codec) = build_pod(BuildStrategy::Docker(DockerBuildStrategy::default()));
        pod.spec.as_mut().unwrap().node_selector = Some(BTreeMap::from([(
            LABEL_OS_STABLE.to_string(),
            "linux".to_string(),
        )]));
        let config = BuildOverridesConfig {
            node_selector: BTreeMap::from([
                (LABEL_OS_STABLE.to_string(), "windows".to_string()),
                ("zone".to_string(), "east".to_string()),
            ]),
            ..Default::default()
        };

        BuildOverrides::with_codec(Some(&config), &codec)
            .apply_overrides(&mut pod)
            .unwrap();

        let selector = pod.spec.unwrap().node_selector.unwrap();
        assert_eq!(selector.get(LABEL_OS_STABLE).map(String::as_str), Some("linux"));
        assert_eq!(selector.get("zone").map(String::as_str), Some("east"));
    }

    #[test]
    fn test_annotations_overwrite() {
        let (mut pod, codec) = build_pod(BuildStrategy::Docker(DockerBuildStrategy::default()));
        pod.metadata
            .annotations
            .as_mut()
            .unwrap()
            .insert("team".to_string(), "apps".to_string());
        let config = BuildOverridesConfig {
            annotations: BTreeMap::from([
                ("team".to_string(), "builds".to_string()),
                ("cost-center".to_string(), "42".to_string()),
            ]),
            ..Default::default()
        };

        BuildOverrides::with_codec(Some(&config), &codec)
            .apply_overrides(&mut pod)
            .unwrap();

        let annotations = pod.metadata.annotations.as_ref().unwrap();
        assert_eq!(annotations.get("team").map(String::as_str), Some("builds"));
        assert_eq!(annotations.get("cost-center").map(String::as_str), Some("42"));
        assert!(annotations.contains_key(codec.key()));
    }

    #[test]
    fn test_tolerations_replace_and_preserve() {
        let (mut pod, codec) = build_pod(BuildStrategy::Docker(DockerBuildStrategy::default()));
        pod.spec.as_mut().unwrap().tolerations = Some(vec![toleration("t1")]);

        let empty = BuildOverridesConfig {
            force_pull: Some(false),
            ..Default::default()
        };
        BuildOverrides::with_codec(Some(&empty), &codec)
            .apply_overrides(&mut pod)
            .unwrap();
        assert_eq!(
            pod.spec.as_ref().unwrap().tolerations,
            Some(vec![toleration("t1")])
        );

        let config = BuildOverridesConfig {
            tolerations: vec![toleration("t2"), toleration("t3")],
            ..Default::default()
        };
        BuildOverrides::with_codec(Some(&config), &codec)
            .apply_overrides(&mut pod)
            .unwrap();
        assert_eq!(
            pod.spec.as_ref().unwrap().tolerations,
            Some(vec![toleration("t2"), toleration("t3")])
        );
    }
}
