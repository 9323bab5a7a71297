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

use crate::domain::build::strategy::BuildStrategy;
use crate::infrastructure::constants::{BUILD_API_VERSION, BUILD_KIND};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `build.openshift.io/v1` Build as carried inside a build pod.
///
/// Only the fields the override policy touches are modelled; everything else is kept
/// verbatim so re-encoding the build does not lose content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub metadata: ObjectMeta,

    pub spec: BuildSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpec {
    pub strategy: BuildStrategy,

    #[serde(default)]
    pub output: BuildOutput,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_labels: Vec<ImageLabel>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLabel {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
}

impl ImageLabel {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Build {
    pub fn new(namespace: &str, name: &str, strategy: BuildStrategy) -> Self {
        Self {
            api_version: Some(BUILD_API_VERSION.to_string()),
            kind: Some(BUILD_KIND.to_string()),
            metadata: ObjectMeta {
                namespace: Some(namespace.to_string()),
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec: BuildSpec {
                strategy,
                output: BuildOutput::default(),
                extra: Map::new(),
            },
            status: None,
        }
    }

    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::build::strategy::CustomBuildStrategy;
    use serde_json::json;

    #[test]
    fn test_build_decodes_openshift_document() {
        let build: Build = serde_json::from_value(json!({
            "kind": "Build",
            "apiVersion": "build.openshift.io/v1",
            "metadata": {"name": "app-1", "namespace": "proj"},
            "spec": {
                "serviceAccount": "builder",
                "source": {"type": "Git", "git": {"uri": "https://example.com/app.git"}},
                "strategy": {"type": "Custom", "customStrategy": {"from": {"kind": "DockerImage", "name": "builder:latest"}}},
                "output": {
                    "to": {"kind": "ImageStreamTag", "name": "app:latest"},
                    "imageLabels": [{"name": "vendor", "value": "acme"}]
                }
            },
            "status": {"phase": "New"}
        }))
        .unwrap();

        assert_eq!(build.namespace(), "proj");
        assert_eq!(build.name(), "app-1");
        assert!(matches!(build.spec.strategy, BuildStrategy::Custom(_)));
        assert_eq!(
            build.spec.output.image_labels,
            vec![ImageLabel::new("vendor", "acme")]
        );
        assert!(build.spec.extra.contains_key("source"));
        assert!(build.spec.output.extra.contains_key("to"));
    }

    #[test]
    fn test_build_reencodes_uninterpreted_fields() {
        let document = json!({
            "kind": "Build",
            "apiVersion": "build.openshift.io/v1",
            "metadata": {"name": "app-1", "namespace": "proj"},
            "spec": {
                "serviceAccount": "builder",
                "strategy": {"type": "Custom", "customStrategy": {"forcePull": true}},
                "output": {"pushSecret": {"name": "push"}}
            }
        });

        let build: Build = serde_json::from_value(document.clone()).unwrap();
        assert_eq!(serde_json::to_value(&build).unwrap(), document);
    }

    #[test]
    fn test_new_build_has_identity() {
        let build = Build::new(
            "proj",
            "app-2",
            BuildStrategy::Custom(CustomBuildStrategy::default()),
        );

        assert_eq!(build.api_version.as_deref(), Some(BUILD_API_VERSION));
        assert_eq!(build.kind.as_deref(), Some(BUILD_KIND));
        assert_eq!(build.namespace(), "proj");
        assert_eq!(build.name(), "app-2");
    }
}
