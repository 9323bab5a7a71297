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

//! Build pod utilities

pub mod codec;
pub mod manifest;
pub mod pull_policy;

pub use self::codec::{AnnotationBuildCodec, BuildCodec, EnvBuildCodec};
pub use self::manifest::{load_pod_from_file, parse_pod_manifest};
pub use self::pull_policy::{apply_pull_policy_to_pod, PullPolicy};

use k8s_openapi::api::core::v1::Pod;

/// `namespace/name` of a pod, for log lines.
pub(crate) fn pod_ref(pod: &Pod) -> String {
    format!(
        "{}/{}",
        pod.metadata.namespace.as_deref().unwrap_or_default(),
        pod.metadata.name.as_deref().unwrap_or_default()
    )
}
