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

use crate::shared::error::OverrideError;
use k8s_openapi::api::core::v1::Pod;
use std::path::PathBuf;

/// Load a pod manifest (YAML or JSON) from disk.
pub fn load_pod_from_file(file_path: &str) -> Result<Pod, OverrideError> {
    let path = resolve_manifest_path(file_path)?;

    if !path.exists() {
        return Err(OverrideError::InvalidResource(format!(
            "Pod manifest file does not exist: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| {
        OverrideError::InvalidResource(format!(
            "Failed to read pod manifest file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_pod_manifest(&content).map_err(|e| match e {
        OverrideError::InvalidResource(msg) => {
            OverrideError::InvalidResource(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

pub fn parse_pod_manifest(content: &str) -> Result<Pod, OverrideError> {
    let pod: Pod = serde_yaml::from_str(content).map_err(|e| {
        OverrideError::InvalidResource(format!("Failed to parse pod manifest: {}", e))
    })?;

    if pod.spec.is_none() {
        return Err(OverrideError::InvalidResource(
            "Pod manifest is missing spec section".to_string(),
        ));
    }

    Ok(pod)
}

pub fn resolve_manifest_path(path: &str) -> Result<PathBuf, OverrideError> {
    let path = PathBuf::from(path);

    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()
            .map_err(|e| {
                OverrideError::ConfigError(format!("Cannot get current directory: {}", e))
            })?
            .join(path))
    }
}
