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

//! Build strategy variants
//!
//! A build carries exactly one strategy. On the wire the strategy is a record with a `type`
//! discriminator and one populated variant object (`dockerStrategy`, `sourceStrategy` or
//! `customStrategy`). In memory it is a plain enum, so a build can never hold zero or several
//! variants at once.

use crate::infrastructure::constants::{
    STRATEGY_TYPE_CUSTOM, STRATEGY_TYPE_DOCKER, STRATEGY_TYPE_SOURCE,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerBuildStrategy {
    #[serde(default, skip_serializing_if = "is_false")]
    pub force_pull: bool,

    /// Fields not interpreted here (from, env, dockerfilePath, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBuildStrategy {
    #[serde(default, skip_serializing_if = "is_false")]
    pub force_pull: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBuildStrategy {
    #[serde(default, skip_serializing_if = "is_false")]
    pub force_pull: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BuildStrategyRepr", into = "BuildStrategyRepr")]
pub enum BuildStrategy {
    Docker(DockerBuildStrategy),
    Source(SourceBuildStrategy),
    Custom(CustomBuildStrategy),
}

impl BuildStrategy {
    pub fn strategy_type(&self) -> &'static str {
        match self {
            BuildStrategy::Docker(_) => STRATEGY_TYPE_DOCKER,
            BuildStrategy::Source(_) => STRATEGY_TYPE_SOURCE,
            BuildStrategy::Custom(_) => STRATEGY_TYPE_CUSTOM,
        }
    }

    pub fn force_pull(&self) -> bool {
        match self {
            BuildStrategy::Docker(s) => s.force_pull,
            BuildStrategy::Source(s) => s.force_pull,
            BuildStrategy::Custom(s) => s.force_pull,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildStrategyRepr {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    strategy_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    docker_strategy: Option<DockerBuildStrategy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_strategy: Option<SourceBuildStrategy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_strategy: Option<CustomBuildStrategy>,
}

impl TryFrom<BuildStrategyRepr> for BuildStrategy {
    type Error = String;

    fn try_from(repr: BuildStrategyRepr) -> Result<Self, Self::Error> {
        match (repr.docker_strategy, repr.source_strategy, repr.custom_strategy) {
            (Some(docker), None, None) => Ok(BuildStrategy::Docker(docker)),
            (None, Some(source), None) => Ok(BuildStrategy::Source(source)),
            (None, None, Some(custom)) => Ok(BuildStrategy::Custom(custom)),
            (None, None, None) => Err(format!(
                "build strategy of type {:?} has no docker, source or custom strategy",
                repr.strategy_type.unwrap_or_default()
            )),
            _ => Err("build strategy has more than one populated variant".to_string()),
        }
    }
}

impl From<BuildStrategy> for BuildStrategyRepr {
    fn from(strategy: BuildStrategy) -> Self {
        let mut repr = BuildStrategyRepr {
            strategy_type: Some(strategy.strategy_type().to_string()),
            ..Default::default()
        };
        match strategy {
            BuildStrategy::Docker(s) => repr.docker_strategy = Some(s),
            BuildStrategy::Source(s) => repr.source_strategy = Some(s),
            BuildStrategy::Custom(s) => repr.custom_strategy = Some(s),
        }
        repr
    }
}
