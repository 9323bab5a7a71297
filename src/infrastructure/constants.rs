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

/// Stable OS identity label recognized by the scheduler
pub const LABEL_OS_STABLE: &str = "kubernetes.io/os";

/// Environment variable carrying the encoded build on build pod containers
pub const BUILD_ENV_VAR: &str = "BUILD";

/// Default annotation carrying the encoded build
pub const BUILD_ANNOTATION_KEY: &str = "build.openshift.io/encoded-build";

/// Build resource identity
pub const BUILD_API_VERSION: &str = "build.openshift.io/v1";
pub const BUILD_KIND: &str = "Build";

/// Image pull policies
pub const PULL_POLICY_ALWAYS: &str = "Always";
pub const PULL_POLICY_IF_NOT_PRESENT: &str = "IfNotPresent";
pub const PULL_POLICY_NEVER: &str = "Never";

/// Build strategy type discriminators
pub const STRATEGY_TYPE_DOCKER: &str = "Docker";
pub const STRATEGY_TYPE_SOURCE: &str = "Source";
pub const STRATEGY_TYPE_CUSTOM: &str = "Custom";

/// Resource kinds used in error reporting
pub const RESOURCE_TYPE_POD: &str = "Pod";
