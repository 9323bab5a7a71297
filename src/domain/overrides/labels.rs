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

use crate::domain::build::ImageLabel;
use tracing::trace;

/// Merge `label` into `labels`.
///
/// Every existing entry with the same name is replaced, duplicates included. The label is
/// appended only when no entry matched.
pub fn override_label(label: ImageLabel, labels: &mut Vec<ImageLabel>) {
    let mut found = false;
    for existing in labels.iter_mut().filter(|l| l.name == label.name) {
        trace!(
            "Replacing label {} (original value {:?}) with new value {:?}",
            existing.name,
            existing.value,
            label.value
        );
        *existing = label.clone();
        found = true;
    }
    if !found {
        labels.push(label);
    }
}
