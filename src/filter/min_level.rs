// Copyright 2024 FastLabs Developers
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

use crate::Level;

/// A filter that checks if the rank of a level reaches a threshold.
///
/// If the threshold is `0` (`INFO`), `INFO`, `WARN`, `ERROR` and `FATAL` records are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLevel(pub i32);

impl MinLevel {
    pub fn is_level_allowed(&self, level: &Level) -> bool {
        level.rank() >= self.0
    }
}

impl From<&Level> for MinLevel {
    fn from(level: &Level) -> Self {
        MinLevel(level.rank())
    }
}
