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

/// The error type of arealog.
///
/// Only construction-time problems and capability mismatches surface as an [`Error`]. Failures
/// while rendering or writing a log line are reported to the [`Trap`](crate::trap::Trap) instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to perform IO action: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid area filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid color '{0}'")]
    InvalidColor(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("this logger implementation does not support log areas")]
    AreasUnsupported,
}
