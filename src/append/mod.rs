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

//! Sinks for rendered log lines.

use std::fmt;
use std::sync::Arc;

pub mod file;
mod stdio;
mod testing;

pub use self::file::FileHandler;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::testing::Testing;

/// A sink that accepts fully rendered lines.
///
/// Lines arrive without a trailing newline; the sink terminates them.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Writes a single line.
    fn append(&self, line: &str) -> anyhow::Result<()>;

    /// Flushes any buffered lines.
    fn flush(&self) {}
}

impl<T: Append> Append for Arc<T> {
    fn append(&self, line: &str) -> anyhow::Result<()> {
        (**self).append(line)
    }

    fn flush(&self) {
        (**self).flush()
    }
}
