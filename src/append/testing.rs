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

use parking_lot::Mutex;

use crate::append::Append;

/// A sink that keeps every line in memory so tests can inspect the output.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use arealog::Manager;
/// use arealog::append::Testing;
///
/// let sink = Arc::new(Testing::default());
/// let manager = Manager::builder().console(sink.clone()).color(false).build().unwrap();
/// manager.logger("app").info("ready", &[]);
/// assert!(sink.lines()[0].ends_with("[INFO]: ready\x1b[0m"));
/// ```
#[derive(Debug, Default)]
pub struct Testing {
    lines: Mutex<Vec<String>>,
}

impl Testing {
    /// Returns a copy of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Removes and returns the captured lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl Append for Testing {
    fn append(&self, line: &str) -> anyhow::Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
