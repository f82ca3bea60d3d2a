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

//! The diagnostic side channel.
//!
//! Anything that goes wrong while a line is rendered or written ends up in a [`Trap`]. It is
//! never written back into the log itself.

use std::fmt;
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use colored::Colorize;

/// A sink for internal diagnostics.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Reports an error that was handled locally.
    fn trap(&self, err: &anyhow::Error);

    /// Reports a lifecycle note, such as a new session file being created.
    fn notice(&self, _message: &str) {}
}

/// A trap that sends errors to standard error if possible.
///
/// The `[arealog]` tag is colored when the terminal allows it. If standard error is not
/// available, it does nothing.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct DefaultTrap {}

impl Trap for DefaultTrap {
    fn trap(&self, err: &anyhow::Error) {
        let _ = writeln!(io::stderr(), "{} {err:#}", "[arealog]".red());
    }

    fn notice(&self, message: &str) {
        let _ = writeln!(io::stderr(), "{} {message}", "[arealog]".dimmed());
    }
}

/// Forwards to another trap, dropping notices while muted. Errors always pass.
#[derive(Debug)]
pub(crate) struct MuteGate {
    inner: Arc<dyn Trap>,
    muted: AtomicBool,
}

impl MuteGate {
    pub(crate) fn new(inner: Arc<dyn Trap>, muted: bool) -> Self {
        Self {
            inner,
            muted: AtomicBool::new(muted),
        }
    }

    pub(crate) fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    pub(crate) fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }
}

impl Trap for MuteGate {
    fn trap(&self, err: &anyhow::Error) {
        self.inner.trap(err);
    }

    fn notice(&self, message: &str) {
        if !self.is_muted() {
            self.inner.notice(message);
        }
    }
}
