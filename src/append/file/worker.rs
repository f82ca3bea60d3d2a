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

use std::fs::File;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use anyhow::Context;
use crossbeam_channel::Receiver;
use crossbeam_channel::RecvError;
use crossbeam_channel::Sender;
use jiff::Zoned;

use super::Message;
use super::session::SessionPolicy;
use crate::trap::Trap;

pub(crate) struct Worker {
    policy: SessionPolicy,
    receiver: Receiver<Message>,
    done: Sender<()>,
    abort: Arc<AtomicBool>,
    trap: Arc<dyn Trap>,
    current: Option<(PathBuf, File)>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum WorkerState {
    Continue,
    Shutdown,
    Disconnected,
}

impl Worker {
    pub(crate) fn new(
        policy: SessionPolicy,
        receiver: Receiver<Message>,
        done: Sender<()>,
        abort: Arc<AtomicBool>,
        trap: Arc<dyn Trap>,
    ) -> Worker {
        Self {
            policy,
            receiver,
            done,
            abort,
            trap,
            current: None,
        }
    }

    fn rotate(&mut self) {
        self.current = None;
        match self.policy.start(&Zoned::now(), self.trap.as_ref()) {
            Ok(session) => self.current = Some(session),
            Err(err) => self.trap.trap(&err.context("failed to start new session log file")),
        }
    }

    fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        let missing = match &self.current {
            Some((path, _)) => !path.exists(),
            None => true,
        };
        if missing {
            self.rotate();
        }

        let Some((path, file)) = &mut self.current else {
            // rotation failed and was already reported
            return Ok(());
        };
        let result: io::Result<()> = file
            .write_all(line.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .and_then(|_| file.flush());
        result.with_context(|| format!("failed to write log message to {}", path.display()))
    }

    fn recv(&mut self) -> WorkerState {
        match self.receiver.recv() {
            Ok(Message::Line(line)) => {
                if let Err(err) = self.write_line(&line) {
                    self.trap.trap(&err);
                    self.current = None;
                }
                WorkerState::Continue
            }
            Ok(Message::Shutdown) => WorkerState::Shutdown,
            Err(RecvError) => WorkerState::Disconnected,
        }
    }

    pub(crate) fn make_thread(mut self, name: String) -> io::Result<std::thread::JoinHandle<()>> {
        std::thread::Builder::new().name(name).spawn(move || {
            self.rotate();
            while !self.abort.load(Ordering::Acquire) {
                match self.recv() {
                    WorkerState::Continue => {}
                    WorkerState::Shutdown | WorkerState::Disconnected => break,
                }
            }
            if let Some((_, file)) = &mut self.current {
                if let Err(err) = file.flush() {
                    self.trap.trap(&anyhow::Error::from(err).context("failed to flush"));
                }
            }
            let _ = self.done.try_send(());
        })
    }
}
