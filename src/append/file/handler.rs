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

use std::fs;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use crossbeam_channel::bounded;
use crossbeam_channel::unbounded;
use parking_lot::Mutex;

use super::Message;
use super::session::SessionPolicy;
use super::worker::Worker;
use crate::Error;
use crate::append::Append;
use crate::config::FileConfig;
use crate::trap::Trap;

const THREAD_NAME: &str = "arealog-file-writer";

/// Persists lines to session log files from a dedicated writer thread.
///
/// The handler is either disabled or running a worker. Lines enqueued while disabled are
/// dropped. Writing never blocks the caller: lines go through an unbounded queue and the worker
/// appends them in order.
///
/// Dropping the handler shuts the worker down, waiting at most the configured grace period for
/// queued lines to be written.
#[derive(Debug)]
pub struct FileHandler {
    state: Mutex<Option<Running>>,
    trap: Arc<dyn Trap>,
}

#[derive(Debug)]
struct Running {
    sender: Sender<Message>,
    done: Receiver<()>,
    abort: Arc<AtomicBool>,
    handle: JoinHandle<()>,
    shutdown_timeout: Duration,
}

impl FileHandler {
    pub fn new(trap: Arc<dyn Trap>) -> Self {
        Self {
            state: Mutex::new(None),
            trap,
        }
    }

    /// Starts the writer thread, which opens the first session before taking lines.
    ///
    /// Does nothing if the handler is already running.
    pub fn enable(&self, config: &FileConfig) -> Result<(), Error> {
        let mut state = self.state.lock();
        if state.is_some() {
            return Ok(());
        }

        fs::create_dir_all(&config.directory)?;
        self.trap.notice(&format!(
            "initialized log file handler with directory: {}",
            config.directory.display()
        ));

        let (sender, receiver) = unbounded();
        let (done_sender, done) = bounded(1);
        let abort = Arc::new(AtomicBool::new(false));
        let worker = Worker::new(
            SessionPolicy::new(config),
            receiver,
            done_sender,
            abort.clone(),
            self.trap.clone(),
        );
        let handle = worker.make_thread(THREAD_NAME.to_string())?;

        *state = Some(Running {
            sender,
            done,
            abort,
            handle,
            shutdown_timeout: config.shutdown_timeout,
        });
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.state.lock().is_some()
    }

    /// Queues a line for the current session file. Dropped if the handler is disabled.
    pub fn enqueue(&self, line: String) {
        if let Some(running) = self.state.lock().as_ref() {
            let _ = running.sender.send(Message::Line(line));
        }
    }

    /// Stops the writer thread after it has written everything queued so far.
    ///
    /// Waits at most the configured shutdown timeout. If the worker is still busy afterwards it is
    /// told to drop the remaining lines and left to finish on its own. Returns `false` in that
    /// case. Calling this on a disabled handler does nothing and returns `true`.
    pub fn disable(&self) -> bool {
        let Some(running) = self.state.lock().take() else {
            return true;
        };

        // the worker only stops once it reaches this message, after every line queued before it
        let _ = running.sender.send(Message::Shutdown);
        match running.done.recv_timeout(running.shutdown_timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                let _ = running.handle.join();
                true
            }
            Err(RecvTimeoutError::Timeout) => {
                running.abort.store(true, Ordering::Release);
                self.trap.notice(&format!(
                    "log file writer did not finish within {:?}, dropping pending lines",
                    running.shutdown_timeout
                ));
                false
            }
        }
    }

    /// Same as [`FileHandler::disable`].
    pub fn shutdown(&self) -> bool {
        self.disable()
    }
}

impl Append for FileHandler {
    fn append(&self, line: &str) -> anyhow::Result<()> {
        self.enqueue(line.to_string());
        Ok(())
    }
}

impl Drop for FileHandler {
    fn drop(&mut self) {
        self.disable();
    }
}
