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

//! Session log files written from a background thread.
//!
//! Every time the writer starts a session it first compresses the `*.log` files left in the
//! directory (if enabled), then evicts the oldest files so that the new session keeps the
//! directory within its file limit, and finally opens `<pattern>.log` with `{date}` replaced by
//! the current local time.

pub use self::handler::FileHandler;

mod handler;
mod session;
mod worker;

#[derive(Debug)]
enum Message {
    Line(String),
    Shutdown,
}
