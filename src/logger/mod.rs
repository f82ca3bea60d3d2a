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

//! Loggers and the [`Manager`] they route records through.

pub use self::builder::ManagerBuilder;
pub use self::global::global;
pub use self::global::reset_global;
pub use self::global::set_global;
pub use self::logger::Log;
pub use self::logger::Logger;
pub use self::logger::PlainLogger;
pub use self::manager::Manager;

mod builder;
mod global;
mod logger;
mod manager;
