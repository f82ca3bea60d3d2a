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

//! Arealog is a console and session file logger organized around *areas*, named subsystems
//! that can be filtered with wildcard patterns and switched on and off at runtime.
//!
//! # Overview
//!
//! A [`Manager`] owns the configuration, the area registry and the sinks. [`Logger`]s created
//! from it format messages with positional `{}` arguments, lay every line out with a template
//! such as `[{time:format=HH:mm:ss}] [{level}]: {message}`, write it to the console and, when
//! enabled, hand it to a background writer that keeps one log file per session with optional
//! gzip compression and retention.
//!
//! # Examples
//!
//! ```
//! use arealog::Manager;
//! use arealog::Value;
//! use arealog::filter::LogArea;
//!
//! let manager = Manager::builder()
//!     .layout("[{level}] {area}: {message}")
//!     .color(false)
//!     .build()
//!     .unwrap();
//! manager.register_area(LogArea::new("net"));
//!
//! let logger = manager.logger("server");
//! logger.log(&arealog::Level::INFO, Some("net"), "bound to {}", &[Value::from("0.0.0.0:80")]);
//! arealog::warn!(logger, area: "net", "{} retries left", 2);
//!
//! manager.disable_area("net");
//! arealog::info!(logger, area: "net", "not shown");
//! ```
//!
//! Session files:
//!
//! ```no_run
//! use arealog::Manager;
//! use arealog::config::FileConfig;
//!
//! let manager = Manager::builder()
//!     .file(FileConfig {
//!         enabled: true,
//!         directory: "logs".into(),
//!         ..FileConfig::default()
//!     })
//!     .build()
//!     .unwrap();
//! manager.default_logger().info("written to the console and logs/log_<date>.log", &[]);
//! manager.shutdown();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod color;
pub mod config;
pub mod filter;
pub mod format;
pub mod layout;
pub mod record;
pub mod report;
pub mod trace;
pub mod trap;

mod error;
mod level;
mod logger;
mod macros;

pub use self::color::Rgb;
pub use self::config::Config;
pub use self::error::Error;
pub use self::format::Value;
pub use self::level::Level;
pub use self::logger::*;
pub use self::report::ErrorReport;
pub use self::trace::CallSite;
pub use self::trap::DefaultTrap;
pub use self::trap::Trap;
