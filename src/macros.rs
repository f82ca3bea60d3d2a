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

//! Logging macros that capture the calling module, function and line.
//!
//! Arguments are converted into [`Value`](crate::Value)s only when the record passes the filters.
//!
//! ```
//! use arealog::Manager;
//! use arealog::info;
//! use arealog::warn;
//!
//! let manager = Manager::builder().color(false).build().unwrap();
//! let logger = manager.logger("app");
//!
//! info!(logger, "hello {}", "world");
//! warn!(logger, area: "net", "retrying in {}s", 5);
//! ```

/// Logs at an explicit [`Level`](crate::Level).
///
/// ```
/// # let logger = arealog::Manager::builder().build().unwrap().logger("app");
/// arealog::log!(logger, arealog::Level::WARN, "{} items left", 3);
/// arealog::log!(logger, arealog::Level::INFO, area: "db", "connected");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, area: $area:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        let logger: &$crate::Logger = &$logger;
        let level: &$crate::Level = &$level;
        let area = &$area;
        let area: &str = ::core::convert::AsRef::<str>::as_ref(area);
        if logger.is_enabled(level, ::core::option::Option::Some(area)) {
            logger.log_at(
                $crate::__call_site!(),
                level,
                ::core::option::Option::Some(area),
                $template,
                &[$($crate::Value::from($arg)),*],
            );
        }
    }};
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {{
        let logger: &$crate::Logger = &$logger;
        let level: &$crate::Level = &$level;
        if logger.is_enabled(level, ::core::option::Option::None) {
            logger.log_at(
                $crate::__call_site!(),
                level,
                ::core::option::Option::None,
                $template,
                &[$($crate::Value::from($arg)),*],
            );
        }
    }};
}

/// Logs at [`Level::FATAL`](crate::Level::FATAL). See [`log!`].
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::FATAL, $($rest)+)
    };
}

/// Logs at [`Level::ERROR`](crate::Level::ERROR). See [`log!`].
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($rest)+)
    };
}

/// Logs at [`Level::WARN`](crate::Level::WARN). See [`log!`].
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::WARN, $($rest)+)
    };
}

/// Logs at [`Level::INFO`](crate::Level::INFO). See [`log!`].
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($rest)+)
    };
}

/// Logs at [`Level::DEBUG`](crate::Level::DEBUG). See [`log!`].
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($rest)+)
    };
}

/// Logs at [`Level::VERBOSE`](crate::Level::VERBOSE). See [`log!`].
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::VERBOSE, $($rest)+)
    };
}

/// Logs at [`Level::STACKTRACE`](crate::Level::STACKTRACE). See [`log!`].
#[macro_export]
macro_rules! stacktrace {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::STACKTRACE, $($rest)+)
    };
}
