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

use crate::Level;
use crate::Value;
use crate::global;
use crate::trace::CallSite;

struct LogCrateLogger(());

fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::ERROR,
        log::Level::Warn => Level::WARN,
        log::Level::Info => Level::INFO,
        log::Level::Debug => Level::DEBUG,
        log::Level::Trace => Level::VERBOSE,
    }
}

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        global()
            .default_logger()
            .is_enabled(&map_level(metadata.level()), Some(metadata.target()))
    }

    fn log(&self, record: &log::Record) {
        let logger = global().default_logger();
        let level = map_level(record.level());
        if !logger.is_enabled(&level, Some(record.target())) {
            return;
        }

        let class = record
            .module_path()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or("unknown")
            .to_string();
        let call_site = CallSite::new(class, "unknown", record.line().unwrap_or_default());
        let message = record.args().to_string();
        logger.log_at(
            call_site,
            &level,
            Some(record.target()),
            "{}",
            &[Value::from(message)],
        );
    }

    fn flush(&self) {
        global().flush();
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_logger`] to install a proxy that forwards every record of the
/// log crate to the default logger of the [global](crate::global) manager. The record target
/// is used as the area and `Trace` records are logged as `VERBOSE`.
///
/// This function will set the global maximum log level to `Trace`. To override this, call
/// [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// arealog::bridge::try_setup_log_crate().unwrap();
/// log::info!(target: "startup", "listening on {}", 8080);
/// ```
pub fn try_setup_log_crate() -> Result<(), log::SetLoggerError> {
    static LOGGER: LogCrateLogger = LogCrateLogger(());
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger.
///
/// Same as [`try_setup_log_crate`], but panics if it is called more than once, or if another
/// library has already initialized the log crate global logger.
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate() {
    try_setup_log_crate().expect(
        "arealog::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}
