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

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use super::Manager;
use crate::Error;
use crate::Level;
use crate::append::Append;
use crate::append::Stdout;
use crate::format::Value;
use crate::format::format;
use crate::report::ErrorReport;
use crate::trace::CallSite;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// The logging capabilities shared by [`Logger`] and [`PlainLogger`].
///
/// Implementations without area support return [`Error::AreasUnsupported`] from the area-aware
/// methods.
pub trait Log: Send + Sync {
    /// Logs a message without an explicit area.
    fn log(&self, level: &Level, template: &str, args: &[Value]);

    fn log_area(
        &self,
        level: &Level,
        area: &str,
        template: &str,
        args: &[Value],
    ) -> Result<(), Error> {
        let _ = (level, area, template, args);
        Err(Error::AreasUnsupported)
    }

    fn set_default_area(&mut self, area: Option<String>) -> Result<(), Error> {
        let _ = area;
        Err(Error::AreasUnsupported)
    }

    fn default_area(&self) -> Result<Option<&str>, Error> {
        Err(Error::AreasUnsupported)
    }
}

/// A handle for writing records through a [`Manager`].
///
/// Loggers are cheap to clone and can be shared across threads. Each one carries the prefix
/// rendered by `{prefix}` and an optional area used when a call names none.
///
/// ```
/// use arealog::Manager;
/// use arealog::Value;
///
/// let manager = Manager::builder().color(false).build().unwrap();
/// let logger = manager.logger("app").with_default_area("startup");
/// logger.info("listening on port {}", &[Value::from(8080)]);
/// ```
#[derive(Clone)]
pub struct Logger {
    manager: Arc<Manager>,
    prefix: String,
    default_area: Option<String>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("default_area", &self.default_area)
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub(super) fn new(manager: Arc<Manager>, prefix: String) -> Self {
        Self {
            manager,
            prefix,
            default_area: None,
        }
    }

    /// Returns a copy of this logger that tags calls without an area with `area`.
    pub fn with_default_area(mut self, area: impl Into<String>) -> Self {
        self.default_area = Some(area.into());
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn manager(&self) -> &Arc<Manager> {
        &self.manager
    }

    fn resolve_area<'a>(&'a self, area: Option<&'a str>) -> Option<&'a str> {
        area.or(self.default_area.as_deref())
    }

    /// Whether a call at `level` in `area` (or the default area) would produce output.
    pub fn is_enabled(&self, level: &Level, area: Option<&str>) -> bool {
        self.manager.is_enabled(level, self.resolve_area(area))
    }

    /// Formats `template` with `args` and writes one line per line of the result.
    ///
    /// Nothing is formatted when the record is filtered out.
    #[track_caller]
    pub fn log(&self, level: &Level, area: Option<&str>, template: &str, args: &[Value]) {
        self.dispatch(None, level, area, template, args, Location::caller());
    }

    #[doc(hidden)]
    #[track_caller]
    pub fn log_at(
        &self,
        call_site: CallSite,
        level: &Level,
        area: Option<&str>,
        template: &str,
        args: &[Value],
    ) {
        self.dispatch(Some(call_site), level, area, template, args, Location::caller());
    }

    fn dispatch(
        &self,
        call_site: Option<CallSite>,
        level: &Level,
        area: Option<&str>,
        template: &str,
        args: &[Value],
        location: &'static Location<'static>,
    ) {
        let area = self.resolve_area(area);
        if !self.manager.is_enabled(level, area) {
            return;
        }
        let message = format(template, args);
        self.manager
            .write(level, area, &self.prefix, &message, call_site, location);
    }

    #[track_caller]
    pub fn fatal(&self, template: &str, args: &[Value]) {
        self.log(&Level::FATAL, None, template, args);
    }

    #[track_caller]
    pub fn error(&self, template: &str, args: &[Value]) {
        self.log(&Level::ERROR, None, template, args);
    }

    #[track_caller]
    pub fn warn(&self, template: &str, args: &[Value]) {
        self.log(&Level::WARN, None, template, args);
    }

    #[track_caller]
    pub fn info(&self, template: &str, args: &[Value]) {
        self.log(&Level::INFO, None, template, args);
    }

    #[track_caller]
    pub fn debug(&self, template: &str, args: &[Value]) {
        self.log(&Level::DEBUG, None, template, args);
    }

    #[track_caller]
    pub fn verbose(&self, template: &str, args: &[Value]) {
        self.log(&Level::VERBOSE, None, template, args);
    }

    #[track_caller]
    pub fn stacktrace(&self, template: &str, args: &[Value]) {
        self.log(&Level::STACKTRACE, None, template, args);
    }

    /// Dumps an error report: its kind and message, at most `stacktrace_limit` frames per error,
    /// then its suppressed errors and causes.
    ///
    /// Logs `error is null` when there is no report.
    #[track_caller]
    pub fn log_error(&self, level: &Level, report: Option<&ErrorReport>) {
        let area = self.resolve_area(None);
        if !self.manager.is_enabled(level, area) {
            return;
        }
        let message = match report {
            Some(report) => report
                .render(self.manager.config().stacktrace_limit)
                .join("\n"),
            None => "error is null".to_string(),
        };
        self.manager
            .write(level, area, &self.prefix, &message, None, Location::caller());
    }

    /// Same as [`Logger::log_error`] for an [`anyhow::Error`] and its chain of causes.
    #[track_caller]
    pub fn log_anyhow(&self, level: &Level, err: &anyhow::Error) {
        self.log_error(level, Some(&ErrorReport::from_anyhow(err)));
    }
}

impl Log for Logger {
    #[track_caller]
    fn log(&self, level: &Level, template: &str, args: &[Value]) {
        Logger::log(self, level, None, template, args);
    }

    #[track_caller]
    fn log_area(
        &self,
        level: &Level,
        area: &str,
        template: &str,
        args: &[Value],
    ) -> Result<(), Error> {
        Logger::log(self, level, Some(area), template, args);
        Ok(())
    }

    fn set_default_area(&mut self, area: Option<String>) -> Result<(), Error> {
        self.default_area = area;
        Ok(())
    }

    fn default_area(&self) -> Result<Option<&str>, Error> {
        Ok(self.default_area.as_deref())
    }
}

/// A logger without areas, layouts or filters.
///
/// Every line is written as the bracketed level name padded to 14 columns followed by the
/// formatted message, for example `[WARN]:       disk almost full`.
#[derive(Debug, Clone)]
pub struct PlainLogger {
    sink: Arc<dyn Append>,
    trap: Arc<dyn Trap>,
}

impl Default for PlainLogger {
    fn default() -> Self {
        Self::new(Arc::new(Stdout::default()))
    }
}

impl PlainLogger {
    pub fn new(sink: Arc<dyn Append>) -> Self {
        Self {
            sink,
            trap: Arc::new(DefaultTrap::default()),
        }
    }
}

impl Log for PlainLogger {
    fn log(&self, level: &Level, template: &str, args: &[Value]) {
        let tag = format!("[{}]:", level.name());
        let line = format!("{tag:<14}{}", format(template, args));
        if let Err(err) = self.sink.append(&line) {
            self.trap.trap(&err.context("failed to write plain log line"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::append::Testing;

    fn setup() -> (Arc<Testing>, Logger) {
        let sink = Arc::new(Testing::default());
        let manager = Manager::builder()
            .console(sink.clone())
            .color(false)
            .layout("{level}|{area}|{prefix}|{message}")
            .build()
            .unwrap();
        (sink, manager.logger("test"))
    }

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|line| crate::color::strip_ansi(&line).into_owned())
            .collect()
    }

    #[test]
    fn default_area_applies_when_none_given() {
        let (sink, logger) = setup();
        let logger = logger.with_default_area("net");
        logger.info("a", &[]);
        logger.log(&Level::INFO, Some("db"), "b", &[]);
        assert_eq!(plain(sink.take()), vec!["INFO|net|test|a", "INFO|db|test|b"]);
    }

    #[test]
    fn default_area_is_filtered() {
        let (sink, logger) = setup();
        logger.manager().set_area_filter_patterns(["db"], false).unwrap();
        logger.clone().with_default_area("net").info("hidden", &[]);
        logger.info("no area is never filtered by area", &[]);
        assert_eq!(plain(sink.take()), vec!["INFO||test|no area is never filtered by area"]);
    }

    #[test]
    fn error_reports_are_dumped_line_by_line() {
        let (sink, logger) = setup();
        logger.manager().set_stacktrace_limit(1);
        let report = ErrorReport::new("boom")
            .with_kind("IoError")
            .with_frames(["main.rs:1", "main.rs:2"])
            .with_cause(ErrorReport::new("root").with_kind("Root"));
        logger.log_error(&Level::ERROR, Some(&report));
        logger.log_error(&Level::ERROR, None);
        assert_eq!(
            plain(sink.take()),
            vec![
                "ERROR||test|IoError: boom",
                "ERROR||test|    at main.rs:1",
                "ERROR||test|    ... 1 more",
                "ERROR||test|Caused by: Root: root",
                "ERROR||test|error is null",
            ]
        );
    }

    #[test]
    fn trait_object_area_calls() {
        let (sink, logger) = setup();
        let mut loggers: Vec<Box<dyn Log>> = vec![
            Box::new(logger),
            Box::new(PlainLogger::new(sink.clone())),
        ];

        assert!(loggers[0].log_area(&Level::WARN, "io", "x", &[]).is_ok());
        assert!(loggers[0].set_default_area(Some("io".to_string())).is_ok());
        assert_eq!(loggers[0].default_area().unwrap(), Some("io"));

        assert!(matches!(
            loggers[1].log_area(&Level::WARN, "io", "x", &[]),
            Err(Error::AreasUnsupported)
        ));
        assert!(matches!(
            loggers[1].set_default_area(None),
            Err(Error::AreasUnsupported)
        ));
        assert!(loggers[1].default_area().is_err());

        loggers[1].log(&Level::FATAL, "code {}", &[Value::from(7)]);
        assert_eq!(
            plain(sink.take()),
            vec!["WARN|io|test|x", "[FATAL]:      code 7"]
        );
    }
}
