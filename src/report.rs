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

//! Error reports logged through [`Logger::log_error`](crate::Logger::log_error).

use std::backtrace::BacktraceStatus;
use std::error::Error as StdError;

/// A printable error with its stack frames, cause and suppressed errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    kind: Option<String>,
    message: String,
    frames: Vec<String>,
    cause: Option<Box<ErrorReport>>,
    suppressed: Vec<ErrorReport>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_frames<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frames = frames.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cause(mut self, cause: ErrorReport) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn with_suppressed(mut self, suppressed: ErrorReport) -> Self {
        self.suppressed.push(suppressed);
        self
    }

    /// Builds a report from an error and its `source()` chain.
    ///
    /// The kind is the type name of `E`; causes are reached through `dyn Error` and have none.
    pub fn from_error<E: StdError + 'static>(err: &E) -> Self {
        let kind = std::any::type_name::<E>();
        let kind = kind.rsplit("::").next().unwrap_or(kind);
        let mut report = Self::new(err.to_string()).with_kind(kind);
        report.cause = err.source().map(|source| Box::new(Self::from_source(source)));
        report
    }

    fn from_source(err: &(dyn StdError + 'static)) -> Self {
        let mut report = Self::new(err.to_string());
        report.cause = err.source().map(|source| Box::new(Self::from_source(source)));
        report
    }

    /// Builds a report from an [`anyhow::Error`], including its backtrace when one was captured.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let mut chain = err.chain().map(|e| Self::new(e.to_string())).collect::<Vec<_>>();
        let mut report = match chain.pop() {
            Some(root) => chain
                .into_iter()
                .rev()
                .fold(root, |cause, outer| outer.with_cause(cause)),
            None => Self::new(err.to_string()),
        };

        let backtrace = err.backtrace();
        if backtrace.status() == BacktraceStatus::Captured {
            report.frames = parse_backtrace(&backtrace.to_string());
        }
        report
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn cause(&self) -> Option<&ErrorReport> {
        self.cause.as_deref()
    }

    pub fn suppressed(&self) -> &[ErrorReport] {
        &self.suppressed
    }

    /// Renders the report as lines, listing at most `limit` frames per error.
    pub fn render(&self, limit: usize) -> Vec<String> {
        let mut lines = vec![];
        self.render_into("", limit, &mut lines);
        lines
    }

    fn render_into(&self, heading: &str, limit: usize, lines: &mut Vec<String>) {
        match &self.kind {
            Some(kind) => lines.push(format!("{heading}{kind}: {}", self.message)),
            None => lines.push(format!("{heading}{}", self.message)),
        }

        for frame in self.frames.iter().take(limit) {
            lines.push(format!("    at {frame}"));
        }
        if self.frames.len() > limit {
            lines.push(format!("    ... {} more", self.frames.len() - limit));
        }

        for suppressed in &self.suppressed {
            suppressed.render_into("Suppressed: ", limit, lines);
        }
        if let Some(cause) = &self.cause {
            cause.render_into("Caused by: ", limit, lines);
        }
    }
}

// std backtraces print `N: symbol` followed by an optional `at file:line:col` line.
fn parse_backtrace(text: &str) -> Vec<String> {
    let mut frames: Vec<String> = vec![];
    for line in text.lines().map(str::trim) {
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(last) = frames.last_mut() {
                last.push_str(" (");
                last.push_str(location);
                last.push(')');
            }
        } else if let Some((index, symbol)) = line.split_once(": ") {
            if index.chars().all(|c| c.is_ascii_digit()) {
                frames.push(symbol.to_string());
            }
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn caps_frames_and_counts_the_rest() {
        let report = ErrorReport::new("boom")
            .with_kind("IllegalState")
            .with_frames(["a", "b", "c", "d"]);
        assert_eq!(
            report.render(2),
            ["IllegalState: boom", "    at a", "    at b", "    ... 2 more"]
        );
    }

    #[test]
    fn renders_suppressed_then_cause() {
        let report = ErrorReport::new("top")
            .with_frames(["main"])
            .with_suppressed(ErrorReport::new("closing failed"))
            .with_cause(ErrorReport::new("disk full").with_frames(["write", "flush"]));
        assert_eq!(
            report.render(1),
            [
                "top",
                "    at main",
                "Suppressed: closing failed",
                "Caused by: disk full",
                "    at write",
                "    ... 1 more",
            ]
        );
    }

    #[test]
    fn std_error_chain() {
        let err = Outer(std::io::Error::other("socket closed"));
        let report = ErrorReport::from_error(&err);
        assert_eq!(report.kind(), Some("Outer"));
        assert_eq!(report.message(), "request failed");
        assert_eq!(report.cause().map(ErrorReport::message), Some("socket closed"));
    }

    #[test]
    fn anyhow_context_chain() {
        let err = anyhow::anyhow!("root cause").context("while loading").context("startup");
        let report = ErrorReport::from_anyhow(&err);
        let lines = report.render(0);
        assert_eq!(lines[0], "startup");
        assert!(lines.contains(&"Caused by: while loading".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Caused by: root cause"));
    }

    #[test]
    fn backtrace_text_is_parsed_into_frames() {
        let text = "   0: app::run\n             at ./src/main.rs:10:5\n   1: main\n";
        assert_eq!(
            parse_backtrace(text),
            ["app::run (./src/main.rs:10:5)", "main"]
        );
    }
}
