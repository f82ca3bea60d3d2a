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

//! Configuration of a [`Manager`](crate::Manager).
//!
//! The crate never reads configuration files itself. Enable the `serde` feature to deserialize
//! a [`Config`] from whatever format the host application uses.

use std::path::PathBuf;
use std::time::Duration;

use crate::Error;

/// The layout used when none is configured.
pub const DEFAULT_LAYOUT: &str =
    "{color:hex=#545454}[{time:format=HH:mm:ss}] [{prefix}]{levelColor} [{level}]: {message}";

/// The configuration of a [`Manager`](crate::Manager).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct Config {
    /// Records with a rank below this value are discarded.
    pub minimum_level: i32,
    /// Discards every record when set.
    pub mute: bool,
    /// Gates every color placeholder.
    pub color: bool,
    /// The layout template of a rendered line.
    pub layout: String,
    /// The prefix of loggers created without an explicit one.
    pub prefix: String,
    /// The maximum number of frames rendered per error dump.
    pub stacktrace_limit: usize,
    /// How names missing from the area registry are treated.
    pub area_mode: AreaMode,
    pub area_filter: AreaFilterConfig,
    pub file: FileConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            minimum_level: 0,
            mute: false,
            color: true,
            layout: DEFAULT_LAYOUT.to_string(),
            prefix: "arealog".to_string(),
            stacktrace_limit: 20,
            area_mode: AreaMode::Wildcard,
            area_filter: AreaFilterConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl Config {
    /// Checks the invariants that cannot be expressed by the types.
    pub fn validate(&self) -> Result<(), Error> {
        if self.layout.is_empty() {
            return Err(Error::InvalidConfig("layout must not be empty".to_string()));
        }
        self.file.validate()
    }
}

/// Controls how areas missing from the registry are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AreaMode {
    /// Unregistered areas are shown.
    #[default]
    Wildcard,
    /// Only registered and enabled areas are shown.
    Strict,
}

/// Wildcard patterns deciding which areas are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct AreaFilterConfig {
    /// Exact names, `*` wildcards or full `^...$` regexes.
    pub patterns: Vec<String>,
    /// Treat `patterns` as the areas to hide instead of the areas to show.
    pub blacklist: bool,
}

impl Default for AreaFilterConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["*".to_string()],
            blacklist: false,
        }
    }
}

/// How old session files are limited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LimitationMode {
    /// Files are never deleted.
    None,
    /// At most `limit` files are kept, the oldest are deleted first.
    #[default]
    Files,
    /// Compressed archives larger than `limit` KiB are deleted right after compression.
    Size,
}

/// Configuration of the session file sink.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct FileConfig {
    pub enabled: bool,
    pub limitation: LimitationMode,
    /// A file count or a size in KiB, depending on `limitation`.
    pub limit: u32,
    /// Gzip the files of previous sessions when a new session starts.
    pub compress: bool,
    pub directory: PathBuf,
    /// The file name without extension. `{date}` is replaced with the session timestamp.
    ///
    /// Without `{date}` every session reuses the same name, so at most two files (the plain and
    /// the compressed one) ever exist and the file count limit is never reached.
    pub name_pattern: String,
    /// How long a shutdown waits for queued lines to be written.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub shutdown_timeout: Duration,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            limitation: LimitationMode::Files,
            limit: 5,
            compress: true,
            directory: PathBuf::from("logs"),
            name_pattern: "log_{date}".to_string(),
            shutdown_timeout: Duration::from_secs(3),
        }
    }
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.limitation != LimitationMode::None && self.limit == 0 {
            return Err(Error::InvalidConfig(format!(
                "file limit must be positive in {:?} mode",
                self.limitation
            )));
        }
        if self.name_pattern.is_empty() {
            return Err(Error::InvalidConfig(
                "log file name pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.minimum_level, 0);
        assert_eq!(config.area_filter.patterns, vec!["*"]);
        assert_eq!(config.file.limitation, LimitationMode::Files);
        assert_eq!(config.file.name_pattern, "log_{date}");
    }

    #[test]
    fn zero_limit_is_rejected_only_when_limited() {
        let mut config = Config::default();
        config.file.limit = 0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        config.file.limitation = LimitationMode::None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_layout_is_rejected() {
        let config = Config {
            layout: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
