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

use std::path::PathBuf;
use std::sync::Arc;

use super::Manager;
use crate::Error;
use crate::append::Append;
use crate::append::Stdout;
use crate::config::AreaMode;
use crate::config::Config;
use crate::config::FileConfig;
use crate::filter::AreaFilter;
use crate::layout::Placeholders;
use crate::trace::CallSiteProvider;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A builder for configuring a [`Manager`].
///
/// Everything not set falls back to [`Config::default`], a [`Stdout`] console and the
/// [`DefaultTrap`].
///
/// ## Examples
///
/// ```
/// use arealog::Manager;
/// use arealog::append::Stderr;
///
/// let manager = Manager::builder()
///     .console(Stderr::default())
///     .minimum_level(-1)
///     .prefix("demo")
///     .area_filter(["net.*", "db"], false)
///     .build()
///     .unwrap();
/// manager.default_logger().debug("visible at debug rank", &[]);
/// ```
#[must_use = "call `build` to create the manager"]
#[derive(Debug)]
pub struct ManagerBuilder {
    config: Config,
    console: Option<Arc<dyn Append>>,
    trap: Option<Arc<dyn Trap>>,
    placeholders: Placeholders,
    call_sites: Option<Box<dyn CallSiteProvider>>,
}

impl Default for ManagerBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            console: None,
            trap: None,
            placeholders: Placeholders::default(),
            call_sites: None,
        }
    }
}

impl ManagerBuilder {
    /// Replaces the whole configuration. Setters called afterwards modify this value.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn minimum_level(mut self, rank: i32) -> Self {
        self.config.minimum_level = rank;
        self
    }

    pub fn mute(mut self, mute: bool) -> Self {
        self.config.mute = mute;
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.config.color = color;
        self
    }

    pub fn layout(mut self, layout: impl Into<String>) -> Self {
        self.config.layout = layout.into();
        self
    }

    /// The prefix of loggers created by [`Manager::default_logger`].
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    pub fn stacktrace_limit(mut self, limit: usize) -> Self {
        self.config.stacktrace_limit = limit;
        self
    }

    pub fn area_mode(mut self, mode: AreaMode) -> Self {
        self.config.area_mode = mode;
        self
    }

    pub fn area_filter<I, S>(mut self, patterns: I, blacklist: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.area_filter.patterns = patterns.into_iter().map(Into::into).collect();
        self.config.area_filter.blacklist = blacklist;
        self
    }

    /// Sets the file settings. File logging starts on build only if `file.enabled` is set.
    pub fn file(mut self, file: FileConfig) -> Self {
        self.config.file = file;
        self
    }

    /// Shorthand for enabling file logging into `directory` with the other file settings unchanged.
    pub fn file_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.file.enabled = true;
        self.config.file.directory = directory.into();
        self
    }

    /// Where rendered lines are written synchronously. Defaults to [`Stdout`].
    pub fn console(mut self, console: impl Append) -> Self {
        self.console = Some(Arc::new(console));
        self
    }

    /// Where rendering and writing failures are reported. Defaults to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Trap) -> Self {
        self.trap = Some(Arc::new(trap));
        self
    }

    pub fn placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Supplies call sites for records logged without a macro.
    pub fn call_site_provider(mut self, provider: impl CallSiteProvider) -> Self {
        self.call_sites = Some(Box::new(provider));
        self
    }

    /// Validates the configuration, compiles the area filter and, if configured, starts the file
    /// writer.
    pub fn build(self) -> Result<Arc<Manager>, Error> {
        let ManagerBuilder {
            config,
            console,
            trap,
            placeholders,
            call_sites,
        } = self;

        config.validate()?;
        let area_filter = AreaFilter::new(
            config.area_filter.patterns.iter().cloned(),
            config.area_filter.blacklist,
        )?;
        let file_enabled = config.file.enabled;

        let manager = Manager::from_parts(
            config,
            area_filter,
            placeholders,
            call_sites,
            console.unwrap_or_else(|| Arc::new(Stdout::default())),
            trap.unwrap_or_else(|| Arc::new(DefaultTrap::default())),
        );
        if file_enabled {
            manager.enable_file_logging(true)?;
        }
        Ok(Arc::new(manager))
    }
}
