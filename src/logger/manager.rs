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

use std::panic::Location;
use std::sync::Arc;

use arc_swap::ArcSwap;
use jiff::Zoned;

use super::Logger;
use super::ManagerBuilder;
use super::PlainLogger;
use crate::Error;
use crate::Level;
use crate::append::Append;
use crate::append::FileHandler;
use crate::color::RESET;
use crate::color::strip_ansi;
use crate::config::AreaMode;
use crate::config::Config;
use crate::filter::AreaFilter;
use crate::filter::AreaRegistry;
use crate::filter::LogArea;
use crate::filter::MinLevel;
use crate::layout::Layout;
use crate::layout::Placeholders;
use crate::record::Record;
use crate::trace::CallSite;
use crate::trace::CallSiteProvider;
use crate::trap::MuteGate;
use crate::trap::Trap;

/// Owns the configuration, area state and sinks shared by every [`Logger`] created from it.
///
/// Settings can be changed at any time from any thread; a record always sees one consistent
/// snapshot of the configuration.
#[derive(Debug)]
pub struct Manager {
    config: ArcSwap<Config>,
    layout: ArcSwap<Layout>,
    area_filter: ArcSwap<AreaFilter>,
    areas: AreaRegistry,
    placeholders: Placeholders,
    call_sites: Option<Box<dyn CallSiteProvider>>,
    console: Arc<dyn Append>,
    file: FileHandler,
    trap: Arc<MuteGate>,
}

impl Manager {
    /// Creates a [`ManagerBuilder`].
    pub fn builder() -> ManagerBuilder {
        ManagerBuilder::default()
    }

    /// Creates a manager printing to stdout with the given configuration.
    pub fn new(config: Config) -> Result<Arc<Manager>, Error> {
        Manager::builder().config(config).build()
    }

    pub(super) fn from_parts(
        config: Config,
        area_filter: AreaFilter,
        placeholders: Placeholders,
        call_sites: Option<Box<dyn CallSiteProvider>>,
        console: Arc<dyn Append>,
        trap: Arc<dyn Trap>,
    ) -> Manager {
        let trap = Arc::new(MuteGate::new(trap, config.mute));
        Manager {
            layout: ArcSwap::from_pointee(Layout::parse(config.layout.as_str())),
            area_filter: ArcSwap::from_pointee(area_filter),
            areas: AreaRegistry::new(config.area_mode),
            placeholders,
            call_sites,
            console,
            file: FileHandler::new(trap.clone()),
            trap,
            config: ArcSwap::from_pointee(config),
        }
    }

    /// A snapshot of the current configuration.
    pub fn config(&self) -> Arc<Config> {
        self.config.load_full()
    }

    fn update(&self, f: impl Fn(&mut Config)) {
        self.config.rcu(|current| {
            let mut config = Config::clone(current);
            f(&mut config);
            config
        });
    }

    /// Creates a logger that prints `prefix` for the `{prefix}` placeholder.
    pub fn logger(self: &Arc<Self>, prefix: impl Into<String>) -> Logger {
        Logger::new(self.clone(), prefix.into())
    }

    /// Creates a logger using the configured prefix.
    pub fn default_logger(self: &Arc<Self>) -> Logger {
        let prefix = self.config.load().prefix.clone();
        Logger::new(self.clone(), prefix)
    }

    /// Creates an area-less logger that writes to this manager's console sink.
    pub fn plain_logger(&self) -> PlainLogger {
        PlainLogger::new(self.console.clone())
    }

    pub fn areas(&self) -> &AreaRegistry {
        &self.areas
    }

    pub fn register_area(&self, area: LogArea) {
        self.areas.register(area);
    }

    /// Returns `false` if the area is not registered.
    pub fn enable_area(&self, name: &str) -> bool {
        self.areas.enable(name)
    }

    /// Returns `false` if the area is not registered.
    pub fn disable_area(&self, name: &str) -> bool {
        self.areas.disable(name)
    }

    pub fn set_area_mode(&self, mode: AreaMode) {
        self.areas.set_mode(mode);
        self.update(|config| config.area_mode = mode);
    }

    /// Replaces the area filter. Nothing changes if a pattern is malformed.
    pub fn set_area_filter_patterns<I, S>(&self, patterns: I, blacklist: bool) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns.into_iter().map(Into::into).collect::<Vec<String>>();
        let filter = AreaFilter::new(patterns.iter().cloned(), blacklist)?;
        self.area_filter.store(Arc::new(filter));
        self.update(|config| {
            config.area_filter.patterns = patterns.clone();
            config.area_filter.blacklist = blacklist;
        });
        Ok(())
    }

    /// Adds one pattern to the area filter. Nothing changes if the pattern is malformed.
    pub fn add_area_filter_pattern(&self, pattern: impl Into<String>) -> Result<(), Error> {
        let pattern = pattern.into();
        let mut filter = AreaFilter::clone(&self.area_filter.load());
        filter.add_pattern(pattern.as_str())?;
        self.area_filter.store(Arc::new(filter));
        self.update(|config| config.area_filter.patterns.push(pattern.clone()));
        Ok(())
    }

    pub fn set_minimum_level(&self, rank: i32) {
        self.update(|config| config.minimum_level = rank);
    }

    pub fn set_muted(&self, muted: bool) {
        self.trap.set_muted(muted);
        self.update(|config| config.mute = muted);
    }

    pub fn set_color(&self, color: bool) {
        self.update(|config| config.color = color);
    }

    pub fn set_layout(&self, layout: impl Into<String>) -> Result<(), Error> {
        let layout = layout.into();
        if layout.is_empty() {
            return Err(Error::InvalidConfig("layout must not be empty".to_string()));
        }
        self.layout.store(Arc::new(Layout::parse(layout.as_str())));
        self.update(|config| config.layout = layout.clone());
        Ok(())
    }

    pub fn set_stacktrace_limit(&self, limit: usize) {
        self.update(|config| config.stacktrace_limit = limit);
    }

    /// Starts or stops writing session log files, using the file settings of the configuration.
    pub fn enable_file_logging(&self, enabled: bool) -> Result<(), Error> {
        if enabled {
            let config = self.config.load();
            config.file.validate()?;
            self.file.enable(&config.file)?;
        } else {
            self.file.disable();
        }
        self.update(|config| config.file.enabled = enabled);
        Ok(())
    }

    pub fn is_file_logging_enabled(&self) -> bool {
        self.file.is_enabled()
    }

    /// Flushes the console and stops the file writer, waiting at most the configured grace
    /// period. Safe to call more than once.
    pub fn shutdown(&self) {
        self.console.flush();
        self.file.shutdown();
    }

    pub fn flush(&self) {
        self.console.flush();
    }

    /// Whether a record at `level` in `area` would be written.
    pub fn is_enabled(&self, level: &Level, area: Option<&str>) -> bool {
        let config = self.config.load();
        if config.mute || !MinLevel(config.minimum_level).is_level_allowed(level) {
            return false;
        }
        match area {
            Some(area) => self.area_filter.load().is_allowed(area) && self.areas.is_enabled(area),
            None => true,
        }
    }

    /// Lays out every line of an already formatted message and hands it to the sinks.
    pub(crate) fn write(
        &self,
        level: &Level,
        area: Option<&str>,
        prefix: &str,
        message: &str,
        call_site: Option<CallSite>,
        location: &'static Location<'static>,
    ) {
        let config = self.config.load();
        let layout = self.layout.load();
        let area_color = area.and_then(|area| self.areas.color_of(area));
        let call_site = call_site
            .or_else(|| self.call_sites.as_ref().and_then(|p| p.call_site()))
            .unwrap_or_else(|| CallSite::from_location(location));
        let time = Zoned::now();

        let mut lines = message.lines().collect::<Vec<_>>();
        if lines.is_empty() {
            lines.push("");
        }

        for line in lines {
            let record = Record::new(level, line)
                .with_time(time.clone())
                .with_area(area, area_color)
                .with_prefix(prefix)
                .with_call_site(Some(&call_site))
                .with_color(config.color);

            let mut rendered = layout.render(&record, &self.placeholders, self.trap.as_ref());
            rendered.push_str(RESET);

            if let Err(err) = self.console.append(&rendered) {
                self.trap.trap(&err.context("failed to write log line to console"));
            }
            if self.file.is_enabled() {
                self.file.enqueue(strip_ansi(&rendered).into_owned());
            }
        }
    }
}

impl Drop for Manager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
