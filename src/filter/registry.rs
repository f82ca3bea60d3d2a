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

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::color::Rgb;
use crate::config::AreaMode;

/// The sentinel area that, once registered and enabled, enables every area.
pub const ALL_AREAS: &str = "ALL";

/// A named logical subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogArea {
    name: String,
    color: Option<Rgb>,
    parents: Vec<String>,
    enabled: bool,
}

impl LogArea {
    /// Creates an enabled area without color or parents.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            parents: vec![],
            enabled: true,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_color(&mut self, color: Option<Rgb>) {
        self.color = color;
    }

    pub fn add_parent(&mut self, parent: impl Into<String>) {
        self.parents.push(parent.into());
    }

    pub fn set_parents(&mut self, parents: Vec<String>) {
        self.parents = parents;
    }
}

#[derive(Debug)]
struct Areas {
    mode: AreaMode,
    by_name: HashMap<String, LogArea>,
}

impl Areas {
    fn flag(&self, name: &str) -> bool {
        self.by_name.get(name).is_some_and(LogArea::is_enabled)
    }
}

/// The process-wide set of known areas and their enabled state.
///
/// An area is enabled if its own flag is set, if one of its *direct* parents is enabled, or if
/// the [`ALL_AREAS`] sentinel is registered and enabled. Parents of parents are not consulted.
/// Names that were never registered are enabled in [`AreaMode::Wildcard`] and disabled in
/// [`AreaMode::Strict`].
#[derive(Debug)]
pub struct AreaRegistry {
    inner: RwLock<Areas>,
}

impl Default for AreaRegistry {
    fn default() -> Self {
        Self::new(AreaMode::default())
    }
}

impl AreaRegistry {
    pub fn new(mode: AreaMode) -> Self {
        Self {
            inner: RwLock::new(Areas {
                mode,
                by_name: HashMap::new(),
            }),
        }
    }

    pub fn mode(&self) -> AreaMode {
        self.inner.read().mode
    }

    pub fn set_mode(&self, mode: AreaMode) {
        self.inner.write().mode = mode;
    }

    /// Registers an area, replacing any area with the same name.
    pub fn register(&self, area: LogArea) {
        let mut inner = self.inner.write();
        inner.by_name.insert(area.name.clone(), area);
    }

    pub fn register_all(&self, areas: impl IntoIterator<Item = LogArea>) {
        let mut inner = self.inner.write();
        for area in areas {
            inner.by_name.insert(area.name.clone(), area);
        }
    }

    pub fn unregister(&self, name: &str) -> bool {
        self.inner.write().by_name.remove(name).is_some()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.inner.read().by_name.contains_key(name)
    }

    /// Registers or removes the [`ALL_AREAS`] sentinel.
    pub fn set_wildcard(&self, enabled: bool) {
        if enabled {
            self.register(LogArea::new(ALL_AREAS));
        } else {
            self.unregister(ALL_AREAS);
        }
    }

    /// Returns `false` if the area is not registered.
    pub fn enable(&self, name: &str) -> bool {
        self.set_enabled(name, true)
    }

    /// Returns `false` if the area is not registered.
    pub fn disable(&self, name: &str) -> bool {
        self.set_enabled(name, false)
    }

    pub fn enable_all<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.enable(name.as_ref());
        }
    }

    pub fn disable_all<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.disable(name.as_ref());
        }
    }

    fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        match self.inner.write().by_name.get_mut(name) {
            Some(area) => {
                area.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Edits a registered area in place. Returns `false` if it is not registered.
    pub fn configure(&self, name: &str, f: impl FnOnce(&mut LogArea)) -> bool {
        match self.inner.write().by_name.get_mut(name) {
            Some(area) => {
                f(area);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<LogArea> {
        self.inner.read().by_name.get(name).cloned()
    }

    pub fn color_of(&self, name: &str) -> Option<Rgb> {
        self.inner.read().by_name.get(name).and_then(LogArea::color)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names = self.inner.read().by_name.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        let inner = self.inner.read();
        if inner.flag(ALL_AREAS) {
            return true;
        }

        match inner.by_name.get(name) {
            Some(area) => area.enabled || area.parents.iter().any(|parent| inner.flag(parent)),
            None => inner.mode == AreaMode::Wildcard,
        }
    }
}
