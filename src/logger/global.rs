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

use std::sync::Arc;

use parking_lot::RwLock;

use super::Manager;
use crate::append::Stdout;
use crate::config::Config;
use crate::filter::AreaFilter;
use crate::layout::Placeholders;
use crate::trap::DefaultTrap;

static GLOBAL: RwLock<Option<Arc<Manager>>> = parking_lot::const_rwlock(None);

/// Returns the process-wide default manager, creating one with [`Config::default`] on first use.
pub fn global() -> Arc<Manager> {
    if let Some(manager) = GLOBAL.read().as_ref() {
        return manager.clone();
    }

    GLOBAL
        .write()
        .get_or_insert_with(|| {
            Arc::new(Manager::from_parts(
                Config::default(),
                AreaFilter::default(),
                Placeholders::default(),
                None,
                Arc::new(Stdout::default()),
                Arc::new(DefaultTrap::default()),
            ))
        })
        .clone()
}

/// Replaces the process-wide default manager, returning the previous one.
pub fn set_global(manager: Arc<Manager>) -> Option<Arc<Manager>> {
    GLOBAL.write().replace(manager)
}

/// Removes the process-wide default manager and shuts it down.
///
/// The next call to [`global`] creates a fresh one.
pub fn reset_global() {
    let previous = GLOBAL.write().take();
    if let Some(manager) = previous {
        manager.shutdown();
    }
}
