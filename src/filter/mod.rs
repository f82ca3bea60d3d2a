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

//! Filters deciding whether a record produces output.
//!
//! A record passes when every gate agrees:
//!
//! * [`MinLevel`] compares the rank of its level with a threshold,
//! * [`AreaFilter`] matches its area name against whitelist or blacklist patterns,
//! * [`AreaRegistry`] checks the enabled state of its area.

pub use self::area::AreaFilter;
pub use self::area::AreaPattern;
pub use self::min_level::MinLevel;
pub use self::registry::ALL_AREAS;
pub use self::registry::AreaRegistry;
pub use self::registry::LogArea;

mod area;
mod min_level;
mod registry;
