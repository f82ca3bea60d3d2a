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

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;

/// A log level: a display name, a numeric rank used for threshold filtering and a color.
///
/// From least to most severe, the built-in levels are:
///
/// | level        | rank |
/// |--------------|------|
/// | `STACKTRACE` | -3   |
/// | `VERBOSE`    | -2   |
/// | `DEBUG`      | -1   |
/// | `INFO`       | 0    |
/// | `WARN`       | 1    |
/// | `ERROR`      | 2    |
/// | `FATAL`      | 3    |
///
/// Custom levels can be created with [`Level::new`]; they compare with the built-in ones by rank.
#[derive(Debug, Clone)]
pub struct Level {
    name: Cow<'static, str>,
    rank: i32,
    color: Rgb,
}

impl Level {
    pub const STACKTRACE: Level = Level::builtin("STACKTRACE", -3, Rgb::new(71, 71, 71));
    pub const VERBOSE: Level = Level::builtin("VERBOSE", -2, Rgb::new(131, 0, 255));
    pub const DEBUG: Level = Level::builtin("DEBUG", -1, Rgb::new(0, 140, 255));
    pub const INFO: Level = Level::builtin("INFO", 0, Rgb::new(228, 228, 228));
    pub const WARN: Level = Level::builtin("WARN", 1, Rgb::new(255, 220, 21));
    pub const ERROR: Level = Level::builtin("ERROR", 2, Rgb::new(255, 0, 0));
    pub const FATAL: Level = Level::builtin("FATAL", 3, Rgb::new(115, 0, 0));

    /// All built-in levels, ordered by rank.
    pub const BUILTIN: [Level; 7] = [
        Level::STACKTRACE,
        Level::VERBOSE,
        Level::DEBUG,
        Level::INFO,
        Level::WARN,
        Level::ERROR,
        Level::FATAL,
    ];

    const fn builtin(name: &'static str, rank: i32, color: Rgb) -> Level {
        Level {
            name: Cow::Borrowed(name),
            rank,
            color,
        }
    }

    /// Creates a custom level.
    pub fn new(name: impl Into<Cow<'static, str>>, rank: i32, color: Rgb) -> Level {
        Level {
            name: name.into(),
            rank,
            color,
        }
    }

    /// Returns the built-in level with the given rank.
    pub fn from_rank(rank: i32) -> Option<Level> {
        Level::BUILTIN.into_iter().find(|level| level.rank == rank)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> i32 {
        self.rank
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Level {}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name)
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::BUILTIN
            .into_iter()
            .find(|level| level.name.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown log level '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_levels_are_ordered_by_rank() {
        let ranks = Level::BUILTIN.iter().map(Level::rank).collect::<Vec<_>>();
        assert_eq!(ranks, vec![-3, -2, -1, 0, 1, 2, 3]);
        assert!(Level::DEBUG < Level::INFO);
        assert!(Level::FATAL > Level::ERROR);
    }

    #[test]
    fn lookup_by_rank_and_name() {
        assert_eq!(Level::from_rank(1).unwrap().name(), "WARN");
        assert!(Level::from_rank(9).is_none());
        assert_eq!("verbose".parse::<Level>().unwrap(), Level::VERBOSE);
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn custom_levels_compare_by_rank() {
        let notice = Level::new("NOTICE", 0, Rgb::new(0, 255, 0));
        assert_eq!(notice, Level::INFO);
        assert_eq!(notice.name(), "NOTICE");
        assert!(notice < Level::WARN);
    }
}
