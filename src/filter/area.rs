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

use regex::Regex;

use crate::Error;

/// A compiled area name pattern.
///
/// Three forms are supported:
///
/// * an exact name, `com.example.Main`,
/// * a wildcard, `com.*`, where `*` matches any substring and everything else is literal,
/// * a full regex wrapped in `^` and `$`, `^com\.(api|web)\..*$`.
#[derive(Debug, Clone)]
pub struct AreaPattern {
    source: String,
    regex: Regex,
}

impl AreaPattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self, Error> {
        let source = pattern.into();
        let expr = if source.len() > 1 && source.starts_with('^') && source.ends_with('$') {
            source.clone()
        } else {
            wildcard_to_regex(&source)
        };

        match Regex::new(&expr) {
            Ok(regex) => Ok(Self { source, regex }),
            Err(source_err) => Err(Error::InvalidPattern {
                pattern: source,
                source: source_err,
            }),
        }
    }

    /// The pattern as written by the user.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, area: &str) -> bool {
        self.regex.is_match(area)
    }
}

fn wildcard_to_regex(pattern: &str) -> String {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("^{body}$")
}

/// A whitelist or blacklist of area patterns.
///
/// In whitelist mode an area is allowed iff it matches at least one pattern, in blacklist mode
/// iff it matches none.
#[derive(Debug, Clone)]
pub struct AreaFilter {
    patterns: Vec<AreaPattern>,
    blacklist: bool,
}

impl Default for AreaFilter {
    /// A whitelist that allows every area.
    fn default() -> Self {
        Self {
            patterns: vec![AreaPattern {
                source: "*".to_string(),
                // constant pattern
                regex: Regex::new("^.*$").unwrap(),
            }],
            blacklist: false,
        }
    }
}

impl AreaFilter {
    /// Compiles every pattern, failing on the first malformed one.
    pub fn new<I, S>(patterns: I, blacklist: bool) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(AreaPattern::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            patterns,
            blacklist,
        })
    }

    pub fn add_pattern(&mut self, pattern: impl Into<String>) -> Result<(), Error> {
        self.patterns.push(AreaPattern::new(pattern)?);
        Ok(())
    }

    pub fn patterns(&self) -> impl ExactSizeIterator<Item = &str> {
        self.patterns.iter().map(AreaPattern::as_str)
    }

    pub fn is_blacklist(&self) -> bool {
        self.blacklist
    }

    pub fn is_allowed(&self, area: &str) -> bool {
        let matched = self.patterns.iter().any(|p| p.matches(area));
        matched != self.blacklist
    }
}
