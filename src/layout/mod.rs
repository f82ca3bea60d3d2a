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

//! Layouts for formatting log lines.
//!
//! A layout is plain text with placeholder tokens, `{key}` or `{key:args}`, where `args` is a
//! comma-separated list of flags (`class`) and `name=value` pairs. `\{`, `\}` and `\\` stand for
//! the literal characters. Tokens naming neither a [`Builtin`] nor an entry of the
//! [`Placeholders`] table are left as written.

use std::fmt;

pub use self::placeholder::Builtin;
pub use self::placeholder::Placeholders;
pub use self::placeholder::PlaceholdersBuilder;
pub use self::time::format_time;
pub use self::time::pattern_to_strftime;

use crate::config::DEFAULT_LAYOUT;
use crate::record::Record;
use crate::trap::Trap;

mod placeholder;
mod time;

/// Ordered placeholder arguments; setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    entries: Vec<(String, String)>,
}

impl Args {
    /// Parses `a,b=c`. Keys are trimmed, values are kept as written and flags have an empty value.
    pub fn parse(raw: &str) -> Args {
        let mut args = Args::default();
        for item in raw.split(',') {
            let (key, value) = item.split_once('=').unwrap_or((item, ""));
            let key = key.trim();
            if !key.is_empty() {
                args.set(key, value);
            }
        }
        args
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `self` with every entry of `overrides` applied in order.
    pub fn merged(&self, overrides: &Args) -> Args {
        let mut merged = self.clone();
        for (key, value) in overrides.iter() {
            merged.set(key, value);
        }
        merged
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Token {
        key: String,
        builtin: Option<Builtin>,
        args: Args,
        raw: String,
    },
}

/// A parsed layout template.
#[derive(Clone)]
pub struct Layout {
    source: String,
    segments: Vec<Segment>,
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Layout").field(&self.source).finish()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::parse(DEFAULT_LAYOUT)
    }
}

impl Layout {
    /// Parses a template. Parsing never fails; anything that is not a well-formed token is text.
    pub fn parse(source: impl Into<String>) -> Layout {
        let source = source.into();
        let segments = parse_segments(&source);
        Layout { source, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Expands every token against `record` in a single pass.
    ///
    /// Replacement text is never scanned again, so braces in messages, prefixes or area names are
    /// emitted as they are.
    pub fn render(&self, record: &Record<'_>, custom: &Placeholders, trap: &dyn Trap) -> String {
        let mut out = String::with_capacity(self.source.len() + record.message().len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token {
                    key,
                    builtin,
                    args,
                    raw,
                } => {
                    if let Some(builtin) = builtin {
                        let merged = builtin.defaults().merged(args);
                        out.push_str(&builtin.render(record, &merged, trap));
                    } else if let Some(text) = custom.render(key, record, args) {
                        out.push_str(&text);
                    } else {
                        out.push_str(raw);
                    }
                }
            }
        }
        out
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_key_char)
}

fn parse_segments(source: &str) -> Vec<Segment> {
    let mut segments = vec![];
    let mut literal = String::new();
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        match c {
            '\\' => {
                let escaped = rest[1..].chars().next();
                match escaped {
                    Some(e @ ('{' | '}' | '\\')) => {
                        literal.push(e);
                        rest = &rest[2..];
                    }
                    _ => {
                        literal.push('\\');
                        rest = &rest[1..];
                    }
                }
            }
            '{' => match parse_token(rest) {
                Some((len, key, args)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Token {
                        builtin: Builtin::from_key(key),
                        key: key.to_string(),
                        args: args.map(Args::parse).unwrap_or_default(),
                        raw: rest[..len].to_string(),
                    });
                    rest = &rest[len..];
                }
                None => {
                    literal.push('{');
                    rest = &rest[1..];
                }
            },
            _ => {
                literal.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

// Returns the token length, key and raw arguments of a token starting at `s`.
fn parse_token(s: &str) -> Option<(usize, &str, Option<&str>)> {
    let body = &s[1..];
    let key_len = body.find(|c: char| !is_key_char(c)).unwrap_or(body.len());
    if key_len == 0 {
        return None;
    }
    let key = &body[..key_len];
    let after = &body[key_len..];

    if after.starts_with('}') {
        return Some((1 + key_len + 1, key, None));
    }

    let raw = after.strip_prefix(':')?;
    let end = raw.find(['{', '}'])?;
    if !raw[end..].starts_with('}') {
        return None;
    }
    Some((1 + key_len + 1 + end + 1, key, Some(&raw[..end])))
}
