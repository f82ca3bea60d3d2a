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
use std::fmt;

use crate::Error;
use crate::color::RESET;
use crate::color::Rgb;
use crate::layout::Args;
use crate::layout::time::format_time;
use crate::record::Record;
use crate::trap::Trap;

/// The placeholders every layout understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Time,
    Level,
    LevelColor,
    Message,
    Prefix,
    Trace,
    TraceClass,
    TraceMethod,
    TraceLineNumber,
    Color,
    Area,
    AreaColor,
    Reset,
}

impl Builtin {
    pub fn from_key(key: &str) -> Option<Builtin> {
        let builtin = match key {
            "time" => Builtin::Time,
            "level" => Builtin::Level,
            "levelColor" => Builtin::LevelColor,
            "message" => Builtin::Message,
            "prefix" => Builtin::Prefix,
            "trace" => Builtin::Trace,
            "traceClass" => Builtin::TraceClass,
            "traceMethod" => Builtin::TraceMethod,
            "traceLineNumber" => Builtin::TraceLineNumber,
            "color" => Builtin::Color,
            "area" => Builtin::Area,
            "areaColor" => Builtin::AreaColor,
            "reset" => Builtin::Reset,
            _ => return None,
        };
        Some(builtin)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Builtin::Time => "time",
            Builtin::Level => "level",
            Builtin::LevelColor => "levelColor",
            Builtin::Message => "message",
            Builtin::Prefix => "prefix",
            Builtin::Trace => "trace",
            Builtin::TraceClass => "traceClass",
            Builtin::TraceMethod => "traceMethod",
            Builtin::TraceLineNumber => "traceLineNumber",
            Builtin::Color => "color",
            Builtin::Area => "area",
            Builtin::AreaColor => "areaColor",
            Builtin::Reset => "reset",
        }
    }

    pub fn defaults(&self) -> Args {
        match self {
            Builtin::Time => Args::parse("format=HH:mm:ss"),
            Builtin::Trace => Args::parse("separator=:"),
            _ => Args::default(),
        }
    }

    pub(crate) fn render(&self, record: &Record<'_>, args: &Args, trap: &dyn Trap) -> String {
        let escape = |color: Rgb| {
            if record.color() {
                color.escape()
            } else {
                String::new()
            }
        };

        match self {
            Builtin::Time => {
                let format = args.get("format").unwrap_or("HH:mm:ss");
                match format_time(record.time(), format) {
                    Ok(time) => time,
                    Err(err) => {
                        trap.trap(&anyhow::anyhow!(err).context(format!(
                            "failed to format time with pattern {format:?}"
                        )));
                        String::new()
                    }
                }
            }
            Builtin::Level => record.level().name().to_string(),
            Builtin::LevelColor => escape(record.level().color()),
            Builtin::Message => record.message().to_string(),
            Builtin::Prefix => record.prefix().to_string(),
            Builtin::Trace => {
                let Some(site) = record.call_site() else {
                    return String::new();
                };
                let mut fields = args
                    .iter()
                    .filter_map(|(key, _)| match key {
                        "class" => Some(site.class().to_string()),
                        "method" => Some(site.method().to_string()),
                        "line" => Some(site.line().to_string()),
                        _ => None,
                    })
                    .collect::<Vec<_>>();
                if fields.is_empty() {
                    fields = vec![
                        site.class().to_string(),
                        site.method().to_string(),
                        site.line().to_string(),
                    ];
                }
                fields.join(args.get("separator").unwrap_or(":"))
            }
            Builtin::TraceClass => record
                .call_site()
                .map(|site| site.class().to_string())
                .unwrap_or_default(),
            Builtin::TraceMethod => record
                .call_site()
                .map(|site| site.method().to_string())
                .unwrap_or_default(),
            Builtin::TraceLineNumber => record
                .call_site()
                .map(|site| site.line().to_string())
                .unwrap_or_default(),
            Builtin::Color => {
                if !record.color() {
                    return String::new();
                }
                let hex = args.get("hex").unwrap_or_default();
                match Rgb::from_hex(hex) {
                    Ok(color) => color.escape(),
                    Err(err) => {
                        trap.trap(&anyhow::Error::from(err));
                        String::new()
                    }
                }
            }
            Builtin::Area => record.area().unwrap_or_default().to_string(),
            Builtin::AreaColor => record.area_color().map(escape).unwrap_or_default(),
            Builtin::Reset => {
                if record.color() {
                    RESET.to_string()
                } else {
                    String::new()
                }
            }
        }
    }
}

type Handler = dyn Fn(&Record<'_>, &Args) -> String + Send + Sync;

struct Placeholder {
    defaults: Args,
    handler: Box<Handler>,
}

/// A table of user-defined placeholders, fixed once built.
///
/// Built-in keys always take precedence over custom ones.
///
/// ```
/// use arealog::layout::Placeholders;
///
/// let placeholders = Placeholders::builder()
///     .register("thread", |_, _| {
///         std::thread::current().name().unwrap_or("?").to_string()
///     })
///     .register_with_defaults("pad", "width=8", |record, args| {
///         let width = args.get("width").and_then(|w| w.parse().ok()).unwrap_or(0usize);
///         format!("{:width$}", record.level().name())
///     })
///     .build()
///     .unwrap();
/// assert!(placeholders.contains("thread"));
/// ```
#[derive(Default)]
pub struct Placeholders {
    table: HashMap<String, Placeholder>,
}

impl fmt::Debug for Placeholders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = self.table.keys().collect::<Vec<_>>();
        keys.sort();
        f.debug_struct("Placeholders").field("keys", &keys).finish()
    }
}

impl Placeholders {
    pub fn builder() -> PlaceholdersBuilder {
        PlaceholdersBuilder::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    pub(crate) fn render(&self, key: &str, record: &Record<'_>, args: &Args) -> Option<String> {
        let placeholder = self.table.get(key)?;
        let merged = placeholder.defaults.merged(args);
        Some((placeholder.handler)(record, &merged))
    }
}

/// Collects custom placeholders for a [`Placeholders`] table.
#[derive(Default)]
pub struct PlaceholdersBuilder {
    table: HashMap<String, Placeholder>,
    errors: Vec<String>,
}

impl PlaceholdersBuilder {
    pub fn register<F>(self, key: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Record<'_>, &Args) -> String + Send + Sync + 'static,
    {
        self.register_with_defaults(key, "", handler)
    }

    /// Registers a handler whose arguments start from `defaults`, written like token arguments.
    pub fn register_with_defaults<F>(
        mut self,
        key: impl Into<String>,
        defaults: &str,
        handler: F,
    ) -> Self
    where
        F: Fn(&Record<'_>, &Args) -> String + Send + Sync + 'static,
    {
        let key = key.into();
        if !super::is_valid_key(&key) {
            self.errors.push(format!("invalid placeholder key {key:?}"));
        } else if Builtin::from_key(&key).is_some() {
            self.errors
                .push(format!("placeholder {key:?} shadows a built-in placeholder"));
        } else {
            let placeholder = Placeholder {
                defaults: Args::parse(defaults),
                handler: Box::new(handler),
            };
            self.table.insert(key, placeholder);
        }
        self
    }

    /// Fails if a key was malformed or named a built-in placeholder.
    pub fn build(self) -> Result<Placeholders, Error> {
        if !self.errors.is_empty() {
            return Err(Error::InvalidConfig(self.errors.join("; ")));
        }
        Ok(Placeholders { table: self.table })
    }
}
