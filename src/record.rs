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

//! A single line about to be laid out.

use jiff::Zoned;

use crate::Level;
use crate::color::Rgb;
use crate::trace::CallSite;

/// The context a layout is rendered against.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    // the observed time
    time: Zoned,

    // the metadata
    level: &'a Level,
    area: Option<&'a str>,
    area_color: Option<Rgb>,
    prefix: &'a str,
    call_site: Option<&'a CallSite>,
    color: bool,

    // the payload, one line of the formatted message
    message: &'a str,
}

impl<'a> Record<'a> {
    /// Creates a record observed now, with colors enabled and the default prefix.
    pub fn new(level: &'a Level, message: &'a str) -> Self {
        Self {
            time: Zoned::now(),
            level,
            area: None,
            area_color: None,
            prefix: "arealog",
            call_site: None,
            color: true,
            message,
        }
    }

    pub fn with_time(mut self, time: Zoned) -> Self {
        self.time = time;
        self
    }

    pub fn with_area(mut self, area: Option<&'a str>, color: Option<Rgb>) -> Self {
        self.area = area;
        self.area_color = color;
        self
    }

    pub fn with_prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_call_site(mut self, call_site: Option<&'a CallSite>) -> Self {
        self.call_site = call_site;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn time(&self) -> &Zoned {
        &self.time
    }

    pub fn level(&self) -> &Level {
        self.level
    }

    pub fn area(&self) -> Option<&str> {
        self.area
    }

    pub fn area_color(&self) -> Option<Rgb> {
        self.area_color
    }

    pub fn prefix(&self) -> &str {
        self.prefix
    }

    pub fn call_site(&self) -> Option<&CallSite> {
        self.call_site
    }

    /// Whether escape sequences should be produced.
    pub fn color(&self) -> bool {
        self.color
    }

    pub fn message(&self) -> &str {
        self.message
    }
}
