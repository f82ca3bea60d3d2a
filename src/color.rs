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

//! Color utilities.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::Error;

/// The escape sequence that resets every style attribute.
pub const RESET: &str = "\x1b[0m";

static ANSI_SGR: LazyLock<Regex> = LazyLock::new(|| {
    // constant pattern
    Regex::new(r"\x1b\[[0-9;]*m").unwrap()
});

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB`, `RRGGBB` or the short `#RGB` form.
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidColor(hex.to_string());

        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: Cow<str> = match digits.len() {
            6 => Cow::Borrowed(digits),
            3 => Cow::Owned(digits.chars().flat_map(|c| [c, c]).collect()),
            _ => return Err(invalid()),
        };

        let channel =
            |at: usize| u8::from_str_radix(&expanded[at..at + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Averages the given colors channel by channel.
    ///
    /// Returns `None` when no color is given.
    pub fn mix(colors: &[Rgb]) -> Option<Rgb> {
        if colors.is_empty() {
            return None;
        }

        let n = colors.len() as u32;
        let (r, g, b) = colors.iter().fold((0u32, 0u32, 0u32), |(r, g, b), c| {
            (r + c.r as u32, g + c.g as u32, b + c.b as u32)
        });
        Some(Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8))
    }

    /// The foreground escape sequence selecting this color.
    pub fn escape(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

/// Removes every SGR (`ESC [ ... m`) sequence from `input`.
pub fn strip_ansi(input: &str) -> Cow<'_, str> {
    ANSI_SGR.replace_all(input, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Rgb::from_hex("#545454").unwrap(), Rgb::new(0x54, 0x54, 0x54));
        assert_eq!(Rgb::from_hex("ff0000").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hex("#0f8").unwrap(), Rgb::new(0x00, 0xff, 0x88));
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#GG0000").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    #[test]
    fn display_round_trips_through_hex() {
        let color = Rgb::new(0, 140, 255);
        assert_eq!(color.to_string(), "#008CFF");
        assert_eq!(color.to_string().parse::<Rgb>().unwrap(), color);
    }

    #[test]
    fn mix_averages_channels() {
        let mixed = Rgb::mix(&[Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]).unwrap();
        assert_eq!(mixed, Rgb::new(127, 0, 127));
        assert_eq!(Rgb::mix(&[]), None);
    }

    #[test]
    fn escape_is_true_color() {
        assert_eq!(Rgb::new(1, 2, 3).escape(), "\x1b[38;2;1;2;3m");
    }

    #[test]
    fn strip_removes_color_codes() {
        let text = "plain [INFO] text: {} 100%";
        let colored = format!("{}{text}{RESET}", Rgb::new(10, 20, 30).escape());
        assert_eq!(strip_ansi(&colored), text);
        assert_eq!(strip_ansi("\x1b[1m\x1b[31mbold\x1b[0m"), "bold");
    }
}
