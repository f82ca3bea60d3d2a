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

//! Time formatting for the `time` placeholder.

use std::borrow::Cow;

use jiff::Zoned;
use jiff::fmt::strtime;

/// Formats `time` with either a strftime format (any `%` present) or a pattern in the
/// `yyyy-MM-dd HH:mm:ss.SSS` style.
pub fn format_time(time: &Zoned, format: &str) -> Result<String, jiff::Error> {
    let format = if format.contains('%') {
        Cow::Borrowed(format)
    } else {
        Cow::Owned(pattern_to_strftime(format))
    };
    strtime::format(format.as_bytes(), time)
}

/// Translates a date pattern into the equivalent strftime format.
///
/// Letters without a meaning are kept literally, text in single quotes is literal and `''` is a
/// single quote.
pub fn pattern_to_strftime(pattern: &str) -> String {
    let chars = pattern.chars().collect::<Vec<_>>();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&next| next == c).count();
        let spec = match (c, run) {
            ('y', 2) => "%y".to_string(),
            ('y', _) => "%Y".to_string(),
            ('M', 1) => "%-m".to_string(),
            ('M', 2) => "%m".to_string(),
            ('M', 3) => "%b".to_string(),
            ('M', _) => "%B".to_string(),
            ('d', 1) => "%-d".to_string(),
            ('d', _) => "%d".to_string(),
            ('H', 1) => "%-H".to_string(),
            ('H', _) => "%H".to_string(),
            ('h', 1) => "%-I".to_string(),
            ('h', _) => "%I".to_string(),
            ('m', 1) => "%-M".to_string(),
            ('m', _) => "%M".to_string(),
            ('s', 1) => "%-S".to_string(),
            ('s', _) => "%S".to_string(),
            ('S', n) => format!("%{}f", n.min(9)),
            ('a', _) => "%p".to_string(),
            ('E', n) if n < 4 => "%a".to_string(),
            ('E', _) => "%A".to_string(),
            ('z', _) => "%Z".to_string(),
            ('Z', _) => "%z".to_string(),
            _ => {
                for _ in 0..run {
                    push_literal(&mut out, c);
                }
                i += run;
                continue;
            }
        };
        out.push_str(&spec);
        i += run;
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_common_patterns() {
        assert_eq!(pattern_to_strftime("HH:mm:ss"), "%H:%M:%S");
        assert_eq!(pattern_to_strftime("yyyy-MM-dd_HH-mm-ss"), "%Y-%m-%d_%H-%M-%S");
        assert_eq!(pattern_to_strftime("HH:mm:ss.SSS"), "%H:%M:%S.%3f");
        assert_eq!(pattern_to_strftime("yy/M/d"), "%y/%-m/%-d");
    }

    #[test]
    fn quotes_and_percent_are_literal() {
        assert_eq!(pattern_to_strftime("'at' HH"), "at %H");
        assert_eq!(pattern_to_strftime("HH'h'''"), "%Hh'");
        assert_eq!(pattern_to_strftime("100% ss"), "100%% %S");
    }

    #[test]
    fn formats_fixed_time() {
        let time: Zoned = "2024-03-09T07:05:03.123456789+00:00[UTC]".parse().unwrap();
        assert_eq!(format_time(&time, "HH:mm:ss").unwrap(), "07:05:03");
        assert_eq!(
            format_time(&time, "yyyy-MM-dd_HH-mm-ss").unwrap(),
            "2024-03-09_07-05-03"
        );
        assert_eq!(format_time(&time, "ss.SSS").unwrap(), "03.123");
        assert_eq!(format_time(&time, "%Y/%m/%d").unwrap(), "2024/03/09");
    }
}
