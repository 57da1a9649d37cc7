// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt;

use crate::histogram::ScalarHistogram;

const DEFAULT_PRINT_FORMAT: &str = "%.2f";
const BAR_WIDTH: f64 = 130.0;
const UNNAMED: &str = "UNNAMED";

impl ScalarHistogram {
    /// Returns the label for `bin`: its centre, scaled by the print modifier and rendered with
    /// the print format (`%.2f` by default).
    pub fn formatted_string_for(&self, bin: usize) -> String {
        let format = self.print_format.as_deref().unwrap_or(DEFAULT_PRINT_FORMAT);
        let modifier = self.print_modifier.unwrap_or(1.0);
        format_value(format, self.middle_for(bin) * modifier)
    }
}

impl fmt::Display for ScalarHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or(UNNAMED);
        let max = self.max_count();
        if max == 0 {
            return write!(f, "{name}: Nada.");
        }

        writeln!(f, "{name} (pseudoCount: {})", self.pseudo_count)?;
        for (bin, &count) in self.bins.iter().enumerate() {
            let bar = (BAR_WIDTH * count as f64 / max as f64) as usize;
            writeln!(f, "{}: {}", self.formatted_string_for(bin), "+".repeat(bar))?;
        }
        Ok(())
    }
}

/// Renders `value` through a printf-style format holding one `%f` conversion, with an optional
/// `.N` precision. Surrounding text is kept and `%%` is a literal percent sign. A format with no
/// usable conversion falls back to two decimal places.
fn format_value(format: &str, value: f64) -> String {
    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;
    let mut converted = false;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];
        if let Some(tail) = rest.strip_prefix('%') {
            out.push('%');
            rest = tail;
            continue;
        }
        match parse_conversion(rest) {
            Some((precision, consumed)) if !converted => {
                out.push_str(&format!("{value:.precision$}"));
                rest = &rest[consumed..];
                converted = true;
            }
            _ => out.push('%'),
        }
    }
    out.push_str(rest);

    if converted {
        out
    } else {
        format!("{value:.2}")
    }
}

/// Parses `[.N]f` after a `%`, returning the precision and the bytes consumed.
fn parse_conversion(conversion: &str) -> Option<(usize, usize)> {
    let (precision, consumed) = match conversion.strip_prefix('.') {
        Some(digits) => {
            let len = digits.bytes().take_while(u8::is_ascii_digit).count();
            let precision = if len == 0 { 0 } else { digits[..len].parse().ok()? };
            (precision, 1 + len)
        }
        // printf's default precision
        None => (6, 0),
    };
    match conversion[consumed..].chars().next() {
        Some('f') | Some('F') => Some((precision, consumed + 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value("%.2f", 1.005), format!("{:.2}", 1.005));
        assert_eq!(format_value("%.1f km/h", 12.34), "12.3 km/h");
        assert_eq!(format_value("~%.0f%%", 49.6), "~50%");
        assert_eq!(format_value("%f", 0.5), "0.500000");
        assert_eq!(format_value("no conversion", 7.12345), "7.12");
        assert_eq!(format_value("%d", 3.0), "3.00");
    }
}
