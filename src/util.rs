// Utility helpers for parsing and formatting.
//
// This module centralizes the "dirty" string/number handling so the
// aggregation code can assume clean, typed values.
use num_format::{Locale, ToFormattedString};
use plotters::style::RGBColor;

pub const CURRENCY_GLYPH: &str = "¥";

/// Parse a numeric-as-string metric into `f64`, degrading anything
/// unusable to `0.0`.
///
/// - Trims whitespace.
/// - Strips thousands separators like `","` before parsing.
/// - Empty, non-numeric and non-finite values (`inf`, `NaN`) become `0.0`.
///
/// Commas are stripped on purpose: `"1,234"` is 1234 here, not the 1 a
/// leading-prefix parse would give.
pub fn parse_amount(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    let s = s.replace(',', "");
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Format an amount the way the scorecard and table show it: `¥1,234,567`.
///
/// The integer part is grouped with the `ja` locale separators via
/// `num-format`. The fraction is rounded to at most three digits with
/// trailing zeros dropped, so summed decimals like `100.1 + 200.2` show
/// as `¥300.3`.
pub fn format_yen(n: f64) -> String {
    format!("{}{}", CURRENCY_GLYPH, format_grouped(n))
}

pub fn format_grouped(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let s = format!("{:.3}", n.abs());
    let (int_part, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut res = match int_part.parse::<u128>() {
        Ok(v) => v.to_formatted_string(&Locale::ja),
        Err(_) => int_part.to_string(),
    };
    if !frac.is_empty() {
        res.push('.');
        res.push_str(frac);
    }
    // no "-0" for values that round away
    if n < 0.0 && res != "0" {
        format!("-{}", res)
    } else {
        res
    }
}

/// Y-axis tick label in units of 万 (10,000): `35000` -> `¥4万`.
pub fn format_man_tick(value: f64) -> String {
    let mut man = (value / 10_000.0).round();
    // avoid printing "-0"
    if man == 0.0 {
        man = 0.0;
    }
    format!("{}{:.0}万", CURRENCY_GLYPH, man)
}

/// Turn a `YYYYMMDD` key into the `MM/DD` label shown on the line chart.
///
/// The year is dropped. Keys that are not exactly eight ASCII digits are
/// returned verbatim rather than sliced.
pub fn date_label(key: &str) -> String {
    if key.len() == 8 && key.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}/{}", &key[4..6], &key[6..8])
    } else {
        key.to_string()
    }
}

/// Parse `#RRGGBB` into a plotters colour. Falls back to black on
/// anything else.
pub fn hex_to_rgb(hex: &str) -> RGBColor {
    let h = hex.trim_start_matches('#');
    if h.len() != 6 || !h.is_ascii() {
        return RGBColor(0, 0, 0);
    }
    let channel = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).unwrap_or(0);
    RGBColor(channel(0), channel(2), channel(4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_handles_common_shapes() {
        assert_eq!(parse_amount("500"), 500.0);
        assert_eq!(parse_amount(" 1,234.5 "), 1234.5);
        assert_eq!(parse_amount("-20"), -20.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[test]
    fn format_yen_groups_thousands() {
        assert_eq!(format_yen(0.0), "¥0");
        assert_eq!(format_yen(1000.0), "¥1,000");
        assert_eq!(format_yen(1234567.0), "¥1,234,567");
        assert_eq!(format_yen(1234.5), "¥1,234.5");
        assert_eq!(format_yen(-98765.0), "¥-98,765");
    }

    #[test]
    fn format_yen_caps_fraction_digits() {
        assert_eq!(format_yen(100.1 + 200.2), "¥300.3");
        assert_eq!(format_yen(1234.56789), "¥1,234.568");
        assert_eq!(format_yen(0.1 + 0.2), "¥0.3");
        assert_eq!(format_yen(2.5000001), "¥2.5");
        assert_eq!(format_yen(-0.0001), "¥0");
    }

    #[test]
    fn man_tick_rounds_to_ten_thousands() {
        assert_eq!(format_man_tick(0.0), "¥0万");
        assert_eq!(format_man_tick(35_000.0), "¥4万");
        assert_eq!(format_man_tick(1_200_000.0), "¥120万");
        assert_eq!(format_man_tick(-1.0), "¥0万");
    }

    #[test]
    fn date_label_slices_fixed_width_keys() {
        assert_eq!(date_label("20240315"), "03/15");
        assert_eq!(date_label("20241231"), "12/31");
    }

    #[test]
    fn date_label_passes_malformed_keys_through() {
        assert_eq!(date_label("2024-03-15"), "2024-03-15");
        assert_eq!(date_label("202403"), "202403");
        assert_eq!(date_label("2024031X"), "2024031X");
        assert_eq!(date_label(""), "");
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(hex_to_rgb("#BF0000"), RGBColor(0xBF, 0, 0));
        assert_eq!(hex_to_rgb("#4285F4"), RGBColor(0x42, 0x85, 0xF4));
        assert_eq!(hex_to_rgb("oops"), RGBColor(0, 0, 0));
    }
}
