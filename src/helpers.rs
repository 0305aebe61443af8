//! Shared text and number helpers used across renderers.
//!
//! Numeric coercion deliberately follows the loose rules wiki templates are
//! written against: an empty string is zero, anything non-numeric is NaN, and
//! NaN is carried into the output text rather than rejected.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DECIMAL_LITERAL: Regex =
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap();
    static ref INTEGER_PREFIX: Regex = Regex::new(r"^[+-]?\d+").unwrap();
}

/// Capitalize the first letter of a single word.
pub fn titlecase(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first letter of a single word.
pub fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// English ordinal form: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, …
pub fn to_ordinal(n: i64) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Ordinal of a numeric string. Non-integers keep their text and take "th".
pub fn ordinal_text(text: &str) -> String {
    let n = to_number(text);
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        to_ordinal(n as i64)
    } else {
        format!("{}th", text)
    }
}

/// `numerator / denominator * 100`, rounded to `decimals` places (default 0).
///
/// Returns `None` when either operand is missing or non-numeric, or when the
/// denominator is zero.
pub fn percentage(
    numerator: Option<&str>,
    denominator: Option<&str>,
    decimals: Option<&str>,
) -> Option<String> {
    let numerator = numerator.filter(|s| !s.trim().is_empty()).map(to_number)?;
    let denominator = denominator.filter(|s| !s.trim().is_empty()).map(to_number)?;
    if !numerator.is_finite() || !denominator.is_finite() || denominator == 0.0 {
        return None;
    }
    let decimals = decimals
        .map(to_number)
        .filter(|d| d.is_finite() && *d >= 0.0)
        .map(|d| d.min(20.0) as i32)
        .unwrap_or(0);
    let scale = 10f64.powi(decimals);
    let value = (numerator / denominator * 100.0 * scale).round() / scale;
    Some(number_to_string(value))
}

/// Permissive numeric coercion: `""` → 0, `"Infinity"` → ∞, junk → NaN.
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if DECIMAL_LITERAL.is_match(trimmed) {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Leading-integer coercion: `"1987 AD"` → 1987, `"abc"` → NaN.
pub fn parse_int(text: &str) -> f64 {
    INTEGER_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Plain decimal rendering of a number: `1980`, `2.5`, `NaN`, `Infinity`.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

/// en-US grouped rendering: `1234567.891` → `1,234,567.891`.
///
/// At most three fraction digits are kept, trailing zeros dropped.
pub fn format_grouped(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    if n < 0.0 && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Character-based substring: `length` chars starting at `start`.
///
/// A negative `start` counts back from the end; a NaN `start` is 0. A missing
/// `length` runs to the end of the string, a NaN or negative one yields `""`.
pub fn substr(text: &str, start: f64, length: Option<f64>) -> String {
    let total = text.chars().count() as f64;
    let start = if start.is_nan() { 0.0 } else { start.trunc() };
    let start = if start < 0.0 { (total + start).max(0.0) } else { start.min(total) };
    let length = match length {
        None => total - start,
        Some(l) if l.is_nan() => 0.0,
        Some(l) => l.trunc().clamp(0.0, total - start),
    };
    text.chars()
        .skip(start as usize)
        .take(length.max(0.0) as usize)
        .collect()
}

/// Which side [`pad`] fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSide {
    Start,
    End,
}

/// Widest result [`pad`] will build.
pub const MAX_PAD: usize = 10_000;

/// Pad `text` with repetitions of `filler` up to `target` characters, at most
/// [`MAX_PAD`].
pub fn pad(text: &str, target: f64, filler: &str, side: PadSide) -> String {
    let current = text.chars().count();
    if !target.is_finite() || filler.is_empty() {
        return text.to_string();
    }
    let target = target.min(MAX_PAD as f64);
    if target <= current as f64 {
        return text.to_string();
    }
    let missing = target as usize - current;
    let padding: String = filler.chars().cycle().take(missing).collect();
    match side {
        PadSide::Start => format!("{}{}", padding, text),
        PadSide::End => format!("{}{}", text, padding),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod helper_tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────
    // Ordinals
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(to_ordinal(1), "1st");
        assert_eq!(to_ordinal(2), "2nd");
        assert_eq!(to_ordinal(3), "3rd");
        assert_eq!(to_ordinal(4), "4th");
        assert_eq!(to_ordinal(21), "21st");
        assert_eq!(to_ordinal(102), "102nd");
    }

    #[test]
    fn ordinal_teens_always_th() {
        assert_eq!(to_ordinal(11), "11th");
        assert_eq!(to_ordinal(12), "12th");
        assert_eq!(to_ordinal(13), "13th");
        assert_eq!(to_ordinal(111), "111th");
        assert_eq!(to_ordinal(113), "113th");
    }

    #[test]
    fn ordinal_of_text() {
        assert_eq!(ordinal_text("22"), "22nd");
        assert_eq!(ordinal_text("NaN"), "NaNth");
        assert_eq!(ordinal_text("2.5"), "2.5th");
    }

    // ─────────────────────────────────────────────────────────────
    // Percentage
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn percentage_rounds() {
        assert_eq!(percentage(Some("50"), Some("200"), Some("0")), Some("25".to_string()));
        assert_eq!(percentage(Some("1"), Some("3"), Some("2")), Some("33.33".to_string()));
        assert_eq!(percentage(Some("2"), Some("3"), None), Some("67".to_string()));
    }

    #[test]
    fn percentage_cannot_compute() {
        assert_eq!(percentage(Some("1"), Some("0"), None), None);
        assert_eq!(percentage(Some("1"), None, None), None);
        assert_eq!(percentage(Some("1"), Some("abc"), None), None);
        assert_eq!(percentage(None, Some("4"), None), None);
    }

    // ─────────────────────────────────────────────────────────────
    // Numeric coercion
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn to_number_rules() {
        assert_eq!(to_number("1987"), 1987.0);
        assert_eq!(to_number(" 2.5 "), 2.5);
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number("1e3"), 1000.0);
        assert_eq!(to_number(".5"), 0.5);
        assert!(to_number("12abc").is_nan());
        assert!(to_number("inf").is_nan());
        assert_eq!(to_number("Infinity"), f64::INFINITY);
    }

    #[test]
    fn parse_int_rules() {
        assert_eq!(parse_int("1987"), 1987.0);
        assert_eq!(parse_int("1987 AD"), 1987.0);
        assert_eq!(parse_int("-44 BC"), -44.0);
        assert!(parse_int("circa 1987").is_nan());
        assert!(parse_int("").is_nan());
    }

    #[test]
    fn number_strings() {
        assert_eq!(number_to_string(1980.0), "1980");
        assert_eq!(number_to_string(2.5), "2.5");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
    }

    #[test]
    fn grouped_numbers() {
        assert_eq!(format_grouped(1234567.0), "1,234,567");
        assert_eq!(format_grouped(1234.5678), "1,234.568");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(-1234.0), "-1,234");
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(-0.0001), "0");
        assert_eq!(format_grouped(f64::NAN), "NaN");
    }

    // ─────────────────────────────────────────────────────────────
    // Strings
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn titlecase_words() {
        assert_eq!(titlecase("won"), "Won");
        assert_eq!(titlecase("élan"), "Élan");
        assert_eq!(titlecase(""), "");
    }

    #[test]
    fn substr_rules() {
        assert_eq!(substr("abcdef", 1.0, Some(3.0)), "bcd");
        assert_eq!(substr("abcdef", 0.0, None), "abcdef");
        assert_eq!(substr("abcdef", -2.0, None), "ef");
        assert_eq!(substr("abcdef", f64::NAN, Some(2.0)), "ab");
        assert_eq!(substr("abcdef", 2.0, Some(f64::NAN)), "");
        assert_eq!(substr("abc", 5.0, Some(2.0)), "");
    }

    #[test]
    fn padding() {
        assert_eq!(pad("7", 3.0, "0", PadSide::Start), "007");
        assert_eq!(pad("7", 4.0, "ab", PadSide::End), "7aba");
        assert_eq!(pad("long", 2.0, "0", PadSide::Start), "long");
        assert_eq!(pad("7", f64::NAN, "0", PadSide::Start), "7");
        assert_eq!(pad("7", f64::INFINITY, "0", PadSide::Start), "7");
    }

    #[test]
    fn padding_is_capped() {
        let wide = pad("7", 1e20, "0", PadSide::Start);
        assert_eq!(wide.chars().count(), MAX_PAD);
        assert!(wide.ends_with("07"));
        assert_eq!(pad("7", 1e10, "ab", PadSide::End).chars().count(), MAX_PAD);
        let long = "x".repeat(MAX_PAD + 5);
        assert_eq!(pad(&long, 1e20, "0", PadSide::Start), long);
    }
}
