//! # Text Processing Utilities
//!
//! Secret redaction for anything that might reach logs or the screen, and
//! display formatting for numbers and column headers.

use heck::ToTitleCase;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Redacts values that look like secrets in a string.
///
/// Covers `Authorization` and `x-hi-api-key` header lines, bearer tokens, and
/// `NAME=value` assignments whose name ends in KEY, TOKEN, SECRET or
/// PASSWORD. Key names are kept so the output stays useful for debugging.
///
/// # Example
/// ```rust
/// use hashdash_util::text_processing::redact_sensitive;
///
/// assert_eq!(redact_sensitive("x-hi-api-key: abc123"), "x-hi-api-key: [REDACTED]");
/// assert_eq!(redact_sensitive("HASHRATE_INDEX_API_KEY=abc123"), "HASHRATE_INDEX_API_KEY=[REDACTED]");
/// ```
pub fn redact_sensitive(input: &str) -> String {
    static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(build_redact_patterns);

    let mut redacted = input.to_string();
    for pattern in PATTERNS.iter() {
        redacted = pattern
            .replace_all(&redacted, |captures: &regex::Captures| {
                let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{prefix}[REDACTED]")
            })
            .to_string();
    }
    redacted
}

fn build_redact_patterns() -> Vec<Regex> {
    [
        r"(?i)((?:authorization|x-hi-api-key|x-api-key):\s*)(\S+(?:\s+\S+)*)",
        r"(?i)((?:^|\b)Bearer\s+)([A-Za-z0-9\-._~+/]+=*)",
        r"(?i)\b([A-Z0-9_]*?(?:KEY|TOKEN|SECRET|PASSWORD)=)(\S+)",
    ]
    .into_iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
}

/// Masks a credential for display, keeping at most the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "•".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "•".repeat(count - 4), tail)
}

/// Formats a number for a metric tile or statistics cell.
///
/// Magnitudes of a million and up get a unit suffix, whole numbers are
/// grouped with commas, and fractions keep up to four decimals with
/// trailing zeros trimmed.
///
/// # Example
/// ```rust
/// use hashdash_util::text_processing::format_number;
///
/// assert_eq!(format_number(50_000.0), "50,000");
/// assert_eq!(format_number(70e12), "70.00 T");
/// assert_eq!(format_number(2.25), "2.25");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    const UNITS: &[(f64, &str)] = &[(1e18, "E"), (1e15, "P"), (1e12, "T"), (1e9, "B"), (1e6, "M")];
    let magnitude = value.abs();
    if let Some((scale, suffix)) = UNITS.iter().find(|(scale, _)| magnitude >= *scale) {
        return format!("{:.2} {suffix}", value / scale);
    }
    if value.fract() == 0.0 {
        return group_thousands(value as i64);
    }
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed.split_once('.') {
        Some((whole, fraction)) => match whole.parse::<i64>() {
            Ok(whole_value) if whole_value.abs() >= 1000 => format!("{}.{fraction}", group_thousands(whole_value)),
            _ => trimmed.to_string(),
        },
        None => trimmed.to_string(),
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0 { format!("-{grouped}") } else { grouped }
}

/// Turns an API field name into a column header (`hashpriceUsd` -> `Hashprice USD`).
pub fn header_title(field: &str) -> String {
    field
        .to_title_case()
        .split(' ')
        .map(preserve_acronym)
        .collect::<Vec<_>>()
        .join(" ")
}

fn preserve_acronym(word: &str) -> String {
    match word.to_ascii_uppercase().as_str() {
        "USD" | "BTC" | "ASIC" | "OHLC" | "ID" | "TH" | "PH" | "EH" => word.to_ascii_uppercase(),
        _ => word.to_string(),
    }
}

/// Truncates `text` to fit `max_width` terminal columns, appending `…` when
/// something was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width + 1 > max_width {
            break;
        }
        out.push(ch);
        used += width;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_api_key_headers_and_assignments() {
        assert_eq!(redact_sensitive("Authorization: Bearer abc.def"), "Authorization: [REDACTED]");
        assert_eq!(redact_sensitive("token Bearer abc123"), "token Bearer [REDACTED]");
        assert_eq!(redact_sensitive("API_KEY=abc TOKEN=xyz"), "API_KEY=[REDACTED] TOKEN=[REDACTED]");
        assert_eq!(redact_sensitive("interval=_7_DAYS"), "interval=_7_DAYS");
    }

    #[test]
    fn masks_keep_only_a_short_tail() {
        assert_eq!(mask_secret("abcdefgh"), "••••efgh");
        assert_eq!(mask_secret("abc"), "•••");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn numbers_are_grouped_or_scaled() {
        assert_eq!(format_number(510.0), "510");
        assert_eq!(format_number(-1_234_567.0), "-1.23 M");
        assert_eq!(format_number(12_345.5), "12,345.5");
        assert_eq!(format_number(-12_345.0), "-12,345");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(1.5e18), "1.50 E");
    }

    #[test]
    fn headers_keep_currency_acronyms() {
        assert_eq!(header_title("hashpriceUsd"), "Hashprice USD");
        assert_eq!(header_title("timestamp"), "Timestamp");
        assert_eq!(header_title("network_difficulty"), "Network Difficulty");
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("hashrate", 20), "hashrate");
        assert_eq!(truncate_to_width("hashrate", 5), "hash…");
        assert_eq!(truncate_to_width("hashrate", 0), "");
    }
}
