//! Small display helpers shared by the formatting modules.

use chrono::DateTime;

/// Formats an integer with `,` thousands separators: `1234567` -> `1,234,567`.
#[must_use]
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a float with separators and two decimals: `31234.5` -> `31,234.50`.
// Cast safety: display-only, game values are far below i64 range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn format_decimal(value: f64) -> String {
    let total_cents = (value.abs() * 100.0).round() as i64;
    let sign = if value < 0.0 && total_cents > 0 { "-" } else { "" };
    format!(
        "{sign}{}.{:02}",
        format_number(total_cents / 100),
        total_cents % 100
    )
}

/// Formats a unix timestamp as `YYYY-MM-DD`, or `unknown` when out of range.
#[must_use]
pub fn format_date(unix_seconds: i64) -> String {
    DateTime::from_timestamp(unix_seconds, 0)
        .map_or_else(|| "unknown".to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}
