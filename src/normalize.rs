//! Value and label normalization for loosely formatted census exports
//!
//! Estimates and margins of error arrive as strings like `"1,234"`,
//! `"+/-512"`, `"±87"` or `"N/A"`. Labels arrive as free text and must map
//! to stable ids.

/// Parse a formatted number, returning `NaN` when no number is present.
///
/// Strips quotes, the Unicode minus sign, `±`, `+/-`, `$`, thousands
/// separators and surrounding whitespace. The sign is a formatting artifact
/// for estimate/MOE fields, so the absolute value is returned.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .replace("+/-", "")
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | '\u{2212}' | '±' | ',' | '$'))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("n/a") {
        return f64::NAN;
    }

    match cleaned.parse::<f64>() {
        Ok(n) => n.abs(),
        Err(_) => f64::NAN,
    }
}

/// Derive a stable identifier from a free-text label.
///
/// trim → collapse whitespace runs to `_` → drop anything outside
/// `[A-Za-z0-9_]` → uppercase. Idempotent.
pub fn normalize_id(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
