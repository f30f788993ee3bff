//! Compact number notation for dashboard panels (`12345` -> `"12.3K"`).

use crate::stats::Metric;

const UNITS: [(u64, &str); 4] = [
    (1_000_000_000_000, "T"),
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

/// Formats a count in short compact notation with at most one decimal.
///
/// `None` and `0` both render as `"0"`. Values below 1000 are printed as-is.
/// Rounding that reaches the next unit is promoted (`999_950` -> `"1M"`).
#[must_use]
pub fn format_compact(value: Option<u64>) -> String {
    let Some(value) = value.filter(|v| *v > 0) else {
        return "0".to_string();
    };

    let Some(idx) = UNITS.iter().position(|(size, _)| value >= *size) else {
        return value.to_string();
    };

    let mut idx = idx;
    let mut tenths = round_tenths(value, UNITS[idx].0);
    if tenths >= 10_000 && idx > 0 {
        idx -= 1;
        tenths = round_tenths(value, UNITS[idx].0);
    }

    let suffix = UNITS[idx].1;
    let (whole, frac) = (tenths / 10, tenths % 10);
    if frac == 0 {
        format!("{whole}{suffix}")
    } else {
        format!("{whole}.{frac}{suffix}")
    }
}

/// Formats an upstream metric.
///
/// Numeric metrics go through [`format_compact`]; text that is not a plain
/// count (such as `"N/A"`) is shown verbatim.
#[must_use]
pub fn format_metric(metric: Option<&Metric>) -> String {
    match metric {
        None => "0".to_string(),
        Some(m) => match m.as_u64() {
            Some(n) => format_compact(Some(n)),
            None => match m {
                Metric::Text(s) if !s.trim().is_empty() => s.clone(),
                _ => "0".to_string(),
            },
        },
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_tenths(value: u64, unit: u64) -> u64 {
    let scaled = u128::from(value) * 10 + u128::from(unit) / 2;
    (scaled / u128::from(unit)) as u64
}
