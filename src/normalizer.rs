use crate::types::{MetricValue, NormalizedRow, RawRow};
use crate::util::parse_amount;

pub const UNKNOWN_PLATFORM: &str = "Unknown";

/// Map one raw host row onto the fixed record the aggregator works with.
///
/// Never fails: a missing or empty platform becomes `"Unknown"`, a missing
/// or empty date becomes `None`, and a missing or malformed amount becomes
/// `0.0` so the row still counts toward the totals.
pub fn normalize(row: &RawRow) -> NormalizedRow {
    let platform = row
        .dimensions
        .first()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_PLATFORM)
        .to_string();

    let date = row
        .dimensions
        .get(1)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let amount = match row.metrics.first() {
        Some(MetricValue::Number(v)) if v.is_finite() => *v,
        Some(MetricValue::Text(s)) => parse_amount(s),
        _ => 0.0,
    };

    NormalizedRow {
        platform,
        date,
        amount,
    }
}

pub fn normalize_all(rows: &[RawRow]) -> Vec<NormalizedRow> {
    rows.iter().map(normalize).collect()
}
