use crate::types::{NormalizedRow, PlatformTotals, TimeSeries};

/// The two views derived from one row snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub platform_totals: PlatformTotals,
    pub time_series: TimeSeries,
}

impl Aggregation {
    /// Sum over all platform totals. Summed in key order so the result is
    /// identical on every call for the same input.
    pub fn total_amount(&self) -> f64 {
        self.platform_totals.values().sum()
    }

    /// Every platform seen in the snapshot, ascending. Includes platforms
    /// whose rows all lacked a date.
    pub fn platforms(&self) -> Vec<String> {
        self.platform_totals.keys().cloned().collect()
    }
}

/// Fold normalized rows into per-platform totals and per-date/per-platform
/// totals in one pass.
///
/// Rows without a date still count toward the platform totals but are left
/// out of the time series. Repeated (platform, date) pairs add up.
pub fn aggregate(rows: &[NormalizedRow]) -> Aggregation {
    let mut platform_totals = PlatformTotals::new();
    let mut time_series = TimeSeries::new();

    for r in rows {
        *platform_totals.entry(r.platform.clone()).or_insert(0.0) += r.amount;

        if let Some(date) = &r.date {
            let by_platform = time_series.entry(date.clone()).or_default();
            *by_platform.entry(r.platform.clone()).or_insert(0.0) += r.amount;
        }
    }

    Aggregation {
        platform_totals,
        time_series,
    }
}
