// Presentation adapter: turns one row snapshot into the read-only views
// the rendering side consumes (scorecard, bar entries, table rows, line
// datasets). Pure functions only; widget state lives in `renderer`.
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use crate::aggregator::{aggregate, Aggregation};
use crate::normalizer::normalize_all;
use crate::series::build_series;
use crate::types::{BarEntry, Dashboard, LineChart, LineDataset, RawRow, TableRow};
use crate::util::format_yen;

pub const RAKUTEN_COLOR: &str = "#BF0000";
pub const YAHOO_COLOR: &str = "#5F00BA";
pub const AMAZON_COLOR: &str = "#FF9900";
pub const DEFAULT_COLOR: &str = "#4285F4";

/// Alpha suffix appended to a line colour for its translucent fill.
const FILL_ALPHA: &str = "20";

static PLATFORM_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Rakuten", RAKUTEN_COLOR),
        ("Yahoo", YAHOO_COLOR),
        ("Amazon", AMAZON_COLOR),
    ])
});

pub fn platform_color(platform: &str) -> &'static str {
    PLATFORM_COLORS
        .get(platform)
        .copied()
        .unwrap_or(DEFAULT_COLOR)
}

pub fn scorecard(agg: &Aggregation) -> String {
    format_yen(agg.total_amount())
}

/// Bar chart entries, ordered by platform name.
pub fn bar_entries(agg: &Aggregation) -> Vec<BarEntry> {
    agg.platform_totals
        .iter()
        .map(|(platform, amount)| BarEntry {
            platform: platform.clone(),
            amount: *amount,
            color: platform_color(platform),
        })
        .collect()
}

/// Table rows, largest amount first. The sort is stable over the
/// name-ordered totals, so ties stay alphabetical.
pub fn table_rows(agg: &Aggregation) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = agg
        .platform_totals
        .iter()
        .map(|(platform, amount)| TableRow {
            platform: platform.clone(),
            amount: *amount,
            color: platform_color(platform),
        })
        .collect();
    rows.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    rows
}

pub fn line_chart(agg: &Aggregation) -> LineChart {
    let set = build_series(&agg.time_series, &agg.platforms());
    let labels = set.labels();
    let datasets = set
        .series
        .into_iter()
        .map(|s| {
            let color = platform_color(&s.platform);
            LineDataset {
                platform: s.platform,
                values: s.values,
                color,
                fill_color: format!("{}{}", color, FILL_ALPHA),
            }
        })
        .collect();
    LineChart {
        dates: set.dates,
        labels,
        datasets,
    }
}

/// Build every view for one render cycle.
///
/// Returns `None` for an empty row set so the caller can skip the update
/// and keep whatever is on screen.
pub fn build_dashboard(rows: &[RawRow]) -> Option<Dashboard> {
    if rows.is_empty() {
        return None;
    }
    let normalized = normalize_all(rows);
    let agg = aggregate(&normalized);
    debug!(
        rows = normalized.len(),
        platforms = agg.platform_totals.len(),
        dates = agg.time_series.len(),
        "aggregated snapshot"
    );

    Some(Dashboard {
        scorecard: scorecard(&agg),
        total_amount: agg.total_amount(),
        bars: bar_entries(&agg),
        table: table_rows(&agg),
        line: line_chart(&agg),
    })
}
