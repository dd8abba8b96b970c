use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, warn};

use crate::types::{CsvRow, DataSnapshot, MetricValue, RawRow};

/// Read one data snapshot from disk.
///
/// `.csv` files are read as `platform,date,amount` records; anything else
/// is parsed as the host's JSON snapshot shape.
pub fn load_snapshot(path: &Path) -> Result<DataSnapshot> {
    let is_csv = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        load_csv(path)
    } else {
        load_json(path)
    }
}

pub fn load_json(path: &Path) -> Result<DataSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    parse_json(&text).with_context(|| format!("parsing snapshot {}", path.display()))
}

pub fn parse_json(text: &str) -> Result<DataSnapshot> {
    let snapshot: DataSnapshot = serde_json::from_str(text)?;
    debug!(rows = snapshot.rows().len(), "parsed JSON snapshot");
    Ok(snapshot)
}

pub fn load_csv(path: &Path) -> Result<DataSnapshot> {
    let rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_csv(rdr)
}

fn read_csv<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<DataSnapshot> {
    let headers = rdr.byte_headers()?.clone();
    let column = |name: &str, fallback: usize| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name.as_bytes()))
            .unwrap_or(fallback)
    };
    let (platform_col, date_col, amount_col) =
        (column("platform", 0), column("date", 1), column("amount", 2));

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.byte_records() {
        let rec = match result {
            Ok(r) => r,
            Err(e) => {
                skipped += 1;
                debug!("skipping unreadable CSV record: {}", e);
                continue;
            }
        };
        // Bad bytes in a cell degrade that cell, not the record.
        let field = |i: usize| {
            rec.get(i)
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .filter(|s| !s.is_empty())
        };
        rows.push(csv_to_raw(CsvRow {
            platform: field(platform_col),
            date: field(date_col),
            amount: field(amount_col),
        }));
    }
    if skipped > 0 {
        warn!("{} CSV records could not be read", skipped);
    }
    Ok(DataSnapshot::from_rows(rows))
}

/// Lay a CSV record out the way the host delivers rows: platform then
/// date as dimensions, amount as the single metric.
fn csv_to_raw(rec: CsvRow) -> RawRow {
    let mut dimensions = vec![rec.platform.unwrap_or_default()];
    if let Some(date) = rec.date.filter(|d| !d.trim().is_empty()) {
        dimensions.push(date);
    }
    let metrics = rec.amount.map(MetricValue::Text).into_iter().collect();
    RawRow {
        dimensions,
        metrics,
    }
}
