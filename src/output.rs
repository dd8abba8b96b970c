use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

use crate::types::Dashboard;

/// The dashboard view as written by `--json` and `summarize`.
#[derive(Debug, Serialize)]
pub struct DashboardExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub dashboard: &'a Dashboard,
}

impl<'a> DashboardExport<'a> {
    pub fn new(source: &Path, dashboard: &'a Dashboard) -> Self {
        DashboardExport {
            generated_at: Utc::now(),
            source: source.display().to_string(),
            dashboard,
        }
    }
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("opening {} for writing", path.display()))?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Markdown preview of the first `max_rows` rows, or `(no rows)`.
pub fn table_preview<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::build_dashboard;
    use crate::types::{MetricValue, RawRow, TableRow};

    fn table() -> Vec<TableRow> {
        vec![
            TableRow {
                platform: "Rakuten".to_string(),
                amount: 700.0,
                color: "#BF0000",
            },
            TableRow {
                platform: "Amazon".to_string(),
                amount: 1234.0,
                color: "#FF9900",
            },
        ]
    }

    #[test]
    fn preview_formats_amounts() {
        let s = table_preview(&table(), 10);
        assert!(s.contains("| Platform"));
        assert!(s.contains("¥1,234"));
        assert!(s.contains("Rakuten"));
    }

    #[test]
    fn preview_truncates_and_handles_empty() {
        let s = table_preview(&table(), 1);
        assert!(s.contains("Rakuten"));
        assert!(!s.contains("Amazon"));
        assert_eq!(table_preview::<TableRow>(&[], 5), "(no rows)");
    }

    #[test]
    fn csv_keeps_raw_amounts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        write_csv(&path, &table()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Platform,Sales,Color"));
        assert_eq!(lines.next(), Some("Rakuten,700.0,#BF0000"));
    }

    #[test]
    fn json_export_wraps_dashboard() {
        let rows = vec![RawRow {
            dimensions: vec!["Yahoo".to_string(), "20240301".to_string()],
            metrics: vec![MetricValue::Text("2500".to_string())],
        }];
        let dashboard = build_dashboard(&rows).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        write_json(&path, &DashboardExport::new(Path::new("in.json"), &dashboard)).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["source"], "in.json");
        assert_eq!(v["dashboard"]["scorecard"], "¥2,500");
        assert_eq!(v["dashboard"]["line"]["labels"][0], "03/01");
        assert!(v["generated_at"].is_string());
    }
}
