use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tabled::Tabled;

use crate::util::format_yen;

/// One data update as delivered by the hosting platform.
///
/// Every level is optional: a snapshot without `tables`, without the
/// `DEFAULT` slot, or with an empty row list is a valid "no data" input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSnapshot {
    #[serde(default)]
    pub tables: Option<Tables>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tables {
    #[serde(rename = "DEFAULT", default)]
    pub default: Option<TableData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableData {
    #[serde(default, deserialize_with = "lenient_rows")]
    pub rows: Vec<RawRow>,
}

/// A row entry that isn't a row object still counts, as an empty row.
fn lenient_rows<'de, D>(deserializer: D) -> Result<Vec<RawRow>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(array_cells(Value::deserialize(deserializer)?)
        .into_iter()
        .map(|row| RawRow::deserialize(row).unwrap_or_default())
        .collect())
}

fn array_cells(value: Value) -> Vec<Value> {
    match value {
        Value::Array(cells) => cells,
        _ => Vec::new(),
    }
}

impl DataSnapshot {
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        DataSnapshot {
            tables: Some(Tables {
                default: Some(TableData { rows }),
            }),
        }
    }

    /// Rows of the default table, or an empty slice when any level is missing.
    pub fn rows(&self) -> &[RawRow] {
        self.tables
            .as_ref()
            .and_then(|t| t.default.as_ref())
            .map(|t| t.rows.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(default, deserialize_with = "lenient_dimensions")]
    pub dimensions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_metrics")]
    pub metrics: Vec<MetricValue>,
}

/// Dimension cells are kept positional. Numbers keep their text, anything
/// else that isn't a string becomes `""`, which the normalizer reads as
/// absent. A `dimensions` value that isn't an array yields no cells.
fn lenient_dimensions<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(array_cells(Value::deserialize(deserializer)?)
        .into_iter()
        .map(|cell| match cell {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
        .collect())
}

fn lenient_metrics<'de, D>(deserializer: D) -> Result<Vec<MetricValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(array_cells(Value::deserialize(deserializer)?)
        .into_iter()
        .map(|cell| MetricValue::deserialize(cell).unwrap_or(MetricValue::Null))
        .collect())
}

/// A metric cell. The host sends numbers as strings, but plain JSON
/// numbers and nulls show up in hand-made snapshots too. Anything else is
/// kept as `Other` and counts as zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    Null,
    Other(IgnoredAny),
}

/// CSV snapshot record (`platform,date,amount`).
#[derive(Debug, Default)]
pub struct CsvRow {
    pub platform: Option<String>,
    pub date: Option<String>,
    pub amount: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub platform: String,
    pub date: Option<String>,
    pub amount: f64,
}

/// Platform name -> summed amount.
pub type PlatformTotals = BTreeMap<String, f64>;

/// Date key (`YYYYMMDD`) -> platform name -> summed amount.
pub type TimeSeries = BTreeMap<String, HashMap<String, f64>>;

#[derive(Debug, Clone, Serialize)]
pub struct BarEntry {
    pub platform: String,
    pub amount: f64,
    pub color: &'static str,
}

fn display_yen(amount: &f64) -> String {
    format_yen(*amount)
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TableRow {
    #[serde(rename = "Platform")]
    #[tabled(rename = "Platform")]
    pub platform: String,
    #[serde(rename = "Sales")]
    #[tabled(rename = "Sales", display_with = "display_yen")]
    pub amount: f64,
    #[serde(rename = "Color")]
    #[tabled(rename = "Color")]
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineDataset {
    pub platform: String,
    pub values: Vec<f64>,
    pub color: &'static str,
    pub fill_color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineChart {
    /// Raw `YYYYMMDD` keys, ascending.
    pub dates: Vec<String>,
    /// Display labels aligned 1:1 with `dates`.
    pub labels: Vec<String>,
    pub datasets: Vec<LineDataset>,
}

/// Everything the rendering collaborator needs for one render cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub scorecard: String,
    pub total_amount: f64,
    pub bars: Vec<BarEntry>,
    pub table: Vec<TableRow>,
    pub line: LineChart,
}
