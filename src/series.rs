use crate::types::TimeSeries;
use crate::util::date_label;

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSeries {
    pub platform: String,
    pub values: Vec<f64>,
}

/// Parallel series sharing one date axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    pub dates: Vec<String>,
    pub series: Vec<PlatformSeries>,
}

impl SeriesSet {
    pub fn labels(&self) -> Vec<String> {
        self.dates.iter().map(|d| date_label(d)).collect()
    }
}

/// Lay the time series out as one value per (platform, date), zero-filling
/// combinations with no rows.
///
/// The date axis is the plain lexicographic order of the keys, which is
/// chronological for fixed-width `YYYYMMDD`. Series come out in the order of
/// `platforms`.
pub fn build_series(time_series: &TimeSeries, platforms: &[String]) -> SeriesSet {
    // BTreeMap keys are already in byte order.
    let dates: Vec<String> = time_series.keys().cloned().collect();

    let series = platforms
        .iter()
        .map(|platform| {
            let values = dates
                .iter()
                .map(|d| {
                    time_series
                        .get(d)
                        .and_then(|by_platform| by_platform.get(platform))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect();
            PlatformSeries {
                platform: platform.clone(),
                values,
            }
        })
        .collect();

    SeriesSet { dates, series }
}
