// SVG drawing for the two dashboard charts.
use anyhow::{anyhow, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::types::{BarEntry, LineChart};
use crate::util::{format_man_tick, hex_to_rgb};

const GRID_COLOR: RGBColor = RGBColor(0xf0, 0xf0, 0xf0);

/// Helper function to determine the Y-axis range, always anchored at zero
/// and padded so the tallest point isn't on the frame.
fn y_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut lo, mut hi) = (0.0f64, 0.0f64);
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo, lo + 1.0);
    }
    let padding = (hi - lo) * 0.1;
    let lo = if lo < 0.0 { lo - padding } else { 0.0 };
    (lo, hi + padding)
}

/// Platform comparison bar chart: one bar per platform in its own colour.
pub fn draw_bar_chart(path: &Path, bars: &[BarEntry], size: (u32, u32)) -> Result<()> {
    if bars.is_empty() {
        return Err(anyhow!("Cannot draw a bar chart without platforms"));
    }
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (y_min, y_max) = y_range(bars.iter().map(|b| b.amount));
    let labels: Vec<String> = bars.iter().map(|b| b.platform.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Sales by Platform", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0..bars.len()).into_segmented(), y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(ShapeStyle::from(&GRID_COLOR))
        .bold_line_style(ShapeStyle::from(&GRID_COLOR))
        .x_labels(bars.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .y_label_formatter(&|y| format_man_tick(*y))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, b)| {
        let color = hex_to_rgb(b.color);
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), b.amount),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 12, 12);
        bar
    }))?;

    root.present()?;
    Ok(())
}

/// Daily trend chart: one line per platform over the shared date axis.
pub fn draw_line_chart(path: &Path, line: &LineChart, size: (u32, u32)) -> Result<()> {
    if line.dates.is_empty() {
        return Err(anyhow!("Cannot draw a line chart without dated rows"));
    }
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (y_min, y_max) = y_range(line.datasets.iter().flat_map(|s| s.values.iter().copied()));
    let x_max = (line.dates.len() - 1).max(1);
    let labels = &line.labels;

    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Sales", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(ShapeStyle::from(&GRID_COLOR))
        .bold_line_style(ShapeStyle::from(&GRID_COLOR))
        .x_labels(labels.len().min(15))
        .x_label_formatter(&|x| labels.get(*x).cloned().unwrap_or_default())
        .y_label_formatter(&|y| format_man_tick(*y))
        .draw()?;

    for ds in &line.datasets {
        let color = hex_to_rgb(ds.color);
        chart
            .draw_series(LineSeries::new(
                ds.values.iter().enumerate().map(|(i, v)| (i, *v)),
                color.stroke_width(2),
            ))?
            .label(ds.platform.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
