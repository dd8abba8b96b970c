use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::charts::{draw_bar_chart, draw_line_chart};
use crate::config::RenderConfig;
use crate::output::{table_preview, write_csv};
use crate::renderer::ChartBackend;
use crate::types::{BarEntry, LineChart, TableRow};

pub const BAR_CHART_FILE: &str = "platform_bar.svg";
pub const LINE_CHART_FILE: &str = "daily_trend.svg";
pub const TABLE_FILE: &str = "platform_table.csv";

/// A chart that currently exists on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFile {
    pub path: PathBuf,
}

/// Dashboard widgets backed by the filesystem and the console: SVG charts
/// and a CSV table in `out_dir`, scorecard and table preview on stdout.
pub struct FileHost {
    config: RenderConfig,
}

impl FileHost {
    pub fn new(config: RenderConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.out_dir)
            .with_context(|| format!("creating {}", config.out_dir.display()))?;
        Ok(FileHost { config })
    }

    pub fn out_dir(&self) -> &Path {
        &self.config.out_dir
    }
}

impl ChartBackend for FileHost {
    type Handle = ChartFile;

    fn update_scorecard(&mut self, formatted: &str) -> Result<()> {
        println!("Total Sales: {}\n", formatted);
        Ok(())
    }

    fn update_table(&mut self, rows: &[TableRow]) -> Result<()> {
        let path = self.config.out_dir.join(TABLE_FILE);
        write_csv(&path, rows)?;
        println!("Sales by Platform\n");
        println!("{}\n", table_preview(rows, self.config.preview_rows));
        println!("(Full table exported to {})\n", path.display());
        Ok(())
    }

    fn create_bar_chart(&mut self, bars: &[BarEntry]) -> Result<ChartFile> {
        let path = self.config.out_dir.join(BAR_CHART_FILE);
        draw_bar_chart(&path, bars, self.config.chart_size)
            .with_context(|| format!("drawing {}", path.display()))?;
        info!("Bar chart generated: {}", path.display());
        Ok(ChartFile { path })
    }

    fn create_line_chart(&mut self, line: &LineChart) -> Result<ChartFile> {
        let path = self.config.out_dir.join(LINE_CHART_FILE);
        draw_line_chart(&path, line, self.config.chart_size)
            .with_context(|| format!("drawing {}", path.display()))?;
        info!("Line chart generated: {}", path.display());
        Ok(ChartFile { path })
    }

    fn destroy(&mut self, handle: ChartFile) {
        match std::fs::remove_file(&handle.path) {
            Ok(()) => debug!("removed {}", handle.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove {}: {}", handle.path.display(), e),
        }
    }
}
