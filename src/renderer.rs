use anyhow::Result;
use tracing::{debug, info, warn};

use crate::presentation::build_dashboard;
use crate::types::{BarEntry, DataSnapshot, Dashboard, LineChart, TableRow};

/// The widgets a dashboard is drawn onto.
///
/// Charts are created as whole objects and handed back as handles; an
/// existing chart is never updated in place, only destroyed and replaced.
pub trait ChartBackend {
    type Handle;

    fn update_scorecard(&mut self, formatted: &str) -> Result<()>;
    fn update_table(&mut self, rows: &[TableRow]) -> Result<()>;
    fn create_bar_chart(&mut self, bars: &[BarEntry]) -> Result<Self::Handle>;
    fn create_line_chart(&mut self, line: &LineChart) -> Result<Self::Handle>;
    fn destroy(&mut self, handle: Self::Handle);
}

/// Owns the backend and the two live chart handles across render cycles.
pub struct DashboardRenderer<B: ChartBackend> {
    backend: B,
    bar_chart: Option<B::Handle>,
    line_chart: Option<B::Handle>,
    cycles: usize,
}

impl<B: ChartBackend> DashboardRenderer<B> {
    pub fn new(backend: B) -> Self {
        DashboardRenderer {
            backend,
            bar_chart: None,
            line_chart: None,
            cycles: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn bar_chart(&self) -> Option<&B::Handle> {
        self.bar_chart.as_ref()
    }

    pub fn line_chart(&self) -> Option<&B::Handle> {
        self.line_chart.as_ref()
    }

    /// Number of render cycles that actually updated the widgets.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Run one render cycle.
    ///
    /// With no rows nothing is touched and `None` comes back. Otherwise every
    /// widget is updated; a failing widget is logged and skipped.
    pub fn render(&mut self, snapshot: &DataSnapshot) -> Option<Dashboard> {
        if snapshot.tables.is_none() {
            warn!("No data received");
            return None;
        }
        let rows = snapshot.rows();
        debug!(rows = rows.len(), "received data");
        let Some(dashboard) = build_dashboard(rows) else {
            warn!("No rows in data");
            return None;
        };

        if let Err(e) = self.backend.update_scorecard(&dashboard.scorecard) {
            warn!("scorecard update failed: {:#}", e);
        }
        if let Err(e) = self.backend.update_table(&dashboard.table) {
            warn!("table update failed: {:#}", e);
        }

        if let Some(old) = self.bar_chart.take() {
            self.backend.destroy(old);
        }
        match self.backend.create_bar_chart(&dashboard.bars) {
            Ok(h) => self.bar_chart = Some(h),
            Err(e) => warn!("bar chart failed: {:#}", e),
        }

        if let Some(old) = self.line_chart.take() {
            self.backend.destroy(old);
        }
        match self.backend.create_line_chart(&dashboard.line) {
            Ok(h) => self.line_chart = Some(h),
            Err(e) => warn!("line chart failed: {:#}", e),
        }

        self.cycles += 1;
        info!(
            cycle = self.cycles,
            total = %dashboard.scorecard,
            platforms = dashboard.bars.len(),
            dates = dashboard.line.dates.len(),
            "dashboard rendered"
        );
        Some(dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MetricValue, RawRow};
    use anyhow::anyhow;

    #[derive(Default)]
    struct MockBackend {
        next_id: u32,
        events: Vec<String>,
        fail_bar: bool,
    }

    impl ChartBackend for MockBackend {
        type Handle = u32;

        fn update_scorecard(&mut self, formatted: &str) -> Result<()> {
            self.events.push(format!("scorecard {}", formatted));
            Ok(())
        }

        fn update_table(&mut self, rows: &[TableRow]) -> Result<()> {
            self.events.push(format!("table {}", rows.len()));
            Ok(())
        }

        fn create_bar_chart(&mut self, bars: &[BarEntry]) -> Result<u32> {
            if self.fail_bar {
                return Err(anyhow!("no canvas"));
            }
            self.next_id += 1;
            self.events.push(format!("bar#{} {}", self.next_id, bars.len()));
            Ok(self.next_id)
        }

        fn create_line_chart(&mut self, line: &LineChart) -> Result<u32> {
            self.next_id += 1;
            self.events
                .push(format!("line#{} {}", self.next_id, line.datasets.len()));
            Ok(self.next_id)
        }

        fn destroy(&mut self, handle: u32) {
            self.events.push(format!("destroy#{}", handle));
        }
    }

    fn snapshot(rows: &[(&str, &str, &str)]) -> DataSnapshot {
        DataSnapshot::from_rows(
            rows.iter()
                .map(|(p, d, a)| RawRow {
                    dimensions: vec![p.to_string(), d.to_string()],
                    metrics: vec![MetricValue::Text(a.to_string())],
                })
                .collect(),
        )
    }

    #[test]
    fn handles_start_empty() {
        let r = DashboardRenderer::new(MockBackend::default());
        assert!(r.bar_chart().is_none());
        assert!(r.line_chart().is_none());
        assert_eq!(r.cycles(), 0);
    }

    #[test]
    fn first_render_creates_without_destroy() {
        let mut r = DashboardRenderer::new(MockBackend::default());
        let d = r.render(&snapshot(&[("Rakuten", "20240101", "500")]));
        assert!(d.is_some());
        assert_eq!(
            r.backend().events,
            vec!["scorecard ¥500", "table 1", "bar#1 1", "line#2 1"]
        );
        assert_eq!(r.bar_chart(), Some(&1));
        assert_eq!(r.line_chart(), Some(&2));
    }

    #[test]
    fn old_charts_destroyed_before_replacement() {
        let mut r = DashboardRenderer::new(MockBackend::default());
        r.render(&snapshot(&[("Rakuten", "20240101", "500")]));
        r.render(&snapshot(&[
            ("Rakuten", "20240101", "500"),
            ("Amazon", "20240102", "300"),
        ]));
        assert_eq!(
            &r.backend().events[4..],
            &[
                "scorecard ¥800",
                "table 2",
                "destroy#1",
                "bar#3 2",
                "destroy#2",
                "line#4 2"
            ]
        );
        assert_eq!(r.bar_chart(), Some(&3));
        assert_eq!(r.line_chart(), Some(&4));
        assert_eq!(r.cycles(), 2);
    }

    #[test]
    fn empty_input_leaves_previous_state() {
        let mut r = DashboardRenderer::new(MockBackend::default());
        r.render(&snapshot(&[("Yahoo", "20240101", "10")]));
        let before = r.backend().events.len();

        assert!(r.render(&DataSnapshot::default()).is_none());
        assert!(r.render(&DataSnapshot::from_rows(vec![])).is_none());

        assert_eq!(r.backend().events.len(), before);
        assert_eq!(r.bar_chart(), Some(&1));
        assert_eq!(r.line_chart(), Some(&2));
        assert_eq!(r.cycles(), 1);
    }

    #[test]
    fn failing_widget_does_not_stop_the_rest() {
        let backend = MockBackend {
            fail_bar: true,
            ..MockBackend::default()
        };
        let mut r = DashboardRenderer::new(backend);
        let d = r.render(&snapshot(&[("Amazon", "20240101", "300")]));
        assert_eq!(d.map(|d| d.total_amount), Some(300.0));
        assert!(r.bar_chart().is_none());
        assert_eq!(r.line_chart(), Some(&1));
    }
}
