// Entry point and high-level CLI flow.
//
// - `render` runs one render cycle per snapshot file against a single
//   dashboard, so charts from earlier cycles are replaced and empty
//   snapshots leave the previous output untouched.
// - `summarize` prints the dashboard view of one snapshot as JSON.
mod aggregator;
mod charts;
mod config;
mod host;
mod loader;
mod normalizer;
mod output;
mod presentation;
mod renderer;
mod series;
mod types;
mod util;

use anyhow::Result;
use clap::Parser;
use config::{Cli, Command, RenderArgs, RenderConfig, SummarizeArgs};
use host::FileHost;
use output::DashboardExport;
use renderer::DashboardRenderer;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use types::DataSnapshot;

/// Handle `render`: feed every snapshot through one renderer in order.
///
/// A snapshot that cannot be read counts as a cycle without data.
fn handle_render(args: &RenderArgs) -> Result<()> {
    let mut renderer = DashboardRenderer::new(FileHost::new(RenderConfig::from(args))?);
    info!("writing dashboard to {}", renderer.backend().out_dir().display());

    let mut last = None;
    for path in &args.inputs {
        info!("render cycle: {}", path.display());
        let snapshot = loader::load_snapshot(path).unwrap_or_else(|e| {
            error!("{:#}", e);
            DataSnapshot::default()
        });
        if let Some(dashboard) = renderer.render(&snapshot) {
            last = Some((path, dashboard));
        }
    }

    info!(
        "{} of {} snapshots rendered",
        renderer.cycles(),
        args.inputs.len()
    );
    for chart in [renderer.bar_chart(), renderer.line_chart()].into_iter().flatten() {
        info!("chart: {}", chart.path.display());
    }

    if let Some(json_path) = &args.json {
        match &last {
            Some((source, dashboard)) => {
                output::write_json(json_path, &DashboardExport::new(source, dashboard))?;
                info!("dashboard view written to {}", json_path.display());
            }
            None => warn!("nothing rendered, {} not written", json_path.display()),
        }
    }
    Ok(())
}

/// Handle `summarize`: aggregate only, no charts.
fn handle_summarize(args: &SummarizeArgs) -> Result<()> {
    let snapshot = loader::load_snapshot(&args.input)?;
    match presentation::build_dashboard(snapshot.rows()) {
        Some(dashboard) => {
            let export = DashboardExport::new(&args.input, &dashboard);
            println!("{}", serde_json::to_string_pretty(&export)?);
        }
        None => warn!("No rows in {}", args.input.display()),
    }
    Ok(())
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Render(args) => handle_render(args),
        Command::Summarize(args) => handle_summarize(args),
    }
}
