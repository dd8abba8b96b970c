use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "EC platform sales dashboard renderer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the dashboard once per snapshot, in order
    Render(RenderArgs),
    /// Print the dashboard view of one snapshot as JSON
    Summarize(SummarizeArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Snapshot files (.json host format or .csv platform,date,amount)
    #[arg(required = true, value_hint = ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// Directory for charts and the table CSV
    #[arg(short, long, env = "DASHBOARD_OUT_DIR", default_value = "dashboard_out", value_hint = ValueHint::DirPath)]
    pub out_dir: PathBuf,

    #[arg(long, env = "DASHBOARD_CHART_WIDTH", default_value_t = 960)]
    pub width: u32,

    #[arg(long, env = "DASHBOARD_CHART_HEIGHT", default_value_t = 540)]
    pub height: u32,

    /// Table rows shown in the console preview
    #[arg(long, env = "DASHBOARD_PREVIEW_ROWS", default_value_t = 10)]
    pub preview_rows: usize,

    /// Also write the dashboard view of the last rendered snapshot as JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
}

/// Resolved settings for the file-based dashboard host.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub out_dir: PathBuf,
    pub chart_size: (u32, u32),
    pub preview_rows: usize,
}

impl From<&RenderArgs> for RenderConfig {
    fn from(args: &RenderArgs) -> Self {
        RenderConfig {
            out_dir: args.out_dir.clone(),
            chart_size: (args.width.max(1), args.height.max(1)),
            preview_rows: args.preview_rows,
        }
    }
}
