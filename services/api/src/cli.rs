use crate::demo::{run_demo, run_segmentation_report, run_segmentation_summary, DemoArgs};
use crate::demo::{SegmentationReportArgs, SegmentationSummaryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use clinic_ops::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Clinic Customer Segmentation",
    about = "Score clinic customers by recency, frequency and spend and serve the results",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run segmentation against a ledger export
    Segmentation {
        #[command(subcommand)]
        command: SegmentationCommand,
    },
    /// Print a segmentation report for a synthetic clinic ledger
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum SegmentationCommand {
    /// Full RFM report with insights and an optional customer listing
    Report(SegmentationReportArgs),
    /// Segment leaderboard and follow-up priorities
    Summary(SegmentationSummaryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Ledger CSV export to serve (overrides APP_LEDGER_CSV)
    #[arg(long)]
    pub(crate) ledger_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Segmentation {
            command: SegmentationCommand::Report(args),
        } => run_segmentation_report(args),
        Command::Segmentation {
            command: SegmentationCommand::Summary(args),
        } => run_segmentation_summary(args),
        Command::Demo(args) => run_demo(args),
    }
}
