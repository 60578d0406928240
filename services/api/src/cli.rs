use crate::demo::{run_churn_report, run_demo, ChurnReportArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use prospect_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Prospect Intent Engine",
    about = "Demonstrate and run the prospect intent engine from the command line",
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
    /// Analyze personnel-movement churn signals
    Churn {
        #[command(subcommand)]
        command: ChurnCommand,
    },
    /// Run an end-to-end CLI demo covering resolution, gating, and scoring
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ChurnCommand {
    /// Score a movement-event export and print the churn report
    Report(ChurnReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Churn {
            command: ChurnCommand::Report(args),
        } => run_churn_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
