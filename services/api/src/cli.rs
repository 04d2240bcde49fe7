use crate::demo::{run_analyze, run_demo, AnalyzeArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use edital_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Edital Viability Analyzer",
    about = "Score procurement notices against a company profile and serve the analysis API",
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
    /// Analyze a notice/company draft pair read from JSON files
    Analyze(AnalyzeArgs),
    /// Run two seeded scenarios end-to-end and render both analyses
    Demo(DemoArgs),
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
        Command::Analyze(args) => run_analyze(args),
        Command::Demo(args) => run_demo(args),
    }
}
