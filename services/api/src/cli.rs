use crate::score::{run_options, run_score, OptionsArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tender_scoring::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tender Scoring Engine",
    about = "Score supplier capability assessments from the command line or over HTTP",
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
    /// Score one assessment from a calculation row export and print the ranking
    Score(ScoreArgs),
    /// Flatten a taxonomy file into selectable requirement options
    Options(OptionsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Calculation row export (CSV) served by the row source
    #[arg(long)]
    pub(crate) rows: Option<PathBuf>,
    /// Assessment definitions (JSON array) that may be scored
    #[arg(long)]
    pub(crate) assessments: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Options(args) => run_options(args),
    }
}
