use crate::report::{assemble, ReportSnapshot};
use crate::server;
use clap::{Args, Parser, Subcommand};
use longevity_engine::config::{AppConfig, CardiologyModelVersion};
use longevity_engine::error::AppError;
use longevity_engine::scoring::ScoringError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Longevity Scoring Engine",
    about = "Score longevity report snapshots from the command line or over HTTP",
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
    /// Score a report snapshot from a JSON file and print the result
    Score(ScoreArgs),
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

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a JSON report snapshot
    pub(crate) snapshot: PathBuf,
    /// Override the configured cardiology model (v1 or v3.2)
    #[arg(long, value_parser = parse_model)]
    pub(crate) cardiology_model: Option<CardiologyModelVersion>,
}

fn parse_model(raw: &str) -> Result<CardiologyModelVersion, String> {
    CardiologyModelVersion::from_str(raw).map_err(|err| err.to_string())
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let mut engine = config.engine;
    if let Some(model) = args.cardiology_model {
        engine.cardiology_model = model;
    }

    let raw = std::fs::read_to_string(&args.snapshot)?;
    let snapshot: ReportSnapshot =
        serde_json::from_str(&raw).map_err(|err| ScoringError::InvalidInput {
            field: "snapshot",
            reason: err.to_string(),
        })?;

    let report = assemble(&engine, snapshot)?;
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to render report: {err}"),
    }

    Ok(())
}
