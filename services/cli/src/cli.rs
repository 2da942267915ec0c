use clap::{Args, Parser, Subcommand};
use deed_intake::config::AppConfig;
use deed_intake::error::AppError;
use deed_intake::extract::{build_extractor, parse_extractor_output, SAMPLE_DEED_TEXT};
use deed_intake::intake::{self, ParsedDeed};
use deed_intake::telemetry;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "deed-intake",
    about = "Validate extracted deed records against canonical county reference data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a pre-extracted deed record (JSON file) for consistency
    Check(CheckArgs),
    /// Run the bundled sample deed through the extractor and the full pipeline
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Path to the extractor output (a JSON deed record)
    deed: PathBuf,
    /// Override the configured county reference CSV
    #[arg(long)]
    counties: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// Override the configured county reference CSV
    #[arg(long)]
    counties: Option<PathBuf>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    match cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()))
    {
        Command::Check(args) => {
            let payload = std::fs::read_to_string(&args.deed)?;
            let deed = parse_extractor_output(&payload)?;
            let counties = args
                .counties
                .as_deref()
                .unwrap_or(&config.intake.counties_path);
            decide(deed, counties)
        }
        Command::Demo(args) => {
            let extractor = build_extractor(config.intake.extractor);
            println!("--- raw document ---\n{SAMPLE_DEED_TEXT}\n--------------------");
            let deed = extractor.extract(SAMPLE_DEED_TEXT)?;
            let counties = args
                .counties
                .as_deref()
                .unwrap_or(&config.intake.counties_path);
            decide(deed, counties)
        }
    }
}

/// Load the reference data and hand the deed to the pipeline. A domain
/// rejection is a reported outcome, not a process failure.
fn decide(deed: ParsedDeed, counties_path: &Path) -> Result<(), AppError> {
    let reference = intake::counties_from_path(counties_path)?;
    info!(counties = reference.len(), "reference data loaded");

    match intake::accept_deed(deed, &reference) {
        Ok(enriched) => {
            println!("deed accepted");
            println!("{}", serde_json::to_string_pretty(&enriched)?);
        }
        Err(rejection) => {
            println!("deed rejected");
            println!("reason: {rejection}");
        }
    }

    Ok(())
}
