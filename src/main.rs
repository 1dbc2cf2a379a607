use std::{io::Read, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use divetrip::{
    CheckOutcome, DiveTripConfig, MissingCostPolicy, Schema, ValidationPipeline,
    ValidationReport, logging,
};

#[derive(Parser, Debug)]
#[command(
    name = "divetrip",
    version,
    about = "Validate agent-planned scuba dive trip packages"
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check an agent answer; exits 1 when any check fails.
    Validate(ValidateArgs),
    /// Print the built-in output schema description.
    Schema,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Answer file, optionally fenced as ```json. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Schema description to validate against instead of the built-in one.
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Treat packages without total_package_cost as ordering violations.
    #[arg(long)]
    strict_cost: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let mut config = DiveTripConfig::load_from_path(cli.config.clone())?;
    logging::init_logging(&config.logging, cli.verbose)?;

    match cli.cmd {
        Command::Schema => {
            println!("{}", Schema::reference_description().trim_end());
            Ok(true)
        }
        Command::Validate(args) => {
            if let Some(schema) = &args.schema {
                config.validation.schema_path = Some(schema.to_string_lossy().into_owned());
            }
            if args.strict_cost {
                config.validation.missing_cost = MissingCostPolicy::Require;
            }
            let pipeline = ValidationPipeline::from_config(&config.validation)
                .context("Failed to set up validation")?;

            let answer = read_input(args.input.as_ref())?;
            let report = pipeline.validate_str(&answer);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(report.passed())
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read answer from stdin")?;
            Ok(buf)
        }
    }
}

fn print_report(report: &ValidationReport) {
    for (kind, outcome) in report.outcomes() {
        match outcome {
            CheckOutcome::Passed => println!("{:<18} PASS", kind.label()),
            CheckOutcome::Failed { violations } => {
                println!("{:<18} FAIL", kind.label());
                for violation in violations {
                    println!("  - {violation}");
                }
            }
            CheckOutcome::Unparseable { error } => {
                println!("{:<18} UNPARSEABLE", kind.label());
                println!("  - {error}");
            }
        }
    }
    println!("overall: {}", if report.passed() { "PASS" } else { "FAIL" });
}
