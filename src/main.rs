mod cli;
mod config;
mod engine;
mod error;
mod history;
mod report;
mod scan;
mod types;

use crate::engine::ConfidenceEngine;
use crate::error::ConfGateError;
use crate::types::metrics::MetricsInput;
use crate::types::result::ConfidenceResult;
use clap::Parser;
use std::io::Read;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const ADVISORY: i32 = 1;
    pub const BLOCKED: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, ConfGateError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            if !cmd.path.exists() {
                return Err(ConfGateError::PathNotFound(cmd.path.display().to_string()));
            }

            let project = config::load_project_config(&cmd.path)?;
            if project.is_none() {
                eprintln!(
                    "warning: no {} found in {}; using defaults",
                    config::DEFAULT_PROJECT_CONFIG_FILE,
                    cmd.path.display()
                );
            }

            let formula_path = cmd.formula_config.clone().or_else(|| {
                project
                    .as_ref()
                    .and_then(|project| project.formula_file.as_ref())
                    .map(|file| cmd.path.join(file))
            });
            let engine = ConfidenceEngine::new(config::load_formula_config(
                formula_path.as_deref(),
            ));

            let history_rel = project
                .as_ref()
                .map(|project| project.history_file().to_string())
                .unwrap_or_else(|| ".confgate/history.json".to_string());
            let history_path = cmd.path.join(history_rel);

            let mut input = scan::discover(&cmd.path, project.as_ref());
            if !cmd.no_smoothing {
                input.previous_score = history::previous_score(&history_path);
            }

            let result = engine.calculate(&input)?;
            let rendered = report::render(&result, output_format(&cmd.format))?;
            println!("{rendered}");

            if cmd.update {
                history::append(&history_path, &result)?;
            }

            Ok(gate_exit_code(&result))
        }
        cli::Commands::Calculate(cmd) => {
            let content = match &cmd.input {
                Some(path) => {
                    if !path.exists() {
                        return Err(ConfGateError::PathNotFound(path.display().to_string()));
                    }
                    std::fs::read_to_string(path)?
                }
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            let mut input: MetricsInput = serde_json::from_str(&content)
                .map_err(|e| ConfGateError::MetricsParse(e.to_string()))?;
            if cmd.previous_score.is_some() {
                input.previous_score = cmd.previous_score;
            }

            let engine = ConfidenceEngine::new(config::load_formula_config(
                cmd.formula_config.as_deref(),
            ));
            let result = engine.calculate(&input)?;
            let rendered = report::render(&result, output_format(&cmd.format))?;
            println!("{rendered}");

            Ok(gate_exit_code(&result))
        }
    }
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Text => report::OutputFormat::Text,
        cli::ReportFormat::Md => report::OutputFormat::Md,
        cli::ReportFormat::Json => report::OutputFormat::Json,
    }
}

/// Hard gates block with a distinct exit code; failed advisory gates only
/// warn. Release tooling keys off this.
fn gate_exit_code(result: &ConfidenceResult) -> i32 {
    let gates = &result.release_gates;
    if !gates.can_ship {
        exit_code::BLOCKED
    } else if !gates.score_ok || !gates.staleness_ok {
        exit_code::ADVISORY
    } else {
        exit_code::SUCCESS
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
