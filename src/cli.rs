use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "confgate",
    version,
    about = "Project confidence scoring and release gate evaluation CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a project tree, compute its confidence score, and evaluate gates
    Score(ScoreCommand),
    /// Compute a score from a pre-collected metrics document
    Calculate(CalculateCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
    /// Formula constants document (overrides confgate.toml formula_file)
    #[arg(long)]
    pub formula_config: Option<PathBuf>,
    /// Append the result to the history log
    #[arg(long)]
    pub update: bool,
    /// Skip EMA smoothing against the previously persisted score
    #[arg(long)]
    pub no_smoothing: bool,
}

#[derive(Args)]
pub struct CalculateCommand {
    /// Metrics JSON document; stdin when omitted
    pub input: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    #[arg(long)]
    pub formula_config: Option<PathBuf>,
    /// Previous score for EMA smoothing (overrides the document's value)
    #[arg(long)]
    pub previous_score: Option<f64>,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Md,
    Json,
}
