use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agent-scorecard",
    version,
    about = "Scores how ready a Python codebase is for autonomous AI coding agents"
)]
pub struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress everything except the final score and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a project or single file
    Score(ScoreCommand),
    /// Write a qualitative advisor report
    Advise(AdviseCommand),
    /// Create missing agent documentation from templates
    Fix(FixCommand),
    /// Score a prompt file against prompt-engineering heuristics
    CheckPrompts(CheckPromptsCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Sarif,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum VerbosityArg {
    Quiet,
    Summary,
    Detailed,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ApplyMode {
    Preview,
    Apply,
}

#[derive(Args)]
pub struct ScoreCommand {
    #[arg(default_value = ".")]
    pub path: PathBuf,
    /// Agent profile: generic, jules or copilot
    #[arg(long, default_value = "generic")]
    pub agent: String,
    /// Render a full report instead of the console summary
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    #[arg(long, value_enum)]
    pub verbosity: Option<VerbosityArg>,
    /// Write agent_score.svg next to the analysed project
    #[arg(long)]
    pub badge: bool,
    /// Write a JSON remediation plan under .agent-scorecard/plans
    #[arg(long)]
    pub export_plan: bool,
}

#[derive(Args)]
pub struct AdviseCommand {
    #[arg(default_value = ".")]
    pub path: PathBuf,
    #[arg(long, default_value = "generic")]
    pub agent: String,
    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct FixCommand {
    #[arg(default_value = ".")]
    pub path: PathBuf,
    #[arg(long, default_value = "generic")]
    pub agent: String,
    #[arg(long, value_enum, default_value = "preview")]
    pub apply_mode: ApplyMode,
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct CheckPromptsCommand {
    pub path: PathBuf,
    /// Uncoloured output for CI logs
    #[arg(long)]
    pub plain: bool,
}
