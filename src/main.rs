mod analyze;
mod cli;
mod config;
mod error;
mod generator;
mod oracle;
mod report;
mod scan;
mod types;

use crate::error::ScorecardError;
use crate::oracle::{BpeTokenizer, PythonOracle};
use crate::types::config::{Profile, ScorecardConfig, Verbosity};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = EnvFilter::try_from_default_env() {
        env
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            _ => EnvFilter::new("debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Directory holding the project configuration for `path`.
fn project_root(path: &Path) -> PathBuf {
    if path.is_file() {
        return path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
    }
    path.to_path_buf()
}

/// Resolves the agent profile with configured threshold overrides folded in.
fn load_profile(path: &Path, agent: &str) -> Result<(Profile, ScorecardConfig), ScorecardError> {
    if !path.exists() {
        return Err(ScorecardError::PathNotFound(path.display().to_string()));
    }
    let profile = Profile::named(agent)?;
    let loaded = config::load_config(&project_root(path))?;
    Ok((profile.resolve(&loaded.thresholds)?, loaded))
}

fn resolve_verbosity(
    quiet: bool,
    flag: Option<cli::VerbosityArg>,
    configured: Verbosity,
) -> Verbosity {
    if quiet {
        return Verbosity::Quiet;
    }
    match flag {
        Some(cli::VerbosityArg::Quiet) => Verbosity::Quiet,
        Some(cli::VerbosityArg::Summary) => Verbosity::Summary,
        Some(cli::VerbosityArg::Detailed) => Verbosity::Detailed,
        None => configured,
    }
}

fn run() -> Result<i32, ScorecardError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let (profile, loaded) = load_profile(&cmd.path, &cmd.agent)?;
            let verbosity = resolve_verbosity(cli.quiet, cmd.verbosity, loaded.verbosity);

            if cmd.format.is_none() && verbosity != Verbosity::Quiet {
                println!(
                    "Running Agent Scorecard on {} (profile: {})\n",
                    cmd.path.display(),
                    profile.name
                );
            }

            let result = analyze::perform_analysis(
                &cmd.path,
                &profile,
                &PythonOracle::new(),
                &BpeTokenizer::cl100k(),
            )?;

            match cmd.format {
                Some(format) => {
                    let output_format = match format {
                        cli::ReportFormat::Json => report::OutputFormat::Json,
                        cli::ReportFormat::Md => report::OutputFormat::Md,
                        cli::ReportFormat::Sarif => report::OutputFormat::Sarif,
                    };
                    println!("{}", report::render(&result, &profile, output_format)?);
                }
                None => print!("{}", report::terminal::score_summary(&result, verbosity)),
            }

            let root = project_root(&cmd.path);
            if cmd.badge {
                let path = report::badge::write_badge(&root, result.final_score)?;
                eprintln!("Badge saved to {}", path.display());
            }

            if cmd.export_plan {
                let recs = report::remediation::recommendations(&result, &profile.thresholds);
                let markdown = report::remediation::recommendations_markdown(&recs);
                let plan = generator::manifest::RemediationPlan::new(
                    &result.profile,
                    result.final_score,
                    recs,
                );
                let path = generator::manifest::write_plan(&root, &plan)?;
                eprintln!("Plan saved to {}", path.display());
                let recommendations_path = root.join(report::remediation::RECOMMENDATIONS_FILE);
                fs::write(&recommendations_path, markdown)?;
                eprintln!("Recommendations saved to {}", recommendations_path.display());
            }

            if result.passed && result.missing_docs.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::FAILURE)
            }
        }
        cli::Commands::Advise(cmd) => {
            let (profile, _) = load_profile(&cmd.path, &cmd.agent)?;
            let result = analyze::perform_analysis(
                &cmd.path,
                &profile,
                &PythonOracle::new(),
                &BpeTokenizer::cl100k(),
            )?;
            let rendered = report::advisor::advisor_report(&result, &profile.thresholds);

            match cmd.output {
                Some(output) => {
                    fs::write(&output, rendered)?;
                    println!("Advisor report saved to {}", output.display());
                }
                None => println!("{rendered}"),
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Fix(cmd) => {
            let (profile, _) = load_profile(&cmd.path, &cmd.agent)?;
            generator::writer::execute_fix(&cmd, &profile)?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::CheckPrompts(cmd) => {
            if !cmd.path.is_file() {
                return Err(ScorecardError::PathNotFound(cmd.path.display().to_string()));
            }
            if cmd.plain {
                colored::control::set_override(false);
            }
            let text = fs::read_to_string(&cmd.path)?;
            let analysis = analyze::prompts::PromptAnalyzer::new()?.analyze(&text);
            print!(
                "{}",
                report::terminal::prompt_report(
                    &cmd.path.display().to_string(),
                    &analysis,
                    cmd.plain
                )
            );
            if analysis.passed() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::FAILURE)
            }
        }
    }
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
