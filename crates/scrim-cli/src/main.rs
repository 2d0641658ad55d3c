use std::path::PathBuf;

use clap::Parser;

use scrim_cli::config::{BalanceMode, ResolvedOutputs, ScrimConfig};
use scrim_cli::logging::init_logging;
use scrim_cli::runner::run;
use scrim_core::AppInfo;

/// Splits ten players into two balanced teams.
#[derive(Debug, Parser)]
#[command(
    name = AppInfo::name(),
    version = AppInfo::version(),
    author,
    about = "Balanced 5v5 team and lane assignment"
)]
struct Cli {
    /// Path to the YAML roster file.
    #[arg(short, long, value_name = "FILE", default_value = "scrim.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the balancing mode.
    #[arg(long, value_enum)]
    mode: Option<BalanceMode>,

    /// Exit after validating the configuration (nothing is balanced).
    #[arg(long)]
    validate_only: bool,

    /// Also print the JSON report to stdout.
    #[arg(long)]
    stdout: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ScrimConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(mode) = cli.mode {
        config.mode = mode;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let player_count = config.players.len();
    let run_id = config.run_id.clone();

    println!(
        "Loaded roster '{run_id}' with {player_count} player{} (mode: {})",
        if player_count == 1 { "" } else { "s" },
        config.mode.as_str()
    );

    if cli.validate_only {
        println!("Validation-only mode: balancing skipped.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let summary = run(&config, &outputs)?;

    let report = &summary.report;
    println!(
        "Balanced '{run_id}': team 1 avg {:.2}, team 2 avg {:.2}, score difference {}",
        report.team1.average_score, report.team2.average_score, report.score_difference
    );
    if let (Some(lanes1), Some(lanes2)) = (report.team1.lane_score, report.team2.lane_score) {
        println!(
            "  Lane fit: {lanes1} / {lanes2} (objective {})",
            report.objective.unwrap_or_default()
        );
    }
    println!("Report: {}", summary.artifacts.json_path.display());
    println!("Summary table: {}", summary.artifacts.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Decision log: {}", guard.decisions_path.display());
    }

    if cli.stdout {
        println!("{}", serde_json::to_string_pretty(report)?);
    }

    Ok(())
}
