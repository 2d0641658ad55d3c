use scrim_core::BalanceError;
use scrim_core::balance::Balancer;
use thiserror::Error;
use tracing::info;

use crate::config::{BalanceMode, ResolvedOutputs, ScrimConfig};
use crate::report::{BalanceReport, ReportArtifacts, ReportError, write_report};
use crate::roster::Roster;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("balancing failed: {0}")]
    Balance(#[from] BalanceError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: BalanceReport,
    pub artifacts: ReportArtifacts,
}

/// Scores the configured roster, balances it and writes the report files.
pub fn run(config: &ScrimConfig, outputs: &ResolvedOutputs) -> Result<RunSummary, RunError> {
    let report = balance(config)?;
    let artifacts = write_report(&report, outputs)?;
    info!(
        target: "scrim_cli::run",
        run_id = %config.run_id,
        mode = config.mode.as_str(),
        json = %artifacts.json_path.display(),
        "report written"
    );
    Ok(RunSummary { report, artifacts })
}

/// Runs the balancer for the configured mode without touching the disk.
pub fn balance(config: &ScrimConfig) -> Result<BalanceReport, BalanceError> {
    let roster = Roster::from_entries(&config.players);
    let balancer = Balancer::new(config.balance);
    let report = match config.mode {
        BalanceMode::Teams => {
            let partition = balancer.balance_teams(roster.players())?;
            BalanceReport::from_partition(&config.run_id, &partition, &roster)
        }
        BalanceMode::Lanes => {
            let result = balancer.balance_with_lanes(roster.players())?;
            BalanceReport::from_lane_partition(&config.run_id, &result, &roster)
        }
    };
    Ok(report)
}
