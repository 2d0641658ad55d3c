use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use scrim_core::balance::{LaneAssignment, LanePartition};
use scrim_core::model::{Lane, Partition, Team};
use serde::Serialize;
use thiserror::Error;

use crate::config::{BalanceMode, ResolvedOutputs};
use crate::roster::Roster;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{context} {path:?}: {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode report JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub run_id: String,
    pub mode: BalanceMode,
    pub team1: TeamReport,
    pub team2: TeamReport,
    pub score_difference: u64,
    pub average_difference: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub players: Vec<PlayerReport>,
    pub average_score: f64,
    pub total_score: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lane_score: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerReport {
    pub id: String,
    pub rank_score: u32,
    pub rank_info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lane: Option<Lane>,
}

impl BalanceReport {
    pub fn from_partition(run_id: &str, partition: &Partition, roster: &Roster) -> Self {
        Self {
            run_id: run_id.to_string(),
            mode: BalanceMode::Teams,
            team1: TeamReport::new(partition.team1(), None, roster),
            team2: TeamReport::new(partition.team2(), None, roster),
            score_difference: partition.score_difference(),
            average_difference: partition.average_difference(),
            objective: None,
        }
    }

    pub fn from_lane_partition(run_id: &str, result: &LanePartition, roster: &Roster) -> Self {
        let partition = result.partition();
        Self {
            run_id: run_id.to_string(),
            mode: BalanceMode::Lanes,
            team1: TeamReport::new(partition.team1(), Some(result.team1_lanes()), roster),
            team2: TeamReport::new(partition.team2(), Some(result.team2_lanes()), roster),
            score_difference: partition.score_difference(),
            average_difference: partition.average_difference(),
            objective: Some(result.objective()),
        }
    }

    pub fn teams(&self) -> [&TeamReport; 2] {
        [&self.team1, &self.team2]
    }
}

impl TeamReport {
    fn new(team: &Team, lanes: Option<&LaneAssignment>, roster: &Roster) -> Self {
        let mut players: Vec<PlayerReport> = team
            .iter()
            .map(|player| PlayerReport {
                id: player.identifier.clone(),
                rank_score: player.rank_score,
                rank_info: roster.label(&player.identifier).to_string(),
                lane: lanes.and_then(|l| l.lane_of(&player.identifier)),
            })
            .collect();
        if lanes.is_some() {
            players.sort_by_key(|p| p.lane.map(Lane::index));
        }

        Self {
            players,
            average_score: team.average_score(),
            total_score: team.total_score(),
            lane_score: lanes.map(LaneAssignment::score),
        }
    }
}

/// Paths written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub json_path: PathBuf,
    pub summary_path: PathBuf,
}

pub fn write_report(
    report: &BalanceReport,
    outputs: &ResolvedOutputs,
) -> Result<ReportArtifacts, ReportError> {
    let json = serde_json::to_string_pretty(report)?;
    write_file(&outputs.json, json.as_bytes())?;
    write_file(&outputs.summary_md, render_markdown(report).as_bytes())?;
    Ok(ReportArtifacts {
        json_path: outputs.json.clone(),
        summary_path: outputs.summary_md.clone(),
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            context: "creating output directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| ReportError::Io {
        context: "writing",
        path: path.to_path_buf(),
        source,
    })
}

pub fn render_markdown(report: &BalanceReport) -> String {
    let lanes = report.mode == BalanceMode::Lanes;
    let mut out = String::new();
    let _ = writeln!(out, "# Team balance: {}", report.run_id);
    let _ = writeln!(out);

    for (idx, team) in report.teams().into_iter().enumerate() {
        let _ = writeln!(out, "## Team {}", idx + 1);
        let _ = writeln!(out);
        if lanes {
            let _ = writeln!(out, "| Lane | Player | Rank | Score |");
            let _ = writeln!(out, "|------|--------|------|------:|");
        } else {
            let _ = writeln!(out, "| Player | Rank | Score |");
            let _ = writeln!(out, "|--------|------|------:|");
        }
        for player in &team.players {
            if lanes {
                let lane = player.lane.map(Lane::as_str).unwrap_or("-");
                let _ = writeln!(
                    out,
                    "| {lane} | {} | {} | {} |",
                    player.id, player.rank_info, player.rank_score
                );
            } else {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} |",
                    player.id, player.rank_info, player.rank_score
                );
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Average score: {:.2} (total {})",
            team.average_score, team.total_score
        );
        if let Some(lane_score) = team.lane_score {
            let _ = writeln!(out, "Lane fit: {lane_score}");
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Score difference: {}", report.score_difference);
    let _ = writeln!(
        out,
        "Average difference: {:.2}",
        report.average_difference
    );
    if let Some(objective) = report.objective {
        let _ = writeln!(out, "Objective: {objective}");
    }
    out
}
