use tracing::{Level, event};

use super::config::{BalanceConfig, SeedOrder};
use crate::error::BalanceError;
use crate::model::player::Player;
use crate::model::team::{Partition, ROSTER_SIZE, TEAM_SIZE, Team};
use crate::search::{Combinations, complement};

/// Roster laid out in enumeration order.
pub(crate) type SeededRoster<'a> = [&'a Player; ROSTER_SIZE];

pub(crate) type Side = [usize; TEAM_SIZE];

/// Number of distinct 5/5 subsets visited per search.
pub const SPLIT_CANDIDATES: usize = 252;

pub fn partition_teams(players: &[Player]) -> Result<Partition, BalanceError> {
    partition_teams_with_config(players, &BalanceConfig::default())
}

/// Picks the 5/5 split with the smallest total-score gap. Among equal gaps the
/// first split in lexicographic subset order wins.
pub fn partition_teams_with_config(
    players: &[Player],
    config: &BalanceConfig,
) -> Result<Partition, BalanceError> {
    let roster = seed_roster(players, config.seed_order)?;
    let scores: [u64; ROSTER_SIZE] = core::array::from_fn(|i| u64::from(roster[i].rank_score));
    let total: u64 = scores.iter().sum();

    let mut best: Option<(Side, u64)> = None;
    for subset in Combinations::<TEAM_SIZE>::new(ROSTER_SIZE) {
        let side: u64 = subset.iter().map(|&i| scores[i]).sum();
        let diff = side.abs_diff(total - side);
        if best.is_none_or(|(_, best_diff)| diff < best_diff) {
            best = Some((subset, diff));
        }
    }

    let (subset, _) = best.ok_or(BalanceError::player_count(ROSTER_SIZE, players.len()))?;
    let partition = split(&roster, &subset);
    log_partition(&partition, config.seed_order);
    Ok(partition)
}

pub(crate) fn seed_roster(
    players: &[Player],
    order: SeedOrder,
) -> Result<SeededRoster<'_>, BalanceError> {
    let mut roster: Vec<&Player> = players.iter().collect();
    if let SeedOrder::RankDescending = order {
        roster.sort_by(|a, b| b.rank_score.cmp(&a.rank_score));
    }
    roster
        .try_into()
        .map_err(|_| BalanceError::player_count(ROSTER_SIZE, players.len()))
}

pub(crate) fn sides(subset: &Side) -> (Side, Side) {
    (*subset, complement(subset, ROSTER_SIZE))
}

pub(crate) fn split(roster: &SeededRoster<'_>, subset: &Side) -> Partition {
    let (first, second) = sides(subset);
    let team = |side: Side| Team::from_members(side.iter().map(|&i| roster[i].clone()).collect());
    Partition::new(team(first), team(second))
}

fn log_partition(partition: &Partition, order: SeedOrder) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let team1: Vec<&str> = partition
        .team1()
        .iter()
        .map(|p| p.identifier.as_str())
        .collect();
    let team2: Vec<&str> = partition
        .team2()
        .iter()
        .map(|p| p.identifier.as_str())
        .collect();

    event!(
        target: "scrim_core::partition",
        Level::INFO,
        seed_order = ?order,
        candidates = SPLIT_CANDIDATES,
        score_difference = partition.score_difference(),
        team1_total = partition.team1().total_score(),
        team2_total = partition.team2().total_score(),
        team1 = ?team1,
        team2 = ?team2,
    );
}
