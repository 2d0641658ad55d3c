use serde::Serialize;
use tracing::{Level, event};

use super::config::BalanceConfig;
use super::lanes::{LaneAssignment, LaneOrdering, best_ordering, build_assignment};
use super::partition::{SPLIT_CANDIDATES, Side, seed_roster, sides, split};
use crate::error::BalanceError;
use crate::model::lane::Lane;
use crate::model::player::Player;
use crate::model::team::{Partition, ROSTER_SIZE, TEAM_SIZE};
use crate::search::Combinations;

/// Split plus a lane assignment for each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanePartition {
    partition: Partition,
    team1_lanes: LaneAssignment,
    team2_lanes: LaneAssignment,
    objective: i64,
}

impl LanePartition {
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn team1_lanes(&self) -> &LaneAssignment {
        &self.team1_lanes
    }

    pub fn team2_lanes(&self) -> &LaneAssignment {
        &self.team2_lanes
    }

    pub fn lanes(&self) -> [&LaneAssignment; 2] {
        [&self.team1_lanes, &self.team2_lanes]
    }

    /// Both lane scores plus the rank-balance term.
    pub fn objective(&self) -> i64 {
        self.objective
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    subset: Side,
    first: LaneOrdering,
    second: LaneOrdering,
    objective: i64,
}

pub fn optimize_with_lanes(players: &[Player]) -> Result<LanePartition, BalanceError> {
    optimize_with_lanes_with_config(players, &BalanceConfig::default())
}

/// Scores every 5/5 split by the sum of both sides' best lane fits and the
/// rank-balance term, keeping the first split with the highest total.
pub fn optimize_with_lanes_with_config(
    players: &[Player],
    config: &BalanceConfig,
) -> Result<LanePartition, BalanceError> {
    let roster = seed_roster(players, config.seed_order)?;
    let lanes = Lane::ALL;
    let weights = &config.lane_weights;

    let mut best: Option<Candidate> = None;
    for subset in Combinations::<TEAM_SIZE>::new(ROSTER_SIZE) {
        let (first_side, second_side) = sides(&subset);
        let first_members: [&Player; TEAM_SIZE] = first_side.map(|i| roster[i]);
        let second_members: [&Player; TEAM_SIZE] = second_side.map(|i| roster[i]);

        let first_total: u64 = first_members.iter().map(|p| u64::from(p.rank_score)).sum();
        let second_total: u64 = second_members.iter().map(|p| u64::from(p.rank_score)).sum();
        let gap = i64::try_from(first_total.abs_diff(second_total)).unwrap_or(i64::MAX);
        let balance = config.rank_balance_base.saturating_sub(gap);

        let first = best_ordering(&first_members, &lanes, weights);
        let second = best_ordering(&second_members, &lanes, weights);
        let objective = balance
            .saturating_add(lane_term(first.score))
            .saturating_add(lane_term(second.score));

        if best.is_none_or(|b| objective > b.objective) {
            best = Some(Candidate {
                subset,
                first,
                second,
                objective,
            });
        }
    }

    let Some(best) = best else {
        return Err(BalanceError::player_count(ROSTER_SIZE, players.len()));
    };

    let (first_side, second_side) = sides(&best.subset);
    let result = LanePartition {
        partition: split(&roster, &best.subset),
        team1_lanes: build_assignment(&first_side.map(|i| roster[i]), &lanes, &best.first),
        team2_lanes: build_assignment(&second_side.map(|i| roster[i]), &lanes, &best.second),
        objective: best.objective,
    };
    log_lane_partition(&result);
    Ok(result)
}

fn lane_term(score: u64) -> i64 {
    i64::try_from(score).unwrap_or(i64::MAX)
}

fn log_lane_partition(result: &LanePartition) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    event!(
        target: "scrim_core::combined",
        Level::INFO,
        candidates = SPLIT_CANDIDATES,
        objective = result.objective(),
        score_difference = result.partition().score_difference(),
        team1_lane_score = result.team1_lanes().score(),
        team2_lane_score = result.team2_lanes().score(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::config::{LaneFitWeights, SeedOrder};
    use crate::balance::partition::partition_teams_with_config;

    fn open_roster(scores: [u32; 10]) -> Vec<Player> {
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| Player::with_score(format!("p{i}"), *s))
            .collect()
    }

    #[test]
    fn without_preferences_matches_the_plain_partition() {
        let players = open_roster([1420, 2850, 800, 1200, 400, 2400, 1600, 3600, 0, 2000]);
        let config = BalanceConfig::default();
        let lane_aware = optimize_with_lanes_with_config(&players, &config).unwrap();
        let plain = partition_teams_with_config(&players, &config).unwrap();
        assert_eq!(lane_aware.partition(), &plain);
        assert_eq!(lane_aware.team1_lanes().score(), 250);
        assert_eq!(lane_aware.team2_lanes().score(), 250);
        assert_eq!(
            lane_aware.objective(),
            500 + 1000 - plain.score_difference() as i64
        );
    }

    #[test]
    fn competing_mid_players_are_split_up() {
        // Both want mid; sharing a team leaves one of them off-preference.
        let mut players = open_roster([1000; 10]);
        players[0] = Player::with_score("mid_a", 1000).preferring([Lane::Mid]);
        players[1] = Player::with_score("mid_b", 1000).preferring([Lane::Mid]);
        let config = BalanceConfig {
            seed_order: SeedOrder::Input,
            ..BalanceConfig::default()
        };
        let result = optimize_with_lanes_with_config(&players, &config).unwrap();
        let team1 = result.partition().team1();
        assert_ne!(team1.contains("mid_a"), team1.contains("mid_b"));
        assert_eq!(result.team1_lanes().score() + result.team2_lanes().score(), 600);
        assert_eq!(result.objective(), 1600);
    }

    #[test]
    fn tied_objectives_keep_the_first_split_and_ordering() {
        let mut players = open_roster([1000; 10]);
        players[0] = Player::with_score("mid_a", 1000).preferring([Lane::Mid]);
        players[1] = Player::with_score("mid_b", 1000).preferring([Lane::Mid]);
        let config = BalanceConfig {
            seed_order: SeedOrder::Input,
            ..BalanceConfig::default()
        };
        let result = optimize_with_lanes_with_config(&players, &config).unwrap();

        // [0, 2, 3, 4, 5] is the first subset that separates the mid players.
        let team1: Vec<&str> = result
            .partition()
            .team1()
            .iter()
            .map(|p| p.identifier.as_str())
            .collect();
        assert_eq!(team1, ["mid_a", "p2", "p3", "p4", "p5"]);

        let mapping = |lanes: &LaneAssignment| -> Vec<(Lane, String)> {
            lanes
                .slots()
                .iter()
                .map(|slot| (slot.lane, slot.player.identifier.clone()))
                .collect()
        };
        let expected = |ids: [&str; 5]| -> Vec<(Lane, String)> {
            Lane::ALL
                .iter()
                .zip(ids)
                .map(|(lane, id)| (*lane, id.to_string()))
                .collect()
        };
        // First ordering that seats the mid player on mid is [2, 0, 1, 3, 4].
        assert_eq!(
            mapping(result.team1_lanes()),
            expected(["p2", "p3", "mid_a", "p4", "p5"])
        );
        assert_eq!(
            mapping(result.team2_lanes()),
            expected(["p6", "p7", "mid_b", "p8", "p9"])
        );
    }

    #[test]
    fn open_players_take_lanes_in_seat_order() {
        let players = open_roster([1000; 10]);
        let config = BalanceConfig {
            seed_order: SeedOrder::Input,
            ..BalanceConfig::default()
        };
        let result = optimize_with_lanes_with_config(&players, &config).unwrap();
        assert_eq!(result.objective(), 1500);
        for (lanes, offset) in result.lanes().into_iter().zip([0, 5]) {
            for (i, slot) in lanes.slots().iter().enumerate() {
                assert_eq!(slot.lane, Lane::ALL[i]);
                assert_eq!(slot.player.identifier, format!("p{}", offset + i));
            }
        }
    }

    #[test]
    fn large_lane_weights_do_not_overflow() {
        let config = BalanceConfig {
            lane_weights: LaneFitWeights {
                no_preference: 1_000_000_000,
                ..LaneFitWeights::default()
            },
            ..BalanceConfig::default()
        };
        let result = optimize_with_lanes_with_config(&open_roster([1000; 10]), &config).unwrap();
        assert_eq!(result.team1_lanes().score(), 5_000_000_000);
        assert_eq!(result.objective(), 1000 + 10_000_000_000);
    }

    #[test]
    fn lanes_cover_each_team_exactly() {
        let players = open_roster([5, 4, 3, 2, 1, 5, 4, 3, 2, 1]);
        let result = optimize_with_lanes(&players).unwrap();
        for (team, lanes) in result.partition().teams().iter().zip(result.lanes()) {
            for lane in Lane::ALL {
                let player = lanes.player_for(lane).expect("lane filled");
                assert!(team.contains(&player.identifier));
            }
        }
    }

    #[test]
    fn objective_may_go_negative() {
        let players = open_roster([0, 0, 0, 0, 0, 0, 0, 0, 0, 40_000]);
        let result = optimize_with_lanes(&players).unwrap();
        assert_eq!(result.objective(), 1000 - 40_000 + 500);
    }

    #[test]
    fn rejects_short_rosters() {
        let players: Vec<Player> = open_roster([1; 10]).into_iter().take(8).collect();
        assert_eq!(
            optimize_with_lanes(&players),
            Err(BalanceError::InvalidPlayerCount {
                expected: 10,
                actual: 8
            })
        );
    }
}
