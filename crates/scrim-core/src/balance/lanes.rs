use serde::Serialize;
use tracing::{Level, event};

use super::config::LaneFitWeights;
use crate::error::{BalanceError, LaneSetProblem};
use crate::model::lane::Lane;
use crate::model::player::Player;
use crate::model::team::TEAM_SIZE;
use crate::search::Permutations;

pub type LaneSet = [Lane; TEAM_SIZE];

/// Number of lane orderings visited per team.
pub const LANE_CANDIDATES: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneSlot {
    pub lane: Lane,
    pub player: Player,
}

/// A one-to-one mapping of lanes to the members of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneAssignment {
    slots: Vec<LaneSlot>,
    score: u64,
}

impl LaneAssignment {
    /// Slots in the order the lane set was given.
    pub fn slots(&self) -> &[LaneSlot] {
        &self.slots
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn player_for(&self, lane: Lane) -> Option<&Player> {
        self.slots
            .iter()
            .find(|slot| slot.lane == lane)
            .map(|slot| &slot.player)
    }

    pub fn lane_of(&self, identifier: &str) -> Option<Lane> {
        self.slots
            .iter()
            .find(|slot| slot.player.identifier == identifier)
            .map(|slot| slot.lane)
    }
}

pub fn assign_lanes(team: &[Player], lanes: &[Lane]) -> Result<LaneAssignment, BalanceError> {
    assign_lanes_with_weights(team, lanes, &LaneFitWeights::default())
}

/// Tries every ordering of `lanes` against `team` (player i takes lane i) and
/// keeps the first ordering with the highest fit.
pub fn assign_lanes_with_weights(
    team: &[Player],
    lanes: &[Lane],
    weights: &LaneFitWeights,
) -> Result<LaneAssignment, BalanceError> {
    let lanes = validate_lane_set(lanes)?;
    let members: [&Player; TEAM_SIZE] = team
        .iter()
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|_| BalanceError::player_count(TEAM_SIZE, team.len()))?;

    let best = best_ordering(&members, &lanes, weights);
    let assignment = build_assignment(&members, &lanes, &best);
    log_assignment(&assignment);
    Ok(assignment)
}

/// Parses lane names into a validated lane set.
pub fn parse_lane_set<S: AsRef<str>>(names: &[S]) -> Result<LaneSet, BalanceError> {
    let lanes = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            Lane::from_str(name).ok_or_else(|| LaneSetProblem::Unknown(name.to_string()))
        })
        .collect::<Result<Vec<Lane>, LaneSetProblem>>()?;
    validate_lane_set(&lanes)
}

pub(crate) fn validate_lane_set(lanes: &[Lane]) -> Result<LaneSet, BalanceError> {
    let set: LaneSet = lanes.try_into().map_err(|_| LaneSetProblem::WrongSize {
        expected: TEAM_SIZE,
        actual: lanes.len(),
    })?;
    for (i, lane) in set.iter().enumerate() {
        if set[..i].contains(lane) {
            return Err(LaneSetProblem::Duplicate(*lane).into());
        }
    }
    Ok(set)
}

/// Best lane ordering for one team: `(ordering, score)` where player `i`
/// plays `lanes[ordering[i]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LaneOrdering {
    pub order: [usize; TEAM_SIZE],
    pub score: u64,
}

pub(crate) fn best_ordering(
    members: &[&Player; TEAM_SIZE],
    lanes: &LaneSet,
    weights: &LaneFitWeights,
) -> LaneOrdering {
    // fit[player][lane position], in u64 so five u32 weights cannot overflow
    let fit: [[u64; TEAM_SIZE]; TEAM_SIZE] = core::array::from_fn(|p| {
        core::array::from_fn(|l| u64::from(weights.fit(members[p], lanes[l])))
    });

    let mut best: Option<LaneOrdering> = None;
    for order in Permutations::<TEAM_SIZE>::new() {
        let score: u64 = order
            .iter()
            .enumerate()
            .map(|(player, &lane)| fit[player][lane])
            .sum();
        if best.is_none_or(|b| score > b.score) {
            best = Some(LaneOrdering { order, score });
        }
    }

    best.unwrap_or(LaneOrdering {
        order: core::array::from_fn(|i| i),
        score: 0,
    })
}

pub(crate) fn build_assignment(
    members: &[&Player; TEAM_SIZE],
    lanes: &LaneSet,
    ordering: &LaneOrdering,
) -> LaneAssignment {
    let mut slots: Vec<(usize, LaneSlot)> = ordering
        .order
        .iter()
        .enumerate()
        .map(|(player, &lane)| {
            (
                lane,
                LaneSlot {
                    lane: lanes[lane],
                    player: members[player].clone(),
                },
            )
        })
        .collect();
    slots.sort_by_key(|(position, _)| *position);

    LaneAssignment {
        slots: slots.into_iter().map(|(_, slot)| slot).collect(),
        score: ordering.score,
    }
}

fn log_assignment(assignment: &LaneAssignment) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let mapping = assignment
        .slots()
        .iter()
        .map(|slot| format!("{}={}", slot.lane, slot.player.identifier))
        .collect::<Vec<_>>()
        .join(",");

    event!(
        target: "scrim_core::lanes",
        Level::INFO,
        candidates = LANE_CANDIDATES,
        score = assignment.score(),
        mapping = %mapping,
    );
}
