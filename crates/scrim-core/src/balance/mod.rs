pub mod combined;
pub mod config;
pub mod lanes;
pub mod partition;

pub use combined::{LanePartition, optimize_with_lanes, optimize_with_lanes_with_config};
pub use config::{BalanceConfig, LaneFitWeights, SeedOrder};
pub use lanes::{
    LANE_CANDIDATES, LaneAssignment, LaneSet, LaneSlot, assign_lanes, assign_lanes_with_weights,
    parse_lane_set,
};
pub use partition::{SPLIT_CANDIDATES, partition_teams, partition_teams_with_config};

use crate::error::BalanceError;
use crate::model::lane::Lane;
use crate::model::player::Player;
use crate::model::team::Partition;

/// Entry point shared by every front end: one configuration, three searches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Balancer {
    config: BalanceConfig,
}

impl Balancer {
    pub const fn new(config: BalanceConfig) -> Self {
        Self { config }
    }

    pub fn balance_teams(&self, players: &[Player]) -> Result<Partition, BalanceError> {
        partition_teams_with_config(players, &self.config)
    }

    pub fn balance_with_lanes(&self, players: &[Player]) -> Result<LanePartition, BalanceError> {
        optimize_with_lanes_with_config(players, &self.config)
    }

    pub fn assign_lanes(
        &self,
        team: &[Player],
        lanes: &[Lane],
    ) -> Result<LaneAssignment, BalanceError> {
        assign_lanes_with_weights(team, lanes, &self.config.lane_weights)
    }
}
