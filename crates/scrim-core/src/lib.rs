#![deny(warnings)]
pub mod balance;
pub mod error;
pub mod model;
pub mod search;

pub use balance::{
    BalanceConfig, Balancer, LaneAssignment, LaneFitWeights, LanePartition, SeedOrder,
};
pub use error::{BalanceError, LaneSetProblem};
pub use model::{Division, Lane, LeagueRank, Partition, Player, Team, Tier};

/// Binary name and crate version, shown by `scrim --version`.
pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "scrim"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
