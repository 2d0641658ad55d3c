pub mod lane;
pub mod player;
pub mod rank;
pub mod team;
pub mod tier;

pub use lane::Lane;
pub use player::{Player, UNRANKED_LABEL};
pub use rank::{LeagueRank, format_rank_raw, rank_score, rank_score_raw};
pub use team::{Partition, ROSTER_SIZE, TEAM_SIZE, Team};
pub use tier::{Division, Tier};
