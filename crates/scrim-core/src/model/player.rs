use serde::{Deserialize, Serialize};

use super::lane::Lane;
use super::rank::LeagueRank;

pub const UNRANKED_LABEL: &str = "Unranked";

/// A participant as handed to the balancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub identifier: String,
    pub rank_score: u32,
    #[serde(default)]
    pub rank: Option<LeagueRank>,
    #[serde(default)]
    pub preferred_lanes: Vec<Lane>,
}

impl Player {
    /// Player whose score is derived from their ladder standing.
    pub fn ranked(identifier: impl Into<String>, rank: LeagueRank) -> Self {
        Self {
            identifier: identifier.into(),
            rank_score: rank.score(),
            rank: Some(rank),
            preferred_lanes: Vec::new(),
        }
    }

    /// Player carrying a precomputed score and no ladder standing.
    pub fn with_score(identifier: impl Into<String>, rank_score: u32) -> Self {
        Self {
            identifier: identifier.into(),
            rank_score,
            rank: None,
            preferred_lanes: Vec::new(),
        }
    }

    pub fn unranked(identifier: impl Into<String>) -> Self {
        Self::with_score(identifier, 0)
    }

    pub fn preferring(mut self, lanes: impl IntoIterator<Item = Lane>) -> Self {
        self.preferred_lanes = lanes.into_iter().collect();
        self
    }

    pub fn has_preference(&self) -> bool {
        !self.preferred_lanes.is_empty()
    }

    pub fn prefers(&self, lane: Lane) -> bool {
        self.preferred_lanes.contains(&lane)
    }

    pub fn rank_label(&self) -> String {
        match self.rank {
            Some(rank) => rank.to_string(),
            None => UNRANKED_LABEL.to_string(),
        }
    }
}
