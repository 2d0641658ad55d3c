use serde::{Deserialize, Serialize};

use crate::model::lane::Lane;
use crate::model::player::Player;

/// Per-player contribution to a lane assignment's fit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneFitWeights {
    /// Assigned lane is one the player asked for.
    pub preferred: u32,
    /// Player stated no preference at all.
    pub no_preference: u32,
    /// Player has preferences and the assigned lane is not among them.
    pub off_preference: u32,
}

impl Default for LaneFitWeights {
    fn default() -> Self {
        Self {
            preferred: 100,
            no_preference: 50,
            off_preference: 10,
        }
    }
}

impl LaneFitWeights {
    pub fn fit(&self, player: &Player, lane: Lane) -> u32 {
        if !player.has_preference() {
            self.no_preference
        } else if player.prefers(lane) {
            self.preferred
        } else {
            self.off_preference
        }
    }
}

/// Order in which roster positions are laid out before enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedOrder {
    /// Stable sort by rank score, highest first.
    #[default]
    RankDescending,
    /// Positions exactly as supplied.
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub seed_order: SeedOrder,
    pub lane_weights: LaneFitWeights,
    /// Rank-balance term of the lane-aware objective is this value minus the
    /// total score gap. It may go negative for lopsided rosters.
    pub rank_balance_base: i64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            seed_order: SeedOrder::default(),
            lane_weights: LaneFitWeights::default(),
            rank_balance_base: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_buckets_are_flat() {
        let weights = LaneFitWeights::default();
        let picky = Player::with_score("a", 0).preferring([Lane::Mid, Lane::Adc]);
        let open = Player::with_score("b", 0);
        assert_eq!(weights.fit(&picky, Lane::Adc), 100);
        assert_eq!(weights.fit(&picky, Lane::Mid), 100);
        assert_eq!(weights.fit(&picky, Lane::Top), 10);
        assert_eq!(weights.fit(&open, Lane::Top), 50);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let cfg: BalanceConfig =
            serde_json::from_str(r#"{"seed_order":"input","lane_weights":{"preferred":80}}"#)
                .unwrap();
        assert_eq!(cfg.seed_order, SeedOrder::Input);
        assert_eq!(cfg.lane_weights.preferred, 80);
        assert_eq!(cfg.lane_weights.no_preference, 50);
        assert_eq!(cfg.rank_balance_base, 1_000);
    }
}
