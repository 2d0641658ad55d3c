//! Ranked standing and its reduction to a single comparable score.

use core::fmt;
use serde::{Deserialize, Serialize};

use super::tier::{Division, Tier};

/// Tier, division and league points as reported by the ranked ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeagueRank {
    pub tier: Tier,
    #[serde(default)]
    pub division: Option<Division>,
    #[serde(default)]
    pub league_points: u32,
}

impl LeagueRank {
    pub const fn new(tier: Tier, division: Option<Division>, league_points: u32) -> Self {
        Self {
            tier,
            division,
            league_points,
        }
    }

    pub const fn score(&self) -> u32 {
        rank_score(self.tier, self.division, self.league_points)
    }
}

impl fmt::Display for LeagueRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.division {
            Some(division) if !self.tier.is_apex() => {
                write!(f, "{} {} {} LP", self.tier, division, self.league_points)
            }
            _ => write!(f, "{} {} LP", self.tier, self.league_points),
        }
    }
}

/// Collapses a ranked standing into one integer: tier floor, plus the
/// division step below Master, plus league points.
pub const fn rank_score(tier: Tier, division: Option<Division>, league_points: u32) -> u32 {
    let division_bonus = match division {
        Some(division) if !tier.is_apex() => division.bonus(),
        _ => 0,
    };
    tier.base_score()
        .saturating_add(division_bonus)
        .saturating_add(league_points)
}

/// Scores raw ladder strings. Unrecognised tier or division names contribute
/// nothing instead of failing.
pub fn rank_score_raw(tier: &str, division: &str, league_points: u32) -> u32 {
    match Tier::from_str(tier) {
        Some(tier) => rank_score(tier, Division::from_str(division), league_points),
        None => Division::from_str(division)
            .map(Division::bonus)
            .unwrap_or(0)
            .saturating_add(league_points),
    }
}

/// Renders raw ladder strings as `"{TIER} {DIVISION} {LP} LP"`, dropping the
/// division for apex tiers and when none was reported.
pub fn format_rank_raw(tier: &str, division: &str, league_points: u32) -> String {
    let tier = tier.trim();
    let division = division.trim();
    let apex = Tier::from_str(tier).is_some_and(Tier::is_apex);
    if apex || division.is_empty() {
        format!("{tier} {league_points} LP")
    } else {
        format!("{tier} {division} {league_points} LP")
    }
}
