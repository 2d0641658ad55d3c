use serde::Serialize;

use super::player::Player;

pub const TEAM_SIZE: usize = 5;
pub const ROSTER_SIZE: usize = TEAM_SIZE * 2;

/// One side of a split. Only the balancer builds teams, so a `Team` always
/// holds players taken from a single roster without repetition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    members: Vec<Player>,
}

impl Team {
    pub(crate) fn from_members(members: Vec<Player>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.members.iter()
    }

    pub fn total_score(&self) -> u64 {
        self.members.iter().map(|p| u64::from(p.rank_score)).sum()
    }

    /// Mean rank score rounded to two decimals; zero for an empty team.
    pub fn average_score(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        round2(self.total_score() as f64 / self.members.len() as f64)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.members.iter().any(|p| p.identifier == identifier)
    }
}

/// Two complementary teams and the gap between their total scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    team1: Team,
    team2: Team,
    score_difference: u64,
}

impl Partition {
    pub(crate) fn new(team1: Team, team2: Team) -> Self {
        let score_difference = team1.total_score().abs_diff(team2.total_score());
        Self {
            team1,
            team2,
            score_difference,
        }
    }

    pub fn team1(&self) -> &Team {
        &self.team1
    }

    pub fn team2(&self) -> &Team {
        &self.team2
    }

    pub fn teams(&self) -> [&Team; 2] {
        [&self.team1, &self.team2]
    }

    pub fn score_difference(&self) -> u64 {
        self.score_difference
    }

    /// Gap between the two rounded averages, as shown to players.
    pub fn average_difference(&self) -> f64 {
        round2((self.team1.average_score() - self.team2.average_score()).abs())
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
