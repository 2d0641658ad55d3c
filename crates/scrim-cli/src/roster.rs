//! Turns configured roster lines into scored players.

use std::collections::BTreeMap;

use scrim_core::model::{
    Division, LeagueRank, Player, Tier, UNRANKED_LABEL, format_rank_raw, rank_score_raw,
};

use crate::config::PlayerEntry;

#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    players: Vec<Player>,
    labels: BTreeMap<String, String>,
}

impl Roster {
    pub fn from_entries(entries: &[PlayerEntry]) -> Self {
        let mut players = Vec::with_capacity(entries.len());
        let mut labels = BTreeMap::new();
        for entry in entries {
            let (player, label) = score_entry(entry);
            labels.insert(player.identifier.clone(), label);
            players.push(player);
        }
        Self { players, labels }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn label(&self, identifier: &str) -> &str {
        self.labels
            .get(identifier)
            .map(String::as_str)
            .unwrap_or(UNRANKED_LABEL)
    }
}

fn score_entry(entry: &PlayerEntry) -> (Player, String) {
    let division = entry.division.as_deref().unwrap_or("");
    let lp = entry.lp.unwrap_or(0);

    let player = match (entry.rank_score, entry.tier.as_deref()) {
        (Some(score), _) => Player::with_score(&entry.id, score),
        (None, Some(tier)) => match Tier::from_str(tier) {
            Some(tier) => Player::ranked(
                &entry.id,
                LeagueRank::new(tier, Division::from_str(division), lp),
            ),
            // Unrecognised tiers still score their division and points.
            None => Player::with_score(&entry.id, rank_score_raw(tier, division, lp)),
        },
        (None, None) => Player::unranked(&entry.id),
    }
    .preferring(entry.parsed_lanes());

    let label = match (&player.rank, entry.tier.as_deref()) {
        (Some(_), _) => player.rank_label(),
        (None, Some(tier)) => format_rank_raw(tier, division, lp),
        (None, None) if entry.rank_score.is_some() => format!("{} pts", player.rank_score),
        (None, None) => UNRANKED_LABEL.to_string(),
    };

    (player, label)
}
