use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scrim_core::BalanceError;
use scrim_core::balance::{
    BalanceConfig, SeedOrder, assign_lanes, optimize_with_lanes_with_config, partition_teams,
    partition_teams_with_config,
};
use scrim_core::model::{Division, Lane, LeagueRank, Player, Tier};

fn random_rank(rng: &mut StdRng) -> LeagueRank {
    let tier = Tier::ORDERED[rng.gen_range(0..Tier::ORDERED.len())];
    if tier.is_apex() {
        LeagueRank::new(tier, None, rng.gen_range(0..1500))
    } else {
        let division = Division::ORDERED[rng.gen_range(0..Division::ORDERED.len())];
        LeagueRank::new(tier, Some(division), rng.gen_range(0..100))
    }
}

fn random_lanes(rng: &mut StdRng) -> Vec<Lane> {
    Lane::ALL
        .iter()
        .copied()
        .filter(|_| rng.gen_bool(0.3))
        .collect()
}

fn random_roster(seed: u64) -> Vec<Player> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..10)
        .map(|i| {
            let rank = random_rank(&mut rng);
            let lanes = random_lanes(&mut rng);
            Player::ranked(format!("player{i}#JP1"), rank).preferring(lanes)
        })
        .collect()
}

/// Smallest gap over every 5/5 split, enumerated by bitmask.
fn brute_force_min_gap(players: &[Player]) -> u64 {
    let total: u64 = players.iter().map(|p| u64::from(p.rank_score)).sum();
    (0u32..1 << 10)
        .filter(|mask| mask.count_ones() == 5)
        .map(|mask| {
            let side: u64 = (0..10)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| u64::from(players[i].rank_score))
                .sum();
            side.abs_diff(total - side)
        })
        .min()
        .expect("252 splits")
}

/// Best lane fit for a team via depth-first search over free lanes.
fn brute_force_lane_fit(team: &[Player]) -> u64 {
    fn fit(player: &Player, lane: Lane) -> u64 {
        if player.preferred_lanes.is_empty() {
            50
        } else if player.preferred_lanes.contains(&lane) {
            100
        } else {
            10
        }
    }

    fn search(team: &[Player], idx: usize, used: &mut [bool; 5]) -> u64 {
        if idx == team.len() {
            return 0;
        }
        let mut best = 0;
        for lane in Lane::ALL {
            if used[lane.index()] {
                continue;
            }
            used[lane.index()] = true;
            best = best.max(fit(&team[idx], lane) + search(team, idx + 1, used));
            used[lane.index()] = false;
        }
        best
    }

    search(team, 0, &mut [false; 5])
}

fn identifiers<'a>(players: impl Iterator<Item = &'a Player>) -> HashSet<&'a str> {
    players.map(|p| p.identifier.as_str()).collect()
}

#[test]
fn partition_is_a_true_split_of_the_roster() {
    for seed in 0..40 {
        let players = random_roster(seed);
        let partition = partition_teams(&players).expect("ten players");

        assert_eq!(partition.team1().len(), 5);
        assert_eq!(partition.team2().len(), 5);

        let first = identifiers(partition.team1().iter());
        let second = identifiers(partition.team2().iter());
        assert!(first.is_disjoint(&second), "seed {seed}: teams overlap");

        let union: HashSet<&str> = first.union(&second).copied().collect();
        assert_eq!(union, identifiers(players.iter()), "seed {seed}");
    }
}

#[test]
fn partition_gap_matches_exhaustive_minimum() {
    for seed in 100..160 {
        let players = random_roster(seed);
        let expected = brute_force_min_gap(&players);
        for order in [SeedOrder::RankDescending, SeedOrder::Input] {
            let config = BalanceConfig {
                seed_order: order,
                ..BalanceConfig::default()
            };
            let partition = partition_teams_with_config(&players, &config).expect("ten players");
            assert_eq!(
                partition.score_difference(),
                expected,
                "seed {seed}, order {order:?}"
            );
            let totals = partition.team1().total_score().abs_diff(partition.team2().total_score());
            assert_eq!(totals, partition.score_difference());
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let players = random_roster(7);
    assert_eq!(partition_teams(&players), partition_teams(&players));

    let config = BalanceConfig::default();
    let first = optimize_with_lanes_with_config(&players, &config).expect("ten players");
    let second = optimize_with_lanes_with_config(&players, &config).expect("ten players");
    assert_eq!(first, second);

    let team = &players[..5];
    assert_eq!(
        assign_lanes(team, &Lane::ALL),
        assign_lanes(team, &Lane::ALL)
    );
}

#[test]
fn nine_or_eleven_players_are_rejected() {
    let mut players = random_roster(3);
    players.pop();
    assert_eq!(
        partition_teams(&players),
        Err(BalanceError::InvalidPlayerCount {
            expected: 10,
            actual: 9
        })
    );

    players.push(Player::with_score("late#1", 1200));
    players.push(Player::with_score("later#2", 1300));
    assert_eq!(
        partition_teams(&players),
        Err(BalanceError::InvalidPlayerCount {
            expected: 10,
            actual: 11
        })
    );
}

#[test]
fn lane_assignment_matches_exhaustive_maximum() {
    for seed in 200..260 {
        let players = random_roster(seed);
        for team in [&players[..5], &players[5..]] {
            let assignment = assign_lanes(team, &Lane::ALL).expect("five players");
            assert_eq!(assignment.score(), brute_force_lane_fit(team), "seed {seed}");

            let seated = identifiers(assignment.slots().iter().map(|slot| &slot.player));
            assert_eq!(seated, identifiers(team.iter()));
            let lanes: HashSet<Lane> = assignment.slots().iter().map(|slot| slot.lane).collect();
            assert_eq!(lanes.len(), 5);
        }
    }
}

#[test]
fn unique_claim_on_a_lane_is_always_honoured() {
    for (k, lane) in Lane::ALL.iter().copied().enumerate() {
        let team: Vec<Player> = (0..5)
            .map(|i| {
                let player = Player::with_score(format!("p{i}"), 1000);
                if i == k {
                    player.preferring([lane])
                } else {
                    player
                }
            })
            .collect();
        let assignment = assign_lanes(&team, &Lane::ALL).expect("five players");
        assert_eq!(assignment.lane_of(&format!("p{k}")), Some(lane));
    }
}

#[test]
fn lane_aware_objective_dominates_every_split() {
    let players = random_roster(42);
    let config = BalanceConfig {
        seed_order: SeedOrder::Input,
        ..BalanceConfig::default()
    };
    let best = optimize_with_lanes_with_config(&players, &config).expect("ten players");

    let total: u64 = players.iter().map(|p| u64::from(p.rank_score)).sum();
    for mask in (0u32..1 << 10).filter(|mask| mask.count_ones() == 5) {
        let in_first = |i: &usize| mask & (1 << i) != 0;
        let first: Vec<Player> = (0..10)
            .filter(in_first)
            .map(|i| players[i].clone())
            .collect();
        let second: Vec<Player> = (0..10)
            .filter(|i| !in_first(i))
            .map(|i| players[i].clone())
            .collect();
        let side: u64 = first.iter().map(|p| u64::from(p.rank_score)).sum();
        let gap = side.abs_diff(total - side) as i64;
        let lanes1 = assign_lanes(&first, &Lane::ALL).expect("five").score();
        let lanes2 = assign_lanes(&second, &Lane::ALL).expect("five").score();
        let objective = 1000 - gap + (lanes1 + lanes2) as i64;
        assert!(best.objective() >= objective, "mask {mask:#b}");
    }
}

#[test]
fn identical_scores_split_evenly() {
    let players: Vec<Player> = (0..10)
        .map(|i| {
            Player::ranked(
                format!("twin{i}"),
                LeagueRank::new(Tier::Gold, Some(Division::Two), 20),
            )
        })
        .collect();
    let partition = partition_teams(&players).expect("ten players");
    assert_eq!(partition.score_difference(), 0);
    assert_eq!(partition.team1().average_score(), 1420.0);
    assert_eq!(partition.average_difference(), 0.0);
}
