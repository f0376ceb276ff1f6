//! Integration tests for group partitioning and bracket construction.

use chrono::NaiveDate;
use std::collections::HashSet;
use tkd_competition_web::{
    build_bracket, num_rounds, partition, round_name, BracketView, Gender, MatchStatus, Player,
    SeedingPolicy, MAX_GROUP_SIZE,
};

fn players(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| {
            Player::with_id(
                format!("p{i}"),
                format!("Player {i}"),
                "Club",
                Gender::Male,
                NaiveDate::from_ymd_opt(2012, 1, 10).unwrap(),
                35.0,
            )
        })
        .collect()
}

#[test]
fn partition_yields_power_of_two_groups_with_every_player() {
    for n in 1..=200 {
        let groups = partition(&players(n));
        let mut real = 0;
        for group in &groups {
            assert!(group.len().is_power_of_two(), "n={n}: group of {}", group.len());
            assert!(group.len() <= MAX_GROUP_SIZE);
            real += group.iter().filter(|p| !p.is_bye()).count();

            let matches = build_bracket(group, 0);
            if group.len() >= 2 {
                assert_eq!(matches.len(), group.len() - 1);
            } else {
                assert!(matches.is_empty());
            }
            for m in matches.iter().filter(|m| m.round == 1) {
                let both_byes = m.player1.as_ref().is_some_and(|p| p.is_bye())
                    && m.player2.as_ref().is_some_and(|p| p.is_bye());
                assert!(!both_byes, "n={n}: match {} is bye against bye", m.id);
            }
        }
        assert_eq!(real, n);
    }
}

#[test]
fn partition_splits_at_sixteen_and_keeps_order() {
    let roster = players(20);
    let groups = partition(&roster);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 16);
    assert!(groups[0].iter().all(|p| !p.is_bye()));
    // 4 players left: already a power of two.
    assert_eq!(groups[1].len(), 4);
    let ids: Vec<_> = groups[1].iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p16", "p17", "p18", "p19"]);
}

#[test]
fn bye_ids_are_unique_across_groups() {
    // 16 + 16 + 13 eligible: the last group is padded with 3 byes.
    let groups = partition(&players(16 + 16 + 13));
    assert_eq!(groups.len(), 3);
    let all: Vec<_> = groups.iter().flatten().map(|p| p.id.clone()).collect();
    let unique: HashSet<_> = all.iter().cloned().collect();
    assert_eq!(all.len(), unique.len());
    assert_eq!(groups.iter().flatten().filter(|p| p.is_bye()).count(), 3);
    assert!(groups[2]
        .iter()
        .filter(|p| p.is_bye())
        .all(|p| p.id.starts_with("bye-32-")));
}

#[test]
fn partition_is_deterministic() {
    let roster = players(37);
    assert_eq!(partition(&roster), partition(&roster));
}

#[test]
fn match_count_per_round() {
    for size in [2usize, 4, 8, 16] {
        let group = players(size);
        let matches = build_bracket(&group, 3);
        assert_eq!(matches.len(), size - 1);
        let rounds = num_rounds(size);
        assert_eq!(2usize.pow(rounds), size);
        for r in 1..=rounds {
            let in_round = matches.iter().filter(|m| m.round == r).count();
            assert_eq!(in_round, size >> r);
        }
    }
}

#[test]
fn degenerate_groups_have_no_bracket() {
    assert!(build_bracket(&[], 0).is_empty());
    assert!(build_bracket(&players(1), 0).is_empty());
    assert!(build_bracket(&players(3), 0).is_empty());
}

#[test]
fn ids_and_links_are_deterministic() {
    let group = players(8);
    let matches = build_bracket(&group, 2);
    assert_eq!(matches, build_bracket(&group, 2));

    let first = matches.iter().find(|m| m.id == "g2-1-3").unwrap();
    assert_eq!(first.round, 1);
    assert_eq!(first.position, 3);
    assert_eq!(first.next_match_id.as_deref(), Some("g2-2-1"));
    let semi = matches.iter().find(|m| m.id == "g2-2-0").unwrap();
    assert_eq!(semi.next_match_id.as_deref(), Some("g2-3-0"));
    let fin = matches.iter().find(|m| m.id == "g2-3-0").unwrap();
    assert_eq!(fin.next_match_id, None);
}

#[test]
fn first_round_pairs_players_in_order() {
    let group = players(4);
    let matches = build_bracket(&group, 0);
    let m = &matches[1];
    assert_eq!(m.player1.as_ref().unwrap().id, "p2");
    assert_eq!(m.player2.as_ref().unwrap().id, "p3");
    assert_eq!(m.status, MatchStatus::Pending);
    assert_eq!(m.winner, None);
    let fin = &matches[2];
    assert!(fin.player1.is_none() && fin.player2.is_none());
    assert_eq!(fin.status, MatchStatus::Pending);
}

#[test]
fn byes_resolve_at_construction_and_advance() {
    // 3 players -> A, bye, B, C
    let group = partition(&players(3)).remove(0);
    assert_eq!(group.len(), 4);
    let matches = build_bracket(&group, 0);

    let bye_match = &matches[0];
    assert_eq!(bye_match.status, MatchStatus::Completed);
    assert_eq!(bye_match.winner.as_ref().unwrap().id, "p0");

    let real_match = &matches[1];
    assert_eq!(real_match.status, MatchStatus::Pending);
    assert_eq!(real_match.winner, None);

    let fin = &matches[2];
    assert_eq!(fin.player1.as_ref().unwrap().id, "p0");
    assert!(fin.player2.is_none());
    assert_eq!(fin.status, MatchStatus::Active);
}

#[test]
fn double_bye_stays_pending() {
    let group = vec![Player::bye("x-0"), Player::bye("x-1")];
    let matches = build_bracket(&group, 0);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].status, MatchStatus::Pending);
    assert_eq!(matches[0].winner, None);
}

#[test]
fn round_names_count_from_the_final() {
    assert_eq!(round_name(1, 1), "Final");
    assert_eq!(round_name(3, 4), "Semifinals");
    assert_eq!(round_name(2, 4), "Quarterfinals");
    assert_eq!(round_name(1, 4), "Round of 16");
    assert_eq!(round_name(1, 5), "Round of 32");
    assert_eq!(round_name(1, 6), "Round of 64");
    // Absurd depths saturate instead of overflowing.
    assert_eq!(round_name(0, u32::MAX), format!("Round of {}", u64::MAX));
}

#[test]
fn view_groups_matches_by_round() {
    let group = players(8);
    let view = BracketView::from_matches(0, group.clone(), build_bracket(&group, 0));
    assert_eq!(view.round_numbers, vec![1, 2, 3]);
    assert_eq!(view.total_rounds, 3);
    assert_eq!(view.rounds[&1].len(), 4);
    assert_eq!(view.rounds[&2].len(), 2);
    assert_eq!(view.rounds[&3].len(), 1);
    assert_eq!(view.round_name(3), "Final");
    assert_eq!(view.round_names[&1], "Quarterfinals");
    assert_eq!(view.champion(), None);
    assert_eq!(view.progress(), (0, 7));
}

#[test]
fn shuffled_seeding_is_reproducible() {
    let roster = players(12);
    let policy = SeedingPolicy::Shuffled { seed: 42 };
    let a = policy.apply(&roster);
    assert_eq!(a, policy.apply(&roster));

    let mut ids: Vec<_> = a.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    let mut expected: Vec<_> = roster.iter().map(|p| p.id.clone()).collect();
    expected.sort();
    assert_eq!(ids, expected);

    assert_eq!(SeedingPolicy::InputOrder.apply(&roster), roster);
}
