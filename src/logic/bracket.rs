//! Bracket construction: the full single-elimination match tree of one group.

use crate::logic::advancement::advance_winner;
use crate::models::{match_id, Match, MatchStatus, Player};

/// Rounds needed for a group of `group_size` players (a power of two).
pub fn num_rounds(group_size: usize) -> u32 {
    if group_size < 2 {
        0
    } else {
        group_size.trailing_zeros()
    }
}

/// Build every match of the bracket for `group`.
///
/// Returns an empty list when `group` has fewer than 2 players or its size is not a power of
/// two. Round 1 pairs `group[2p]` with `group[2p + 1]`; a match against exactly one bye is
/// completed on the spot and its winner is advanced like any recorded result.
pub fn build(group: &[Player], group_index: usize) -> Vec<Match> {
    let size = group.len();
    if size < 2 || !size.is_power_of_two() {
        log::debug!("Group {} has {} player slot(s): no bracket", group_index, size);
        return Vec::new();
    }
    let total_rounds = num_rounds(size);
    let mut matches = Vec::with_capacity(size - 1);

    for round in 1..=total_rounds {
        let matches_in_round = (size >> round) as u32;
        for position in 0..matches_in_round {
            let mut m = Match::new(group_index, round, position);
            if round == 1 {
                seed_first_round(&mut m, group);
            }
            if round < total_rounds {
                m.next_match_id = Some(match_id(group_index, round + 1, position / 2));
            }
            matches.push(m);
        }
    }

    // Round 1 comes first in the list, so indices below size / 2 are first-round matches.
    for idx in 0..size / 2 {
        if matches[idx].is_completed() {
            if let Err(e) = advance_winner(&mut matches, idx) {
                log::warn!("Group {}: bye advancement failed: {}", group_index, e);
            }
        }
    }

    log::debug!(
        "Built bracket for group {}: {} players, {} rounds, {} matches",
        group_index,
        size,
        total_rounds,
        matches.len()
    );
    matches
}

fn seed_first_round(m: &mut Match, group: &[Player]) {
    let first = group.get(m.position as usize * 2).cloned();
    let second = group.get(m.position as usize * 2 + 1).cloned();
    let winner = match (&first, &second) {
        (Some(a), Some(b)) if b.is_bye() && !a.is_bye() => Some(a.clone()),
        (Some(a), Some(b)) if a.is_bye() && !b.is_bye() => Some(b.clone()),
        _ => None,
    };
    m.player1 = first;
    m.player2 = second;
    if winner.is_some() {
        m.winner = winner;
        m.status = MatchStatus::Completed;
    }
}
