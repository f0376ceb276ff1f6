//! BracketView (round-indexed bracket of one group) and BracketError.

use crate::models::bout::{Match, MatchId};
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors raised by the advancement engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// No match with this id in the group.
    MatchNotFound(MatchId),
    /// One side of the match is not determined yet.
    MatchNotReady(MatchId),
    /// Declared winner is not one of the match's two players (or is a bye).
    NotAParticipant { match_id: MatchId, player_id: PlayerId },
    /// Match already has a different winner.
    AlreadyDecided { match_id: MatchId, winner_id: PlayerId },
    /// Both slots of the downstream match are taken: duplicate or out-of-order submission.
    DownstreamSlotsFull { match_id: MatchId, next_match_id: MatchId },
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            BracketError::MatchNotReady(id) => write!(f, "Match {} does not have both players yet", id),
            BracketError::NotAParticipant { match_id, player_id } => {
                write!(f, "Player {} is not playing in match {}", player_id, match_id)
            }
            BracketError::AlreadyDecided { match_id, winner_id } => {
                write!(f, "Match {} was already won by {}", match_id, winner_id)
            }
            BracketError::DownstreamSlotsFull { match_id, next_match_id } => write!(
                f,
                "Cannot advance winner of {}: match {} already has two players",
                match_id, next_match_id
            ),
        }
    }
}

impl std::error::Error for BracketError {}

/// Display name of `round` given how many rounds the bracket has.
pub fn round_name(round: u32, total_rounds: u32) -> String {
    let remaining = total_rounds.saturating_sub(round);
    match remaining {
        0 => "Final".to_string(),
        1 => "Semifinals".to_string(),
        2 => "Quarterfinals".to_string(),
        3 => "Round of 16".to_string(),
        n => format!("Round of {}", 2u64.saturating_pow(n.saturating_add(1))),
    }
}

/// Bracket of one group as handed to renderers: matches indexed by round plus the flat list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BracketView {
    pub group_index: usize,
    /// The group's players in seed order, byes included.
    pub players: Vec<Player>,
    pub rounds: BTreeMap<u32, Vec<Match>>,
    /// Sorted ascending.
    pub round_numbers: Vec<u32>,
    pub total_rounds: u32,
    pub round_names: BTreeMap<u32, String>,
    pub matches: Vec<Match>,
}

impl BracketView {
    pub fn from_matches(group_index: usize, players: Vec<Player>, matches: Vec<Match>) -> Self {
        let mut rounds: BTreeMap<u32, Vec<Match>> = BTreeMap::new();
        for m in &matches {
            rounds.entry(m.round).or_default().push(m.clone());
        }
        for round in rounds.values_mut() {
            round.sort_by_key(|m| m.position);
        }
        let round_numbers: Vec<u32> = rounds.keys().copied().collect();
        let total_rounds = round_numbers.len() as u32;
        let round_names = round_numbers
            .iter()
            .map(|&r| (r, round_name(r, total_rounds)))
            .collect();
        Self {
            group_index,
            players,
            rounds,
            round_numbers,
            total_rounds,
            round_names,
            matches,
        }
    }

    pub fn round_name(&self, round: u32) -> String {
        round_name(round, self.total_rounds)
    }

    pub fn get_match(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Players that actually compete (byes excluded).
    pub fn real_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_bye())
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<&Player> {
        self.rounds
            .get(&self.total_rounds)?
            .first()?
            .winner
            .as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Completed matches out of all matches.
    pub fn progress(&self) -> (usize, usize) {
        let done = self.matches.iter().filter(|m| m.is_completed()).count();
        (done, self.matches.len())
    }
}
