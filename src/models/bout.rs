//! Match (one bout between two players), MatchStatus and Score.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Deterministic identifier: `g{group}-{round}-{position}`.
pub type MatchId = String;

pub fn match_id(group_index: usize, round: u32, position: u32) -> MatchId {
    format!("g{group_index}-{round}-{position}")
}

/// Progress of a match. Moves forward only; `Completed` is terminal.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// No participant known yet, or waiting for a result with both sides seeded.
    #[default]
    Pending,
    /// At least one participant was advanced into it.
    Active,
    Completed,
}

/// Points per side, in slot order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

/// One bout of a single-elimination bracket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 1-based; round 1 is the first round of real play.
    pub round: u32,
    /// 0-based index within the round.
    pub position: u32,
    /// None until the feeding match is decided.
    pub player1: Option<Player>,
    pub player2: Option<Player>,
    pub winner: Option<Player>,
    pub score: Option<Score>,
    pub status: MatchStatus,
    /// Match receiving the winner; None for the final.
    pub next_match_id: Option<MatchId>,
}

impl Match {
    pub fn new(group_index: usize, round: u32, position: u32) -> Self {
        Self {
            id: match_id(group_index, round, position),
            round,
            position,
            player1: None,
            player2: None,
            winner: None,
            score: None,
            status: MatchStatus::Pending,
            next_match_id: None,
        }
    }

    /// Player in either slot with this id.
    pub fn participant(&self, player_id: &str) -> Option<&Player> {
        [&self.player1, &self.player2]
            .into_iter()
            .flatten()
            .find(|p| p.id == player_id)
    }

    pub fn has_participant(&self, player_id: &str) -> bool {
        self.participant(player_id).is_some()
    }

    pub fn winner_id(&self) -> Option<&PlayerId> {
        self.winner.as_ref().map(|p| &p.id)
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}
