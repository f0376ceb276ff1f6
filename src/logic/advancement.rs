//! Match advancement: record a result and move the winner into the next round.

use crate::models::{BracketError, BracketView, Match, MatchStatus, Score};

/// Record `winner_id` as winner of `match_id` and return the updated match list.
///
/// The input is left untouched. Recording the same winner again is a no-op apart from
/// replacing the score when one is given; it never advances the winner twice.
pub fn record_result(
    matches: &[Match],
    match_id: &str,
    winner_id: &str,
    score: Option<Score>,
) -> Result<Vec<Match>, BracketError> {
    let mut updated = matches.to_vec();
    apply_result(&mut updated, match_id, winner_id, score)?;
    Ok(updated)
}

/// In-place variant of [`record_result`]. On error `matches` is unchanged.
pub fn apply_result(
    matches: &mut [Match],
    match_id: &str,
    winner_id: &str,
    score: Option<Score>,
) -> Result<(), BracketError> {
    let idx = matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()))?;

    let m = &matches[idx];
    if m.player1.is_none() || m.player2.is_none() {
        return Err(BracketError::MatchNotReady(m.id.clone()));
    }
    let winner = match m.participant(winner_id) {
        Some(p) if !p.is_bye() => p.clone(),
        _ => {
            return Err(BracketError::NotAParticipant {
                match_id: m.id.clone(),
                player_id: winner_id.to_string(),
            })
        }
    };

    if let Some(previous) = m.winner_id() {
        if previous != winner_id {
            return Err(BracketError::AlreadyDecided {
                match_id: m.id.clone(),
                winner_id: previous.clone(),
            });
        }
        if score.is_some() {
            matches[idx].score = score;
        }
        log::debug!("Match {}: result for {} reconfirmed", match_id, winner_id);
        return Ok(());
    }

    // Check the downstream slot before touching anything so a failure leaves no trace.
    check_downstream(matches, idx)?;

    let m = &mut matches[idx];
    m.winner = Some(winner);
    m.status = MatchStatus::Completed;
    if score.is_some() {
        m.score = score;
    }
    log::info!("Match {}: {} wins", match_id, winner_id);
    advance_winner(matches, idx)
}

/// Slot the winner of `matches[idx]` into the first empty side of its next match.
///
/// Does nothing for the final, for undecided matches, or when the winner is already there.
pub(crate) fn advance_winner(matches: &mut [Match], idx: usize) -> Result<(), BracketError> {
    let next_idx = match check_downstream(matches, idx)? {
        Some(i) => i,
        None => return Ok(()),
    };
    let winner = match matches[idx].winner.clone() {
        Some(w) => w,
        None => return Ok(()),
    };
    if matches[next_idx].has_participant(&winner.id) {
        return Ok(());
    }
    log::debug!("Advancing {} from {} to {}", winner.id, matches[idx].id, matches[next_idx].id);
    let next = &mut matches[next_idx];
    if next.player1.is_none() {
        next.player1 = Some(winner);
    } else {
        next.player2 = Some(winner);
    }
    if next.status == MatchStatus::Pending {
        next.status = MatchStatus::Active;
    }
    Ok(())
}

/// Index of the next match of `matches[idx]`, failing when it cannot take that match's winner.
fn check_downstream(matches: &[Match], idx: usize) -> Result<Option<usize>, BracketError> {
    let m = &matches[idx];
    let next_id = match &m.next_match_id {
        Some(id) => id,
        None => return Ok(None),
    };
    let next_idx = matches
        .iter()
        .position(|n| &n.id == next_id)
        .ok_or_else(|| BracketError::MatchNotFound(next_id.clone()))?;
    let next = &matches[next_idx];
    let already_there = m
        .winner_id()
        .is_some_and(|w| next.has_participant(w));
    if next.player1.is_some() && next.player2.is_some() && !already_there {
        log::warn!("Match {} is full, cannot take the winner of {}", next.id, m.id);
        return Err(BracketError::DownstreamSlotsFull {
            match_id: m.id.clone(),
            next_match_id: next.id.clone(),
        });
    }
    Ok(Some(next_idx))
}

impl BracketView {
    /// Record a result and return the updated view.
    pub fn record_result(
        &self,
        match_id: &str,
        winner_id: &str,
        score: Option<Score>,
    ) -> Result<BracketView, BracketError> {
        let matches = record_result(&self.matches, match_id, winner_id, score)?;
        Ok(BracketView::from_matches(self.group_index, self.players.clone(), matches))
    }
}
