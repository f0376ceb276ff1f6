//! Group partitioning: split eligible players into brackets of at most 16, padded with byes.

use crate::models::Player;

/// Largest group (and bracket) size.
pub const MAX_GROUP_SIZE: usize = 16;

/// Split `players` into consecutive chunks of at most [`MAX_GROUP_SIZE`] and pad each chunk
/// with byes up to the next power of two.
///
/// Byes are interleaved so that each one sits right after a real player: with pairwise
/// seeding every bye then faces a real opponent and no match is bye against bye. Real players
/// keep their relative order. Bye ids are `bye-{chunk_start}-{n}`, unique across the result.
pub fn partition(players: &[Player]) -> Vec<Vec<Player>> {
    players
        .chunks(MAX_GROUP_SIZE)
        .enumerate()
        .map(|(i, chunk)| pad_with_byes(chunk, i * MAX_GROUP_SIZE))
        .collect()
}

fn pad_with_byes(chunk: &[Player], chunk_start: usize) -> Vec<Player> {
    let size = chunk.len().next_power_of_two().min(MAX_GROUP_SIZE);
    let byes = size - chunk.len();
    if byes > 0 {
        log::debug!(
            "Padding group at {} with {} bye(s) ({} players -> {})",
            chunk_start,
            byes,
            chunk.len(),
            size
        );
    }
    let mut group = Vec::with_capacity(size);
    for (i, player) in chunk.iter().enumerate() {
        group.push(player.clone());
        if i < byes {
            group.push(Player::bye(format!("{}-{}", chunk_start, i)));
        }
    }
    group
}

/// Number of groups `n` eligible players are split into.
pub fn group_count(n: usize) -> usize {
    n.div_ceil(MAX_GROUP_SIZE)
}
