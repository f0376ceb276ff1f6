//! Seeding policy: order of eligible players before they are split into groups.

use crate::models::Player;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum SeedingPolicy {
    /// Keep the caller's order (roster order after filtering).
    #[default]
    InputOrder,
    /// Shuffle with a reproducible seed.
    Shuffled { seed: u64 },
}

impl SeedingPolicy {
    /// Shuffled policy with a fresh random seed. Keep the returned value to reproduce the draw.
    pub fn random() -> Self {
        SeedingPolicy::Shuffled {
            seed: rand::thread_rng().gen(),
        }
    }

    /// Players in seed order.
    pub fn apply(&self, players: &[Player]) -> Vec<Player> {
        let mut seeded = players.to_vec();
        if let SeedingPolicy::Shuffled { seed } = *self {
            let mut rng = StdRng::seed_from_u64(seed);
            seeded.shuffle(&mut rng);
        }
        seeded
    }
}
