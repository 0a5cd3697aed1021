//! Partnership aggregates: how often (and how successfully) two players
//! have been teammates. Always reconstructible from the game log.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Canonical unordered pair of player ids: the lower id always comes first,
/// so (A,B) and (B,A) collapse to the same key.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PairKey {
    a: PlayerId,
    b: PlayerId,
}

impl PairKey {
    pub fn new(x: PlayerId, y: PlayerId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    pub fn first(&self) -> PlayerId {
        self.a
    }

    pub fn second(&self) -> PlayerId {
        self.b
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.a == id || self.b == id
    }
}

/// Aggregate record for one pair of players. `player_a_id` is always the
/// lower of the two ids (canonical order).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Partnership {
    pub player_a_id: PlayerId,
    pub player_b_id: PlayerId,
    pub times_together: u32,
    pub wins_together: u32,
}

impl Partnership {
    pub fn new(key: PairKey) -> Self {
        Self {
            player_a_id: key.first(),
            player_b_id: key.second(),
            times_together: 0,
            wins_together: 0,
        }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(self.player_a_id, self.player_b_id)
    }

    /// Fraction of shared games this pair won; 0.0 when they never played together.
    pub fn win_rate_together(&self) -> f64 {
        if self.times_together == 0 {
            0.0
        } else {
            f64::from(self.wins_together) / f64::from(self.times_together)
        }
    }
}
