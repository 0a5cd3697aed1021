//! Player and PlayerStats data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in rosters, teams, and lookups).
pub type PlayerId = Uuid;

/// Skill ratings are on a 1-10 scale.
pub const MIN_SKILL_LEVEL: u8 = 1;
pub const MAX_SKILL_LEVEL: u8 = 10;

/// Statistics view of a player (for API / display).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub win_rate: f64,
    pub total_games: u32,
    pub total_wins: u32,
}

impl PlayerStats {
    pub fn from_player(p: &Player) -> Self {
        Self {
            win_rate: p.win_rate(),
            total_games: p.total_games,
            total_wins: p.total_wins,
        }
    }
}

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Skill rating on a 1-10 scale, used by the skill-balanced algorithm.
    pub skill_level: u8,
    pub total_wins: u32,
    pub total_games: u32,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new player with the given name and skill level. Counters start at zero.
    pub fn new(name: impl Into<String>, skill_level: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            skill_level,
            total_wins: 0,
            total_games: 0,
            created_at: Utc::now(),
        }
    }

    /// Fraction of played games this player won; 0.0 when they have never played.
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            f64::from(self.total_wins) / f64::from(self.total_games)
        }
    }

    /// Current stats as a separate struct (for API responses).
    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from_player(self)
    }

    /// Record one played game, counting it as a win if `won`.
    pub fn record_game(&mut self, won: bool) {
        self.total_games += 1;
        if won {
            self.total_wins += 1;
        }
    }
}
