//! Game, Team, and GameResult for recorded 2v2 games.

use crate::models::partnership::PairKey;
use crate::models::player::PlayerId;
use crate::models::playing_day::{Algorithm, PlayingDayId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// A team of exactly two players. Serialized as a two-element array.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Team(pub [PlayerId; 2]);

impl Team {
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        Self([a, b])
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.0[0] == id || self.0[1] == id
    }

    pub fn players(&self) -> [PlayerId; 2] {
        self.0
    }

    /// Canonical unordered key for this team's pair.
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.0[0], self.0[1])
    }
}

/// Outcome of a game. Exactly one of the three applies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    TeamAWin,
    TeamBWin,
    Tie,
}

impl GameResult {
    /// Whether the given side won (ties count for neither).
    pub fn won(&self, side: Side) -> bool {
        matches!(
            (self, side),
            (GameResult::TeamAWin, Side::A) | (GameResult::TeamBWin, Side::B)
        )
    }
}

/// Which of the two teams in a game a player belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    A,
    B,
}

/// A recorded game: two teams of two, a result, and audit metadata.
/// Immutable once recorded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub playing_day_id: PlayingDayId,
    pub team_a: Team,
    pub team_b: Team,
    pub result: GameResult,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
    /// Algorithm the playing day's partition was generated with at recording
    /// time (None when teams were entered without a generated partition).
    pub algorithm: Option<Algorithm>,
    pub created_at: DateTime<Utc>,
}

impl Game {
    pub fn new(
        playing_day_id: PlayingDayId,
        team_a: Team,
        team_b: Team,
        result: GameResult,
        duration_minutes: Option<u32>,
        notes: Option<String>,
        algorithm: Option<Algorithm>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            playing_day_id,
            team_a,
            team_b,
            result,
            duration_minutes,
            notes,
            algorithm,
            created_at: Utc::now(),
        }
    }

    /// All four player ids in this game (team A first).
    pub fn player_ids(&self) -> [PlayerId; 4] {
        let [a0, a1] = self.team_a.players();
        let [b0, b1] = self.team_b.players();
        [a0, a1, b0, b1]
    }
}
