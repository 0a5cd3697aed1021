//! Data structures for the roundnet app: players, playing days, games, partnerships.

mod error;
mod game;
mod partnership;
mod player;
mod playing_day;

pub use error::RoundnetError;
pub use game::{Game, GameId, GameResult, Side, Team};
pub use partnership::{PairKey, Partnership};
pub use player::{Player, PlayerId, PlayerStats, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};
pub use playing_day::{Algorithm, PlayingDay, PlayingDayId, PlayingDayPhase};
