//! Errors for roundnet operations. All failures are per-operation and
//! recoverable by the caller supplying corrected input.

use crate::models::player::PlayerId;
use crate::models::playing_day::PlayingDayId;

/// Errors that can occur during player, playing-day, or game operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoundnetError {
    /// Roster size must be even and at least 2 to form two-player teams.
    InvalidRosterSize { count: usize },
    /// A referenced player id does not exist in the player store.
    UnknownPlayer(PlayerId),
    /// The same player id was supplied more than once in a roster.
    DuplicatePlayer(PlayerId),
    /// Skill level outside the 1-10 scale.
    SkillLevelOutOfRange(u8),
    /// Player name is empty (after trimming).
    EmptyPlayerName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// No playing day with this id.
    PlayingDayNotFound(PlayingDayId),
    /// A player appears on both teams of the same game.
    PlayerOnBothTeams(PlayerId),
    /// The same player appears twice within one team.
    DuplicateTeammate(PlayerId),
    /// A team references a player not in the day's assigned roster.
    TeamNotInRoster(PlayerId),
    /// Player is still referenced by a game or playing day and cannot be deleted.
    PlayerReferenced(PlayerId),
    /// The persistence collaborator failed.
    Storage(String),
}

impl std::fmt::Display for RoundnetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundnetError::InvalidRosterSize { count } => {
                write!(f, "Roster size must be even and at least 2, got {}", count)
            }
            RoundnetError::UnknownPlayer(id) => write!(f, "Unknown player: {}", id),
            RoundnetError::DuplicatePlayer(id) => {
                write!(f, "Player appears more than once in the roster: {}", id)
            }
            RoundnetError::SkillLevelOutOfRange(level) => {
                write!(f, "Skill level must be between 1 and 10, got {}", level)
            }
            RoundnetError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            RoundnetError::DuplicatePlayerName => {
                write!(f, "A player with this name already exists")
            }
            RoundnetError::PlayingDayNotFound(id) => write!(f, "No playing day: {}", id),
            RoundnetError::PlayerOnBothTeams(id) => {
                write!(f, "Player appears on both teams: {}", id)
            }
            RoundnetError::DuplicateTeammate(id) => {
                write!(f, "Player appears twice in the same team: {}", id)
            }
            RoundnetError::TeamNotInRoster(id) => {
                write!(f, "Team member is not in the day's roster: {}", id)
            }
            RoundnetError::PlayerReferenced(id) => {
                write!(f, "Player is referenced by games or playing days: {}", id)
            }
            RoundnetError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for RoundnetError {}
