//! PlayingDay: one session grouping a roster, a team partition, and its games.

use crate::models::game::{GameId, Team};
use crate::models::player::PlayerId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a playing day.
pub type PlayingDayId = Uuid;

/// Team-generation algorithm selector. Serialized names match the stored
/// `algorithm` field on playing days and games.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Random,
    SkillBalanced,
    WinRateBalanced,
    PartnershipBalanced,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Random,
        Algorithm::SkillBalanced,
        Algorithm::WinRateBalanced,
        Algorithm::PartnershipBalanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Random => "random",
            Algorithm::SkillBalanced => "skill_balanced",
            Algorithm::WinRateBalanced => "win_rate_balanced",
            Algorithm::PartnershipBalanced => "partnership_balanced",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle phase of a playing day, derived from its contents.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayingDayPhase {
    /// Date/location set, no players assigned yet.
    Created,
    /// Players attached, no partition generated.
    RosterAssigned,
    /// A partition exists, no games recorded against it yet.
    TeamsGenerated,
    /// One or more games recorded.
    Recording,
}

/// A playing day: date, location, assigned roster, the generated team
/// partition (tagged with the algorithm that produced it), and recorded games.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayingDay {
    pub id: PlayingDayId,
    pub date: NaiveDate,
    pub location: String,
    pub description: String,
    /// Assigned roster; a player id appears at most once.
    pub player_ids: Vec<PlayerId>,
    /// Current partition. Only contains ids from `player_ids`; cleared when
    /// the roster changes.
    pub generated_teams: Vec<Team>,
    /// Algorithm that produced `generated_teams`, None while no partition exists.
    pub algorithm: Option<Algorithm>,
    /// Games recorded on this day. Never cleared by regeneration.
    pub game_ids: Vec<GameId>,
    pub created_at: DateTime<Utc>,
}

impl PlayingDay {
    pub fn new(
        date: NaiveDate,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            location: location.into(),
            description: description.into(),
            player_ids: Vec::new(),
            generated_teams: Vec::new(),
            algorithm: None,
            game_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Derived lifecycle phase (no stored state to drift out of sync).
    pub fn phase(&self) -> PlayingDayPhase {
        if !self.game_ids.is_empty() {
            PlayingDayPhase::Recording
        } else if !self.generated_teams.is_empty() {
            PlayingDayPhase::TeamsGenerated
        } else if !self.player_ids.is_empty() {
            PlayingDayPhase::RosterAssigned
        } else {
            PlayingDayPhase::Created
        }
    }

    pub fn has_player(&self, id: PlayerId) -> bool {
        self.player_ids.contains(&id)
    }
}
