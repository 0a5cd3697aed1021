//! Roundnet player management: library with models, team-generation logic,
//! statistics, and file-backed storage.

pub mod logic;
pub mod manager;
pub mod models;
pub mod store;

pub use logic::{
    balance_metrics, generate_teams, recent_games, summary_stats, StatsSnapshot, SummaryStats,
    TeamBalance,
};
pub use manager::Manager;
pub use models::{
    Algorithm, Game, GameId, GameResult, PairKey, Partnership, Player, PlayerId, PlayerStats,
    PlayingDay, PlayingDayId, PlayingDayPhase, RoundnetError, Side, Team,
};
pub use store::{JsonStore, MemoryStore, Store};
