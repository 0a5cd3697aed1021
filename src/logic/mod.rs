//! Business logic: team generation and statistics aggregation.

mod stats;
mod team_generator;

pub use stats::{recent_games, summary_stats, StatsSnapshot, SummaryStats};
pub use team_generator::{balance_metrics, generate_teams, TeamBalance};
