//! Statistics aggregation: win rates and partnership history derived from
//! the full game log. Pure computation over a snapshot of (players, games) -
//! persisted partnership records are treated as a cache, never as truth.

use crate::models::{Game, PairKey, Partnership, Player, PlayerId, Side, MIN_SKILL_LEVEL};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Immutable snapshot of derived statistics, built by replaying the game log.
/// Lookups for unknown player ids return zero-valued stats (never-played is a
/// valid, common state).
#[derive(Clone, Debug, Default)]
pub struct StatsSnapshot {
    skills: HashMap<PlayerId, u8>,
    games_played: HashMap<PlayerId, u32>,
    games_won: HashMap<PlayerId, u32>,
    partnerships: HashMap<PairKey, Partnership>,
}

impl StatsSnapshot {
    /// Build a snapshot from all players and the full game log.
    pub fn from_games(players: &[Player], games: &[Game]) -> Self {
        let mut snapshot = Self {
            skills: players.iter().map(|p| (p.id, p.skill_level)).collect(),
            ..Self::default()
        };
        for game in games {
            snapshot.apply_game(game);
        }
        snapshot
    }

    fn apply_game(&mut self, game: &Game) {
        for (team, side) in [(game.team_a, Side::A), (game.team_b, Side::B)] {
            let won = game.result.won(side);
            for id in team.players() {
                *self.games_played.entry(id).or_insert(0) += 1;
                if won {
                    *self.games_won.entry(id).or_insert(0) += 1;
                }
            }
            let entry = self
                .partnerships
                .entry(team.pair_key())
                .or_insert_with(|| Partnership::new(team.pair_key()));
            entry.times_together += 1;
            if won {
                entry.wins_together += 1;
            }
        }
    }

    /// Skill level for a player, or the minimum when unknown.
    pub fn skill_level(&self, id: PlayerId) -> u8 {
        self.skills.get(&id).copied().unwrap_or(MIN_SKILL_LEVEL)
    }

    /// Win rate in [0,1] over all games the player took part in; 0.0 when
    /// they have never played.
    pub fn win_rate(&self, id: PlayerId) -> f64 {
        let played = self.games_played.get(&id).copied().unwrap_or(0);
        if played == 0 {
            return 0.0;
        }
        let won = self.games_won.get(&id).copied().unwrap_or(0);
        f64::from(won) / f64::from(played)
    }

    /// Partnership record for an unordered pair; zero counters when the two
    /// have never been teammates.
    pub fn partnership(&self, a: PlayerId, b: PlayerId) -> Partnership {
        let key = PairKey::new(a, b);
        self.partnerships
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Partnership::new(key))
    }

    /// How many times two players have been on the same team.
    pub fn times_together(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.partnerships
            .get(&PairKey::new(a, b))
            .map(|p| p.times_together)
            .unwrap_or(0)
    }

    /// Total games this player has spent partnered with anyone, used by the
    /// partnership-balanced algorithm to find the least-paired player.
    pub fn total_times_partnered(&self, id: PlayerId) -> u32 {
        self.partnerships
            .iter()
            .filter(|(key, _)| key.contains(id))
            .map(|(_, p)| p.times_together)
            .sum()
    }

    /// All partnership records by canonical pair key.
    pub fn partnerships(&self) -> &HashMap<PairKey, Partnership> {
        &self.partnerships
    }

    /// Partnership records as a list (canonical pair order within each record).
    pub fn partnership_records(&self) -> Vec<Partnership> {
        let mut records: Vec<Partnership> = self.partnerships.values().cloned().collect();
        records.sort_by_key(|p| (p.player_a_id, p.player_b_id));
        records
    }
}

/// Dashboard summary over the whole data set.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_players: usize,
    pub total_playing_days: usize,
    pub total_games: usize,
    /// Mean duration over games that recorded one, in minutes.
    pub avg_game_duration: f64,
    /// Games recorded in the last 7 days.
    pub recent_games: usize,
}

/// Summarize the data set for the dashboard. `now` is passed in so the
/// recency window is testable.
pub fn summary_stats(
    players: &[Player],
    playing_days: usize,
    games: &[Game],
    now: DateTime<Utc>,
) -> SummaryStats {
    let durations: Vec<u32> = games.iter().filter_map(|g| g.duration_minutes).collect();
    let avg_game_duration = if durations.is_empty() {
        0.0
    } else {
        f64::from(durations.iter().sum::<u32>()) / durations.len() as f64
    };
    SummaryStats {
        total_players: players.len(),
        total_playing_days: playing_days,
        total_games: games.len(),
        avg_game_duration,
        recent_games: recent_games(games, 7, now).len(),
    }
}

/// Games recorded within the last `days` days, newest first.
pub fn recent_games(games: &[Game], days: i64, now: DateTime<Utc>) -> Vec<Game> {
    let cutoff = now - Duration::days(days);
    let mut recent: Vec<Game> = games
        .iter()
        .filter(|g| g.created_at >= cutoff)
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent
}
