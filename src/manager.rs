//! Session orchestrator: playing-day lifecycle over the persistence
//! collaborator. Every operation validates its input fully before mutating
//! anything - recording is all-or-nothing.

use crate::logic::{generate_teams, StatsSnapshot, SummaryStats};
use crate::models::{
    Algorithm, Game, GameResult, Partnership, Player, PlayerId, PlayerStats, PlayingDay,
    PlayingDayId, RoundnetError, Side, Team, MAX_SKILL_LEVEL, MIN_SKILL_LEVEL,
};
use crate::store::Store;
use chrono::{NaiveDate, Utc};
use rand::Rng;
use std::collections::HashSet;

/// Orchestrates players, playing days, and game recording against a storage
/// backend. Single-user: each method is one sequential read-modify-write
/// transaction against the store.
pub struct Manager<S: Store> {
    store: S,
}

impl<S: Store> Manager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ── Players ──────────────────────────────────────────────────────────

    /// Register a player. Name must be non-empty and unique
    /// (case-insensitive); skill must be on the 1-10 scale.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        skill_level: u8,
    ) -> Result<Player, RoundnetError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(RoundnetError::EmptyPlayerName);
        }
        if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&skill_level) {
            return Err(RoundnetError::SkillLevelOutOfRange(skill_level));
        }
        let is_duplicate = self
            .store
            .players()?
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name));
        if is_duplicate {
            return Err(RoundnetError::DuplicatePlayerName);
        }
        let player = Player::new(name, skill_level);
        self.store.save_player(&player)?;
        Ok(player)
    }

    pub fn players(&self) -> Result<Vec<Player>, RoundnetError> {
        self.store.players()
    }

    /// Delete a player. Refused while any game or playing day still
    /// references the id (referential integrity).
    pub fn delete_player(&mut self, id: PlayerId) -> Result<(), RoundnetError> {
        self.store
            .player(id)?
            .ok_or(RoundnetError::UnknownPlayer(id))?;
        let referenced_by_game = self
            .store
            .games()?
            .iter()
            .any(|g| g.player_ids().contains(&id));
        let referenced_by_day = self
            .store
            .playing_days()?
            .iter()
            .any(|d| d.has_player(id));
        if referenced_by_game || referenced_by_day {
            return Err(RoundnetError::PlayerReferenced(id));
        }
        self.store.delete_player(id)
    }

    /// Player statistics from the stored counters. Unknown ids yield
    /// zero-valued stats - never-played is a valid state, not an error.
    pub fn player_stats(&self, id: PlayerId) -> Result<PlayerStats, RoundnetError> {
        Ok(self
            .store
            .player(id)?
            .map(|p| p.stats())
            .unwrap_or_default())
    }

    // ── Playing days ─────────────────────────────────────────────────────

    pub fn add_playing_day(
        &mut self,
        date: NaiveDate,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<PlayingDay, RoundnetError> {
        let day = PlayingDay::new(date, location, description);
        self.store.save_playing_day(&day)?;
        Ok(day)
    }

    pub fn playing_days(&self) -> Result<Vec<PlayingDay>, RoundnetError> {
        self.store.playing_days()
    }

    pub fn playing_day(&self, id: PlayingDayId) -> Result<PlayingDay, RoundnetError> {
        self.store
            .playing_day(id)?
            .ok_or(RoundnetError::PlayingDayNotFound(id))
    }

    /// Assign the roster for a playing day, replacing any previous one.
    /// Every id must exist and appear only once. Replacing the roster
    /// discards a previously generated partition (the partition may only
    /// reference assigned players) but never recorded games.
    pub fn assign_roster(
        &mut self,
        day_id: PlayingDayId,
        player_ids: &[PlayerId],
    ) -> Result<PlayingDay, RoundnetError> {
        let mut day = self.playing_day(day_id)?;
        let mut seen = HashSet::new();
        for &id in player_ids {
            if !seen.insert(id) {
                return Err(RoundnetError::DuplicatePlayer(id));
            }
            if self.store.player(id)?.is_none() {
                return Err(RoundnetError::UnknownPlayer(id));
            }
        }
        day.player_ids = player_ids.to_vec();
        day.generated_teams.clear();
        day.algorithm = None;
        self.store.save_playing_day(&day)?;
        Ok(day)
    }

    /// Generate (or regenerate) the team partition for a playing day from
    /// its current roster. Regeneration replaces the partition but leaves
    /// recorded games untouched - each game keeps its own team snapshot.
    pub fn generate_teams<R: Rng>(
        &mut self,
        day_id: PlayingDayId,
        algorithm: Algorithm,
        rng: &mut R,
    ) -> Result<PlayingDay, RoundnetError> {
        let mut day = self.playing_day(day_id)?;
        let stats = self.stats_snapshot()?;
        let teams = generate_teams(&day.player_ids, algorithm, &stats, rng)?;
        day.generated_teams = teams;
        day.algorithm = Some(algorithm);
        self.store.save_playing_day(&day)?;
        Ok(day)
    }

    // ── Games ────────────────────────────────────────────────────────────

    /// Record a game outcome for a playing day.
    ///
    /// Rejected before any state changes: a player on both teams, a player
    /// twice in one team, or a team not fully inside the assigned roster.
    /// On success, in one logical unit: the game is persisted, both teams'
    /// player counters are updated (winners get a win, everyone gets a
    /// game, ties only count games), the game id is appended to the day,
    /// and the partnership table is rebuilt from the full game log.
    pub fn record_game(
        &mut self,
        day_id: PlayingDayId,
        team_a: Team,
        team_b: Team,
        result: GameResult,
        duration_minutes: Option<u32>,
        notes: Option<String>,
    ) -> Result<Game, RoundnetError> {
        let mut day = self.playing_day(day_id)?;
        validate_teams(&day, team_a, team_b)?;

        // Load all four players up front so nothing is written when a lookup fails.
        let mut participants: Vec<(Player, bool)> = Vec::with_capacity(4);
        for (team, side) in [(team_a, Side::A), (team_b, Side::B)] {
            let won = result.won(side);
            for id in team.players() {
                let player = self
                    .store
                    .player(id)?
                    .ok_or(RoundnetError::UnknownPlayer(id))?;
                participants.push((player, won));
            }
        }

        let game = Game::new(
            day_id,
            team_a,
            team_b,
            result,
            duration_minutes,
            notes,
            day.algorithm,
        );
        self.store.save_game(&game)?;

        for (mut player, won) in participants {
            player.record_game(won);
            self.store.save_player(&player)?;
        }

        day.game_ids.push(game.id);
        self.store.save_playing_day(&day)?;

        self.rebuild_partnerships()?;
        Ok(game)
    }

    /// Games recorded on one playing day, in recording order.
    pub fn games_for_day(&self, day_id: PlayingDayId) -> Result<Vec<Game>, RoundnetError> {
        let day = self.playing_day(day_id)?;
        Ok(self
            .store
            .games()?
            .into_iter()
            .filter(|g| g.playing_day_id == day.id)
            .collect())
    }

    pub fn games(&self) -> Result<Vec<Game>, RoundnetError> {
        self.store.games()
    }

    /// Games from the last `days` days, newest first.
    pub fn recent_games(&self, days: i64) -> Result<Vec<Game>, RoundnetError> {
        Ok(crate::logic::recent_games(
            &self.store.games()?,
            days,
            Utc::now(),
        ))
    }

    // ── Statistics ───────────────────────────────────────────────────────

    /// Fresh statistics snapshot derived from the full game log.
    pub fn stats_snapshot(&self) -> Result<StatsSnapshot, RoundnetError> {
        Ok(StatsSnapshot::from_games(
            &self.store.players()?,
            &self.store.games()?,
        ))
    }

    /// Partnership record for two players, recomputed from the game log.
    /// Symmetric in its arguments; zero counters when they never teamed up.
    pub fn partnership_stats(
        &self,
        a: PlayerId,
        b: PlayerId,
    ) -> Result<Partnership, RoundnetError> {
        Ok(self.stats_snapshot()?.partnership(a, b))
    }

    /// All partnership records, canonical pair order.
    pub fn partnerships(&self) -> Result<Vec<Partnership>, RoundnetError> {
        Ok(self.stats_snapshot()?.partnership_records())
    }

    /// Dashboard summary over the whole data set.
    pub fn summary(&self) -> Result<SummaryStats, RoundnetError> {
        Ok(crate::logic::summary_stats(
            &self.store.players()?,
            self.store.playing_days()?.len(),
            &self.store.games()?,
            Utc::now(),
        ))
    }

    /// Replace the persisted partnership table with a replay of the game
    /// log. Keeping the table derived means it can never disagree with the
    /// games it summarizes.
    fn rebuild_partnerships(&mut self) -> Result<(), RoundnetError> {
        let records = self.stats_snapshot()?.partnership_records();
        self.store.replace_partnerships(&records)
    }
}

/// Validate the four-distinct-player invariant and roster containment for a
/// game about to be recorded.
fn validate_teams(day: &PlayingDay, team_a: Team, team_b: Team) -> Result<(), RoundnetError> {
    for team in [team_a, team_b] {
        let [x, y] = team.players();
        if x == y {
            return Err(RoundnetError::DuplicateTeammate(x));
        }
    }
    for id in team_a.players() {
        if team_b.contains(id) {
            return Err(RoundnetError::PlayerOnBothTeams(id));
        }
    }
    for id in team_a.players().into_iter().chain(team_b.players()) {
        if !day.has_player(id) {
            return Err(RoundnetError::TeamNotInRoster(id));
        }
    }
    Ok(())
}
