//! Persistence collaborator: a read/write by-id store for the four entity
//! types. The core only relies on this contract - writes are durable before
//! the next read in the same process, ids are stable and unique.
//!
//! `JsonStore` keeps one JSON array file per entity type under a data
//! directory (players.json, playing_days.json, games.json,
//! partnerships.json); a missing file reads as empty. `MemoryStore` backs
//! tests and embedding.

use crate::models::{
    Game, Partnership, Player, PlayerId, PlayingDay, PlayingDayId, RoundnetError,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage backend for players, playing days, games, and partnership records.
/// `save_*` inserts or replaces by id. The partnership table is replaced
/// wholesale - it is a derived cache of the game log, not a source of truth.
pub trait Store {
    fn players(&self) -> Result<Vec<Player>, RoundnetError>;
    fn player(&self, id: PlayerId) -> Result<Option<Player>, RoundnetError>;
    fn save_player(&mut self, player: &Player) -> Result<(), RoundnetError>;
    fn delete_player(&mut self, id: PlayerId) -> Result<(), RoundnetError>;

    fn playing_days(&self) -> Result<Vec<PlayingDay>, RoundnetError>;
    fn playing_day(&self, id: PlayingDayId) -> Result<Option<PlayingDay>, RoundnetError>;
    fn save_playing_day(&mut self, day: &PlayingDay) -> Result<(), RoundnetError>;

    fn games(&self) -> Result<Vec<Game>, RoundnetError>;
    fn save_game(&mut self, game: &Game) -> Result<(), RoundnetError>;

    fn partnerships(&self) -> Result<Vec<Partnership>, RoundnetError>;
    fn replace_partnerships(&mut self, partnerships: &[Partnership]) -> Result<(), RoundnetError>;
}

fn storage_error(context: &str, err: impl std::fmt::Display) -> RoundnetError {
    RoundnetError::Storage(format!("{}: {}", context, err))
}

/// File-backed store: one pretty-printed JSON array per entity type.
pub struct JsonStore {
    players_file: PathBuf,
    playing_days_file: PathBuf,
    games_file: PathBuf,
    partnerships_file: PathBuf,
}

impl JsonStore {
    /// Open a store under `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, RoundnetError> {
        let dir = data_dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| storage_error("create data dir", e))?;
        Ok(Self {
            players_file: dir.join("players.json"),
            playing_days_file: dir.join("playing_days.json"),
            games_file: dir.join("games.json"),
            partnerships_file: dir.join("partnerships.json"),
        })
    }

    fn load<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, RoundnetError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| storage_error(&format!("read {}", path.display()), e))?;
        serde_json::from_str(&text)
            .map_err(|e| storage_error(&format!("parse {}", path.display()), e))
    }

    fn save<T: serde::Serialize>(path: &Path, items: &[T]) -> Result<(), RoundnetError> {
        let text = serde_json::to_string_pretty(items)
            .map_err(|e| storage_error("serialize", e))?;
        fs::write(path, text)
            .map_err(|e| storage_error(&format!("write {}", path.display()), e))
    }

    fn upsert<T, F>(path: &Path, item: &T, same_id: F) -> Result<(), RoundnetError>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Clone,
        F: Fn(&T) -> bool,
    {
        let mut items: Vec<T> = Self::load(path)?;
        match items.iter_mut().find(|existing| same_id(existing)) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        Self::save(path, &items)
    }
}

impl Store for JsonStore {
    fn players(&self) -> Result<Vec<Player>, RoundnetError> {
        Self::load(&self.players_file)
    }

    fn player(&self, id: PlayerId) -> Result<Option<Player>, RoundnetError> {
        Ok(self.players()?.into_iter().find(|p| p.id == id))
    }

    fn save_player(&mut self, player: &Player) -> Result<(), RoundnetError> {
        Self::upsert(&self.players_file, player, |p: &Player| p.id == player.id)
    }

    fn delete_player(&mut self, id: PlayerId) -> Result<(), RoundnetError> {
        let mut players = self.players()?;
        players.retain(|p| p.id != id);
        Self::save(&self.players_file, &players)
    }

    fn playing_days(&self) -> Result<Vec<PlayingDay>, RoundnetError> {
        Self::load(&self.playing_days_file)
    }

    fn playing_day(&self, id: PlayingDayId) -> Result<Option<PlayingDay>, RoundnetError> {
        Ok(self.playing_days()?.into_iter().find(|d| d.id == id))
    }

    fn save_playing_day(&mut self, day: &PlayingDay) -> Result<(), RoundnetError> {
        Self::upsert(&self.playing_days_file, day, |d: &PlayingDay| d.id == day.id)
    }

    fn games(&self) -> Result<Vec<Game>, RoundnetError> {
        Self::load(&self.games_file)
    }

    fn save_game(&mut self, game: &Game) -> Result<(), RoundnetError> {
        Self::upsert(&self.games_file, game, |g: &Game| g.id == game.id)
    }

    fn partnerships(&self) -> Result<Vec<Partnership>, RoundnetError> {
        Self::load(&self.partnerships_file)
    }

    fn replace_partnerships(&mut self, partnerships: &[Partnership]) -> Result<(), RoundnetError> {
        Self::save(&self.partnerships_file, partnerships)
    }
}

/// In-memory store for tests and embedding. Iteration order of the listing
/// methods follows insertion order.
#[derive(Default)]
pub struct MemoryStore {
    players: Vec<Player>,
    playing_days: Vec<PlayingDay>,
    games: Vec<Game>,
    partnerships: Vec<Partnership>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn players(&self) -> Result<Vec<Player>, RoundnetError> {
        Ok(self.players.clone())
    }

    fn player(&self, id: PlayerId) -> Result<Option<Player>, RoundnetError> {
        Ok(self.players.iter().find(|p| p.id == id).cloned())
    }

    fn save_player(&mut self, player: &Player) -> Result<(), RoundnetError> {
        match self.players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player.clone(),
            None => self.players.push(player.clone()),
        }
        Ok(())
    }

    fn delete_player(&mut self, id: PlayerId) -> Result<(), RoundnetError> {
        self.players.retain(|p| p.id != id);
        Ok(())
    }

    fn playing_days(&self) -> Result<Vec<PlayingDay>, RoundnetError> {
        Ok(self.playing_days.clone())
    }

    fn playing_day(&self, id: PlayingDayId) -> Result<Option<PlayingDay>, RoundnetError> {
        Ok(self.playing_days.iter().find(|d| d.id == id).cloned())
    }

    fn save_playing_day(&mut self, day: &PlayingDay) -> Result<(), RoundnetError> {
        match self.playing_days.iter_mut().find(|d| d.id == day.id) {
            Some(existing) => *existing = day.clone(),
            None => self.playing_days.push(day.clone()),
        }
        Ok(())
    }

    fn games(&self) -> Result<Vec<Game>, RoundnetError> {
        Ok(self.games.clone())
    }

    fn save_game(&mut self, game: &Game) -> Result<(), RoundnetError> {
        match self.games.iter_mut().find(|g| g.id == game.id) {
            Some(existing) => *existing = game.clone(),
            None => self.games.push(game.clone()),
        }
        Ok(())
    }

    fn partnerships(&self) -> Result<Vec<Partnership>, RoundnetError> {
        Ok(self.partnerships.clone())
    }

    fn replace_partnerships(&mut self, partnerships: &[Partnership]) -> Result<(), RoundnetError> {
        self.partnerships = partnerships.to_vec();
        Ok(())
    }
}
