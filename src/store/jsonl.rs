//! JSONL-backed durable store.
//!
//! Two relations as line-delimited JSON files under the data directory:
//! `players.jsonl` and `matches.jsonl`. Each operation opens the files
//! it needs, reads or appends, and closes them before returning — the
//! file handle is the connection, and it never outlives the call.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::models::{MatchRecord, Player, PlayerId, Standing};

use super::{
    aggregate_standings, validate_match, MatchWriteError, Store, StoreConfig, StoreError,
};

/// Typed access to one JSONL relation.
struct Relation<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> Relation<T> {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Read every row. Unparseable lines are logged and skipped so a
    /// single corrupt row cannot take the whole tournament down.
    fn read_all(&self) -> Result<Vec<T>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    warn!(
                        "Skipping unparseable line {} in {:?}: {}",
                        line_num + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        debug!("Read {} rows from {:?}", rows.len(), self.path);
        Ok(rows)
    }

    /// Append one row, creating the file and parent directory on first use.
    fn append(&self, row: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", serde_json::to_string(row)?)?;
        writer.flush()?;

        debug!("Appended row to {:?}", self.path);
        Ok(())
    }

    /// Delete every row by removing the file.
    fn truncate(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!("Truncated {:?}", self.path);
        }
        Ok(())
    }
}

/// Durable [`Store`] over two JSONL files.
pub struct JsonlStore {
    config: StoreConfig,
}

impl JsonlStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    fn players(&self) -> Relation<Player> {
        Relation::new(self.config.players_path())
    }

    fn matches(&self) -> Relation<MatchRecord> {
        Relation::new(self.config.matches_path())
    }

    /// Next id: one past the highest ever assigned in this lifetime.
    fn next_id(players: &[Player]) -> PlayerId {
        players
            .iter()
            .map(|p| p.id)
            .max()
            .map(|id| id.next())
            .unwrap_or_else(|| PlayerId::new(1))
    }
}

#[async_trait]
impl Store for JsonlStore {
    async fn count_players(&self) -> Result<u64, StoreError> {
        Ok(self.players().read_all()?.len() as u64)
    }

    async fn register_player(&self, name: &str) -> Result<PlayerId, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }

        let relation = self.players();
        let existing = relation.read_all()?;
        let id = Self::next_id(&existing);

        relation.append(&Player::new(id, name.to_string()))?;
        info!("Registered player {} ({})", id, name);
        Ok(id)
    }

    async fn record_match(&self, winner: PlayerId, loser: PlayerId) -> Result<(), MatchWriteError> {
        let players = self.players().read_all().map_err(MatchWriteError::Store)?;
        validate_match(winner, loser, &players)?;

        self.matches()
            .append(&MatchRecord::new(winner, loser))
            .map_err(MatchWriteError::Store)?;
        info!("Recorded match: {} beat {}", winner, loser);
        Ok(())
    }

    async fn reset_matches(&self) -> Result<(), StoreError> {
        self.matches().truncate()
    }

    async fn reset_all(&self) -> Result<(), StoreError> {
        // Matches reference player ids; they must go first.
        self.matches().truncate()?;
        self.players().truncate()
    }

    async fn fetch_standings(&self) -> Result<Vec<Standing>, StoreError> {
        let players = self.players().read_all()?;
        let matches = self.matches().read_all()?;
        Ok(aggregate_standings(&players, &matches))
    }
}
