//! In-memory store for tests and ephemeral runs.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{MatchRecord, Player, PlayerId, Standing};

use super::{aggregate_standings, validate_match, MatchWriteError, Store, StoreError};

#[derive(Default)]
struct Tables {
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
    last_id: u64,
}

/// A [`Store`] holding both relations in memory behind one lock.
///
/// Ids stay monotonic across resets within the process, matching the
/// never-reused guarantee of the durable adapter.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn count_players(&self) -> Result<u64, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.players.len() as u64)
    }

    async fn register_player(&self, name: &str) -> Result<PlayerId, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }

        let mut tables = self.tables.lock().unwrap();
        tables.last_id += 1;
        let id = PlayerId::new(tables.last_id);
        tables.players.push(Player::new(id, name.to_string()));
        Ok(id)
    }

    async fn record_match(&self, winner: PlayerId, loser: PlayerId) -> Result<(), MatchWriteError> {
        let mut tables = self.tables.lock().unwrap();
        validate_match(winner, loser, &tables.players)?;
        tables.matches.push(MatchRecord::new(winner, loser));
        Ok(())
    }

    async fn reset_matches(&self) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.matches.clear();
        Ok(())
    }

    async fn reset_all(&self) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        tables.matches.clear();
        tables.players.clear();
        Ok(())
    }

    async fn fetch_standings(&self) -> Result<Vec<Standing>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(aggregate_standings(&tables.players, &tables.matches))
    }
}
