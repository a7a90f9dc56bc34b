//! Store adapter for durable player and match records.
//!
//! The engines never touch storage directly; they depend on the narrow
//! [`Store`] trait. Two implementations ship with the crate:
//! - [`JsonlStore`]: durable JSONL files under a data directory
//! - [`MemoryStore`]: in-memory, for tests and ephemeral runs
//!
//! Every operation is one scoped round-trip: acquire the backing
//! resource, execute, release before returning. No handle is held
//! across calls, on any exit path.

mod jsonl;
mod memory;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{MatchRecord, Player, PlayerId, Standing};

/// Errors from the backing store: transport, constraint, or timeout.
///
/// Never retried internally; always surfaced to the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty player name rejected")]
    EmptyName,

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),
}

/// A structurally invalid match report, caught before any row is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidMatchError {
    #[error("player {0} cannot play against themselves")]
    SelfPlay(PlayerId),

    #[error("player {0} is not registered")]
    UnknownPlayer(PlayerId),
}

/// Failure modes of [`Store::record_match`].
#[derive(Debug, Error)]
pub enum MatchWriteError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Invalid(#[from] InvalidMatchError),
}

/// Validate a match report against the set of registered players.
pub(crate) fn validate_match(
    winner: PlayerId,
    loser: PlayerId,
    players: &[Player],
) -> Result<(), InvalidMatchError> {
    if winner == loser {
        return Err(InvalidMatchError::SelfPlay(winner));
    }
    for id in [winner, loser] {
        if !players.iter().any(|p| p.id == id) {
            return Err(InvalidMatchError::UnknownPlayer(id));
        }
    }
    Ok(())
}

/// Aggregate raw standings from player and match tables.
///
/// Output order follows the player table and is not authoritative; the
/// standings engine owns the final ranking.
pub(crate) fn aggregate_standings(players: &[Player], matches: &[MatchRecord]) -> Vec<Standing> {
    players
        .iter()
        .map(|p| {
            let wins = matches.iter().filter(|m| m.winner == p.id).count() as u32;
            let played = matches.iter().filter(|m| m.involves(p.id)).count() as u32;
            Standing {
                id: p.id,
                name: p.name.clone(),
                wins,
                matches_played: played,
            }
        })
        .collect()
}

/// Durable record of players and match outcomes.
#[async_trait]
pub trait Store: Send + Sync {
    /// Number of currently registered players.
    async fn count_players(&self) -> Result<u64, StoreError>;

    /// Insert a new player and return the assigned id.
    async fn register_player(&self, name: &str) -> Result<PlayerId, StoreError>;

    /// Insert a match row after structural validation.
    async fn record_match(&self, winner: PlayerId, loser: PlayerId) -> Result<(), MatchWriteError>;

    /// Delete all match rows.
    async fn reset_matches(&self) -> Result<(), StoreError>;

    /// Delete all match rows, then all player rows (matches reference
    /// player ids, so they go first).
    async fn reset_all(&self) -> Result<(), StoreError>;

    /// Raw per-player aggregates backing the standings engine.
    async fn fetch_standings(&self) -> Result<Vec<Standing>, StoreError>;
}

/// Filesystem layout for the JSONL store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join("players.jsonl")
    }

    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join("matches.jsonl")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
