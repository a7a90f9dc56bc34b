//! Match outcome records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// The recorded outcome of a single match.
///
/// Immutable once written: there is no update operation, and no draw
/// result — every match has exactly one winner and one loser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Winner's player id
    pub winner: PlayerId,

    /// Loser's player id
    pub loser: PlayerId,

    /// When this outcome was reported
    pub reported_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(winner: PlayerId, loser: PlayerId) -> Self {
        Self {
            winner,
            loser,
            reported_at: Utc::now(),
        }
    }

    /// Whether the given player took part in this match.
    pub fn involves(&self, id: PlayerId) -> bool {
        self.winner == id || self.loser == id
    }
}
