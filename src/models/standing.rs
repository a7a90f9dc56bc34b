//! Derived standings.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A player's aggregated record.
///
/// Derived, never persisted or cached: standings are recomputed from the
/// player and match tables on every request so a pairing decision always
/// reflects every match reported so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Player id
    pub id: PlayerId,

    /// Player name (as registered)
    pub name: String,

    /// Matches won
    pub wins: u32,

    /// Matches played (won or lost)
    pub matches_played: u32,
}

impl Standing {
    /// A fresh standing for a player with no matches yet.
    pub fn unplayed(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            wins: 0,
            matches_played: 0,
        }
    }
}
