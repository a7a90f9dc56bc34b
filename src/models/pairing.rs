//! Pairing output for one Swiss round.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// One pairing of two players for the next round.
///
/// Player 1 is the higher-standing member of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    /// Higher-standing player's id
    pub player1_id: PlayerId,

    /// Higher-standing player's name
    pub player1_name: String,

    /// Lower-standing player's id
    pub player2_id: PlayerId,

    /// Lower-standing player's name
    pub player2_name: String,
}

/// A bye: one round with no opponent.
///
/// Reported in the round output but never persisted as a match, so
/// standings are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bye {
    pub player_id: PlayerId,
    pub player_name: String,
}

/// The full pairing for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRound {
    /// Pairs in standings order (strongest pair first)
    pub pairs: Vec<Pair>,

    /// The odd player out, if the player count was odd
    pub bye: Option<Bye>,
}

impl PairingRound {
    /// All player ids covered by this round, pairs first, bye last.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        let mut ids = Vec::with_capacity(self.pairs.len() * 2 + 1);
        for pair in &self.pairs {
            ids.push(pair.player1_id);
            ids.push(pair.player2_id);
        }
        if let Some(bye) = &self.bye {
            ids.push(bye.player_id);
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u64, b: u64) -> Pair {
        Pair {
            player1_id: PlayerId::new(a),
            player1_name: format!("p{}", a),
            player2_id: PlayerId::new(b),
            player2_name: format!("p{}", b),
        }
    }

    #[test]
    fn test_player_ids_covers_pairs_and_bye() {
        let round = PairingRound {
            pairs: vec![pair(1, 2), pair(3, 4)],
            bye: Some(Bye {
                player_id: PlayerId::new(5),
                player_name: "p5".to_string(),
            }),
        };

        let ids: Vec<u64> = round.player_ids().iter().map(|id| id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_player_ids_empty_round() {
        let round = PairingRound {
            pairs: vec![],
            bye: None,
        };
        assert!(round.player_ids().is_empty());
    }

    #[test]
    fn test_round_serialization() {
        let round = PairingRound {
            pairs: vec![pair(1, 2)],
            bye: None,
        };
        let json = serde_json::to_string(&round).unwrap();
        let back: PairingRound = serde_json::from_str(&json).unwrap();
        assert_eq!(back, round);
    }
}
