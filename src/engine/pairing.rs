//! Pairing engine: one Swiss round from the current standings.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{Bye, Pair, PairingRound, Standing};
use crate::store::{Store, StoreError};

use super::StandingsEngine;

/// What to do when the player count is odd.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByePolicy {
    /// Give the last-ranked unpaired player a bye, reported explicitly.
    #[default]
    Bye,

    /// Refuse to pair and fail with [`PairingError::OddPlayerCount`].
    Reject,
}

/// Errors from pairing generation.
#[derive(Debug, Error)]
pub enum PairingError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("cannot pair an odd number of players ({players}) under the reject policy")]
    OddPlayerCount { players: usize },
}

/// Generates the next round's pairing from a fresh ranking.
///
/// Adjacent entries in the win-sorted standings are paired: ranks 2k and
/// 2k+1 form pair k. Rematches are not avoided. Stateless per call, so
/// two calls without an intervening write yield identical rounds.
pub struct PairingEngine<'a, S: Store + ?Sized> {
    store: &'a S,
    bye_policy: ByePolicy,
}

impl<'a, S: Store + ?Sized> PairingEngine<'a, S> {
    pub fn new(store: &'a S, bye_policy: ByePolicy) -> Self {
        Self { store, bye_policy }
    }

    /// Pair all registered players for one round.
    pub async fn generate(&self) -> Result<PairingRound, PairingError> {
        let ranked = StandingsEngine::new(self.store).rank().await?;
        self.pair_ranked(ranked)
    }

    fn pair_ranked(&self, mut ranked: Vec<Standing>) -> Result<PairingRound, PairingError> {
        if ranked.len() % 2 != 0 {
            match self.bye_policy {
                ByePolicy::Reject => {
                    return Err(PairingError::OddPlayerCount {
                        players: ranked.len(),
                    })
                }
                ByePolicy::Bye => {}
            }
        }

        // Odd count under the bye policy: the last-ranked player sits out.
        let bye = if ranked.len() % 2 != 0 {
            let last = ranked.pop().unwrap();
            debug!("Bye goes to last-ranked player {} ({})", last.id, last.name);
            Some(Bye {
                player_id: last.id,
                player_name: last.name,
            })
        } else {
            None
        };

        let pairs = ranked
            .chunks_exact(2)
            .map(|adjacent| Pair {
                player1_id: adjacent[0].id,
                player1_name: adjacent[0].name.clone(),
                player2_id: adjacent[1].id,
                player2_name: adjacent[1].name.clone(),
            })
            .collect();

        Ok(PairingRound { pairs, bye })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;
    use crate::store::MemoryStore;
    use std::collections::BTreeSet;

    async fn register_n(store: &MemoryStore, n: usize) -> Vec<PlayerId> {
        let mut ids = Vec::new();
        for i in 0..n {
            ids.push(store.register_player(&format!("p{}", i + 1)).await.unwrap());
        }
        ids
    }

    #[tokio::test]
    async fn test_zero_players_yields_empty_round() {
        let store = MemoryStore::new();
        let round = PairingEngine::new(&store, ByePolicy::default())
            .generate()
            .await
            .unwrap();
        assert!(round.pairs.is_empty());
        assert!(round.bye.is_none());
    }

    #[tokio::test]
    async fn test_round_one_pairs_by_id() {
        let store = MemoryStore::new();
        let ids = register_n(&store, 4).await;

        let round = PairingEngine::new(&store, ByePolicy::default())
            .generate()
            .await
            .unwrap();

        assert_eq!(round.pairs.len(), 2);
        assert_eq!(round.pairs[0].player1_id, ids[0]);
        assert_eq!(round.pairs[0].player2_id, ids[1]);
        assert_eq!(round.pairs[1].player1_id, ids[2]);
        assert_eq!(round.pairs[1].player2_id, ids[3]);
    }

    #[tokio::test]
    async fn test_winners_meet_winners() {
        let store = MemoryStore::new();
        let ids = register_n(&store, 4).await;
        // A beats B, C beats D
        store.record_match(ids[0], ids[1]).await.unwrap();
        store.record_match(ids[2], ids[3]).await.unwrap();

        let round = PairingEngine::new(&store, ByePolicy::default())
            .generate()
            .await
            .unwrap();

        // Standings A, C, B, D: the winners pair up, the losers pair up
        assert_eq!(round.pairs[0].player1_id, ids[0]);
        assert_eq!(round.pairs[0].player2_id, ids[2]);
        assert_eq!(round.pairs[1].player1_id, ids[1]);
        assert_eq!(round.pairs[1].player2_id, ids[3]);
    }

    #[tokio::test]
    async fn test_every_player_appears_exactly_once() {
        let store = MemoryStore::new();
        let ids = register_n(&store, 8).await;
        store.record_match(ids[1], ids[6]).await.unwrap();
        store.record_match(ids[4], ids[0]).await.unwrap();

        let round = PairingEngine::new(&store, ByePolicy::default())
            .generate()
            .await
            .unwrap();

        let seen: BTreeSet<_> = round.player_ids().into_iter().collect();
        assert_eq!(round.player_ids().len(), 8);
        assert_eq!(seen.len(), 8);
    }

    #[tokio::test]
    async fn test_odd_count_bye_goes_to_last_ranked() {
        let store = MemoryStore::new();
        let ids = register_n(&store, 5).await;
        // p5 loses twice: last in the standings
        store.record_match(ids[0], ids[4]).await.unwrap();
        store.record_match(ids[1], ids[4]).await.unwrap();

        let round = PairingEngine::new(&store, ByePolicy::Bye)
            .generate()
            .await
            .unwrap();

        assert_eq!(round.pairs.len(), 2);
        let bye = round.bye.unwrap();
        assert_eq!(bye.player_id, ids[4]);
    }

    #[tokio::test]
    async fn test_odd_count_rejected_under_reject_policy() {
        let store = MemoryStore::new();
        register_n(&store, 3).await;

        let err = PairingEngine::new(&store, ByePolicy::Reject)
            .generate()
            .await
            .unwrap_err();
        assert!(matches!(err, PairingError::OddPlayerCount { players: 3 }));
    }

    #[tokio::test]
    async fn test_pairing_is_idempotent() {
        let store = MemoryStore::new();
        let ids = register_n(&store, 6).await;
        store.record_match(ids[2], ids[5]).await.unwrap();
        store.record_match(ids[2], ids[1]).await.unwrap();
        store.record_match(ids[4], ids[3]).await.unwrap();

        let engine = PairingEngine::new(&store, ByePolicy::default());
        let first = engine.generate().await.unwrap();
        let second = engine.generate().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_bye_policy_serde_names() {
        assert_eq!(serde_json::to_string(&ByePolicy::Bye).unwrap(), "\"bye\"");
        assert_eq!(
            serde_json::from_str::<ByePolicy>("\"reject\"").unwrap(),
            ByePolicy::Reject
        );
    }
}
