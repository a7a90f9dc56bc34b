//! Standings engine: the authoritative ranking over players.

use tracing::debug;

use crate::models::Standing;
use crate::store::{Store, StoreError};

/// Computes the total order over players.
///
/// Primary key: wins, descending. Tie-break: player id, ascending —
/// the store's row order is not stable, so the deterministic secondary
/// key lives here and makes pairing reproducible.
pub struct StandingsEngine<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> StandingsEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Rank all registered players. Store errors propagate untouched.
    pub async fn rank(&self) -> Result<Vec<Standing>, StoreError> {
        let mut standings = self.store.fetch_standings().await?;
        standings.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.id.cmp(&b.id)));
        debug!("Ranked {} players", standings.len());
        Ok(standings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_rank_orders_by_wins_desc() {
        let store = MemoryStore::new();
        let a = store.register_player("Ada").await.unwrap();
        let b = store.register_player("Bea").await.unwrap();
        let c = store.register_player("Cal").await.unwrap();
        store.record_match(b, a).await.unwrap();
        store.record_match(b, c).await.unwrap();
        store.record_match(c, a).await.unwrap();

        let ranked = StandingsEngine::new(&store).rank().await.unwrap();
        let ids: Vec<_> = ranked.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b, c, a]);
    }

    #[tokio::test]
    async fn test_rank_ties_break_by_id_ascending() {
        let store = MemoryStore::new();
        let a = store.register_player("Ada").await.unwrap();
        let b = store.register_player("Bea").await.unwrap();
        let c = store.register_player("Cal").await.unwrap();
        let d = store.register_player("Dee").await.unwrap();
        // a and c tied at 1 win, b and d tied at 0
        store.record_match(a, b).await.unwrap();
        store.record_match(c, d).await.unwrap();

        let ranked = StandingsEngine::new(&store).rank().await.unwrap();
        let ids: Vec<_> = ranked.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, c, b, d]);
    }

    #[tokio::test]
    async fn test_rank_monotone_in_wins() {
        let store = MemoryStore::new();
        let ids: Vec<_> = {
            let mut v = Vec::new();
            for name in ["p1", "p2", "p3", "p4", "p5", "p6"] {
                v.push(store.register_player(name).await.unwrap());
            }
            v
        };
        store.record_match(ids[3], ids[0]).await.unwrap();
        store.record_match(ids[3], ids[1]).await.unwrap();
        store.record_match(ids[5], ids[2]).await.unwrap();

        let ranked = StandingsEngine::new(&store).rank().await.unwrap();
        for pair in ranked.windows(2) {
            assert!(pair[0].wins >= pair[1].wins);
        }
    }

    #[tokio::test]
    async fn test_rank_empty_store() {
        let store = MemoryStore::new();
        let ranked = StandingsEngine::new(&store).rank().await.unwrap();
        assert!(ranked.is_empty());
    }
}
