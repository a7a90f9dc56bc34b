//! Tournament facade: the public operations of the core.
//!
//! Wraps a [`Store`] and the two engines behind one entry point. Every
//! operation is a short request/response unit of work; each store
//! round-trip is bounded by the configured timeout and surfaces
//! [`StoreError::Timeout`] on expiry. Errors are never recovered
//! internally — each operation completes or fails outward with one
//! typed error, with no partial-success state.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::engine::{ByePolicy, PairingEngine, PairingError, StandingsEngine};
use crate::models::{PairingRound, PlayerId, Standing};
use crate::store::{InvalidMatchError, MatchWriteError, Store, StoreError};

/// Default bound on a single store round-trip.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(30);

/// Unified error for facade operations.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    InvalidMatch(#[from] InvalidMatchError),

    #[error(transparent)]
    Pairing(#[from] PairingError),
}

impl From<MatchWriteError> for TournamentError {
    fn from(err: MatchWriteError) -> Self {
        match err {
            MatchWriteError::Store(e) => TournamentError::Store(e),
            MatchWriteError::Invalid(e) => TournamentError::InvalidMatch(e),
        }
    }
}

/// A single Swiss-system tournament over one store.
pub struct Tournament<S: Store> {
    store: S,
    bye_policy: ByePolicy,
    op_timeout: Duration,
}

impl<S: Store> Tournament<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            bye_policy: ByePolicy::default(),
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    pub fn with_bye_policy(mut self, policy: ByePolicy) -> Self {
        self.bye_policy = policy;
        self
    }

    pub fn with_op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    /// Run one operation under the configured timeout bound.
    async fn bounded<T, E>(
        &self,
        fut: impl Future<Output = Result<T, E>>,
    ) -> Result<T, TournamentError>
    where
        TournamentError: From<E>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(TournamentError::from),
            Err(_) => Err(StoreError::Timeout(self.op_timeout).into()),
        }
    }

    /// Register a player by name and return the assigned id.
    pub async fn register_player(&self, name: &str) -> Result<PlayerId, TournamentError> {
        self.bounded(self.store.register_player(name)).await
    }

    /// Record the outcome of one match.
    pub async fn report_match(
        &self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<(), TournamentError> {
        self.bounded(self.store.record_match(winner, loser)).await
    }

    /// Number of currently registered players.
    pub async fn count_players(&self) -> Result<u64, TournamentError> {
        self.bounded(self.store.count_players()).await
    }

    /// Delete all match records.
    pub async fn reset_matches(&self) -> Result<(), TournamentError> {
        self.bounded(self.store.reset_matches()).await
    }

    /// Delete all match records, then all players.
    pub async fn reset_all(&self) -> Result<(), TournamentError> {
        self.bounded(self.store.reset_all()).await
    }

    /// The current ranking: wins descending, id ascending on ties.
    pub async fn standings(&self) -> Result<Vec<Standing>, TournamentError> {
        let engine = StandingsEngine::new(&self.store);
        let ranked = self.bounded(engine.rank()).await?;
        debug!("Standings computed for {} players", ranked.len());
        Ok(ranked)
    }

    /// Pair all players for the next round.
    pub async fn swiss_pairings(&self) -> Result<PairingRound, TournamentError> {
        let engine = PairingEngine::new(&self.store, self.bye_policy);
        self.bounded(engine.generate()).await
    }
}
