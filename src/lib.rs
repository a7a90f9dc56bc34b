//! # Swisspair
//!
//! Standings and pairing core for a Swiss-system tournament.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, matches, standings, pairs)
//! - **store**: Store adapter (JSONL on disk, in-memory for tests)
//! - **engine**: Standings and pairing engines
//! - **tournament**: Public facade over store and engines
//! - **config**: Configuration loading and validation
//!
//! Data flows one way — store → standings → pairing — and control flows
//! the other: a pairing request pulls a fresh ranking, which pulls fresh
//! aggregates from the store. Nothing derived is ever cached.

pub mod config;
pub mod engine;
pub mod models;
pub mod store;
pub mod tournament;

pub use models::*;
pub use tournament::{Tournament, TournamentError};
