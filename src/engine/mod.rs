//! Standings and pairing engines.
//!
//! Both engines are stateless, pure functions over a snapshot of store
//! state: they pull what they need per call and own no data beyond it.
//! Data flows store → standings → pairing; neither engine ever writes.

mod pairing;
mod standings;

pub use pairing::{ByePolicy, PairingEngine, PairingError};
pub use standings::StandingsEngine;
