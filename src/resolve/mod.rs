//! Rules resolution.
//!
//! Applies landing effects to the shared game context and sequences the
//! engine's phases and rounds.

pub mod field;
pub mod phase;

pub use field::CommandProcessor;
pub use phase::{next_round, transition, GamePhase, Trigger};
