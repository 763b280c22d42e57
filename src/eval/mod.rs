//! AI move choice and end-game scoring.

pub mod heuristic;
pub mod scoring;

pub use heuristic::choose_destination;
pub use scoring::{compute_results, GameResults, ResultRow};
