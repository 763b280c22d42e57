//! Headless line protocol.
//!
//! A text protocol over stdin/stdout that stands in for a graphical front
//! end: commands map onto engine inputs, and the engine's notifications and
//! state snapshots are written back as JSON.

pub mod parser;
pub mod snapshot;

pub use parser::{parse_command, try_parse_command, Command, CommandError};
pub use snapshot::{PileView, Snapshot, TokenView};
