//! DeerPortal rules engine library.
//!
//! Exposes the board representation, move generation, landing effects, the
//! turn engine, and the headless protocol for use by integration tests and
//! the binary entry points.

pub mod board;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod eval;
pub mod event;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod selfplay;

/// Installs the stderr `tracing` subscriber used by the binaries.
///
/// `RUST_LOG` overrides `default_directive`.
pub fn init_tracing(default_directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
