//! Process-boundary errors.
//!
//! Rule violations during play are [`Rejection`](crate::event::Rejection)
//! values and never reach this type. `DeerPortalError` covers the failures
//! that end the process, each with its own exit code.

use std::any::Any;
use std::process::ExitCode;

use thiserror::Error;

use crate::config::ConfigError;
use crate::selfplay::SelfPlayError;

/// A fatal error, mapped to an exit code by the binaries.
#[derive(Debug, Error)]
pub enum DeerPortalError {
    /// Startup data (configuration) could not be loaded.
    #[error("failed to load game data: {0}")]
    AssetLoad(#[from] ConfigError),

    #[error("system resource failure: {0}")]
    SystemResource(#[from] std::io::Error),

    #[error("game error: {0}")]
    Game(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),

    #[error("unknown error")]
    Unknown,
}

impl DeerPortalError {
    /// Numeric process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            DeerPortalError::AssetLoad(_) => 1,
            DeerPortalError::SystemResource(_) => 2,
            DeerPortalError::Game(_) => 3,
            DeerPortalError::Unexpected(_) => 4,
            DeerPortalError::Unknown => 5,
        }
    }

    /// Converts a caught panic payload into an error, keeping its message
    /// when it has one.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        if let Some(msg) = payload.downcast_ref::<&str>() {
            return DeerPortalError::Unexpected((*msg).to_string());
        }
        match payload.downcast::<String>() {
            Ok(msg) => DeerPortalError::Unexpected(*msg),
            Err(_) => DeerPortalError::Unknown,
        }
    }
}

impl From<serde_json::Error> for DeerPortalError {
    fn from(e: serde_json::Error) -> Self {
        DeerPortalError::Game(e.to_string())
    }
}

impl From<SelfPlayError> for DeerPortalError {
    fn from(e: SelfPlayError) -> Self {
        match e {
            SelfPlayError::ThreadPool(e) => {
                DeerPortalError::SystemResource(std::io::Error::other(e.to_string()))
            }
            SelfPlayError::WorkerPanicked => {
                DeerPortalError::Unexpected("self-play worker thread panicked".to_string())
            }
            SelfPlayError::Config(e) => DeerPortalError::AssetLoad(e),
            SelfPlayError::Setup(rejection) => DeerPortalError::Game(rejection.to_string()),
        }
    }
}

impl From<&DeerPortalError> for ExitCode {
    fn from(e: &DeerPortalError) -> Self {
        ExitCode::from(e.exit_code())
    }
}
