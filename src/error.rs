use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors of the catalog and of a measurement session.
///
/// [Usage errors][Error::is_usage] leave the session untouched and the call
/// can be retried correctly. The others come from the kernel and mean the
/// current operation did not happen.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown counter: {0}")]
    UnknownCounter(String),

    #[error("session is already running")]
    AlreadyRunning,

    #[error("session is not initialized")]
    NotInitialized,

    #[error("failed to open counter `{name}`")]
    HandleOpenFailed {
        name: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to enable counters")]
    EnableFailed(#[source] io::Error),

    #[error("failed to disable counters")]
    DisableFailed(#[source] io::Error),

    #[error("failed to read counter")]
    ReadFailed(#[source] io::Error),

    #[error("read {actual} bytes of counter record, expected {expected}")]
    ShortRead { expected: usize, actual: usize },
}

impl Error {
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::UnknownCounter(_) | Self::AlreadyRunning | Self::NotInitialized
        )
    }
}
