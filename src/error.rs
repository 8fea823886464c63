//! Error types for steak configuration and the cook log

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SteakError {
    #[error("steak thickness must be positive, got {0} mm")]
    InvalidThickness(u32),

    #[error("unknown doneness level: {0:?}")]
    UnknownDoneness(String),

    #[error("failed to access cook log {path}")]
    HistoryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed cook log {path}")]
    HistoryCsv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
