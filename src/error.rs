//! Error types for wikidump.
//!
//! Only failures that stop a run surface here. Malformed markup inside a page
//! never does: the affected field falls back to its default value.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open dump file {path:?}: {source}")]
    OpenDump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0:?} exists and is not a directory")]
    NotADirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
