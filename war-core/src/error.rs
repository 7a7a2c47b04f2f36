//! Error types for WAR

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Project error: {0}")]
    Project(String),

    #[error("Wav error: {0}")]
    Wav(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Key error: {0}")]
    Key(String),

    #[error("Note store full: {capacity} cells")]
    StoreFull { capacity: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
