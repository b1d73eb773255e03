use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NsfillError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to list directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NsfillError>;
