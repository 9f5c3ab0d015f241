use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashgenError {
    #[error("failed to create output directory '{}': {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model response contained no choices")]
    EmptyResponse,

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("topic '{topic}' maps to '{file_name}', already written by '{first_topic}'")]
    FilenameCollision {
        topic: String,
        first_topic: String,
        file_name: String,
    },

    #[error("topic '{0}' has no ASCII letters or digits to build a file name from")]
    EmptyFilename(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{} is not a valid directory.", .0.display())]
    NotADirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, FlashgenError>;
