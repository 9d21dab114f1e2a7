//! Option Storage Error Types

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid option name: {0:?}")]
    InvalidName(String),

    #[error("Option {name} is not a valid option blob")]
    NotABlob { name: String },
}

pub type Result<T> = std::result::Result<T, OptionsError>;
