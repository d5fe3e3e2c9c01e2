use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    #[error("invalid sort spec: {0}")]
    InvalidSort(String),

    #[error("front matter parse error: {0}")]
    FrontMatter(String),
}
