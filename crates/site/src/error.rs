// crates/site/src/error.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use render::RenderError;
use std::{io, net::AddrParseError};
use store::StoreError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid bind address: {0}")]
    Addr(#[from] AddrParseError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("schema error: {0}")]
    Schema(#[from] schema::SchemaError),

    #[error("server error: {0}")]
    Server(#[from] anyhow::Error),
}

impl SiteError {
    /// Content-level misses render a 404 page inside the handlers; anything
    /// that escapes as a `SiteError` is a server fault.
    pub fn to_status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        error!("request failed: {self}");
        (self.to_status(), self.to_string()).into_response()
    }
}
