// crates/render/src/error.rs

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("template error: {0}")]
    Template(String),

    #[error("handlebars error: {0}")]
    Handlebars(#[from] handlebars::RenderError),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

impl From<handlebars::TemplateError> for RenderError {
    fn from(e: handlebars::TemplateError) -> Self {
        RenderError::Template(e.to_string())
    }
}
