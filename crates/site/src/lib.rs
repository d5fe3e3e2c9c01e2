// crates/site/src/lib.rs

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod router;
pub mod settings;
pub mod state;

pub use error::SiteError;
