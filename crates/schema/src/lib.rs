pub mod block;
pub mod catalog;
pub mod content_type;
pub mod doc;
pub mod field;
pub mod homepage;
pub mod registry;

mod error;

pub use error::SchemaError;
