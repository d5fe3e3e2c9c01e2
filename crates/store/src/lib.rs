pub mod client;
pub mod dataset;
pub mod query;
pub mod store;

mod error;

pub use error::StoreError;
