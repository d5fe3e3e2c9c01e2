pub mod blocks;
pub mod template;
pub mod view;

mod error;

pub use error::RenderError;
