pub mod config;
pub mod course;
pub mod document;
pub mod error;

pub use config::Config;
pub use course::*;
pub use document::*;
pub use error::*;
