pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod sanitize;
pub mod tools;

pub use config::Config;
pub use error::{FlashgenError, Result};
