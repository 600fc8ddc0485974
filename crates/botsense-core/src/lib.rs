pub mod config;
pub mod error;
pub mod types;

pub use config::BotsenseConfig;
pub use error::{BotsenseError, Result};
pub use types::*;
