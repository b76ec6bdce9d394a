pub mod cli;
pub mod config;
pub mod error;
pub mod logic;
pub mod resolve;
pub mod ssh;
pub mod utils;

pub use config::{ServerConfig, ServerEnvironment, ServerList};
pub use error::{Error, Result};
