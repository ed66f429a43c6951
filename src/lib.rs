pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod summary;
pub mod utils;

pub use error::SummaryError;
