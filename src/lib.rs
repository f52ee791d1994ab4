pub use crate::errors::SqltestError;

pub mod cli;
pub mod diff;
pub mod discovery;
pub mod engine;
pub mod errors;
pub mod process;
pub mod provision;
pub mod runner;
