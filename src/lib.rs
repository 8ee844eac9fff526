//! semgrep-search library
//!
//! Filters the semgrep-search rule database, writes semgrep rulesets and
//! runs semgrep. Runs can be shared as short base58 *run codes*, see
//! [`runconfig`].

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filters;
pub mod runconfig;
pub mod scanner;
pub mod utils;

pub use error::SgsError;
pub use runconfig::token::{decode, encode, RunSelection};
pub use runconfig::RunConfig;
