//! # CLI Module
//!
//! This module defines the command-line interface for semgrep-search using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | Filter the rule database and write a ruleset |
//! | `run` | Run semgrep from a run code, a ruleset or filters |
//! | `code` | Print the run code for a selection, or decode one |
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `--settings <FILE>` - Path to a settings file
//! - `--database <FILE>` - Use a different rule database
//!
//! ## Examples
//!
//! ```bash
//! # Write all Python security rules to rules.yaml
//! semgrep-search search -l python -c security
//!
//! # Scan the current directory with them, writing text and SARIF reports
//! semgrep-search run -l python -c security --sarif
//!
//! # Repeat a run someone shared with you
//! semgrep-search run -C BnkVPW1xp1p ./src
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{CodeArgs, GenerateManArgs, RunArgs, SearchArgs};

/// semgrep-search - Search for semgrep rules and run them from a shareable code
#[derive(Parser, Debug)]
#[command(name = "semgrep-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to settings file
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Use a different location for the database
    #[arg(long, global = true, value_name = "FILE", env = "SEMGREP_SEARCH_DB")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for rules and generate a ruleset to use with semgrep
    Search(SearchArgs),

    /// Run either the specified run code or use the specified filters
    Run(RunArgs),

    /// Print the run code for a selection, or decode an existing one
    Code(CodeArgs),

    /// Generate man page (hidden, for packaging)
    #[command(hide = true)]
    GenerateMan(GenerateManArgs),
}
