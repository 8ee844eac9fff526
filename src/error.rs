//! Error types for semgrep-search
//!
//! This module defines custom error types using `thiserror`. Each area of the
//! tool (run codes, settings, the rule database, scanner runs) has its own
//! enum, and [`SgsError`] wraps them for the command layer.

use thiserror::Error;

/// Main error type for semgrep-search
#[derive(Error, Debug)]
pub enum SgsError {
    /// Run code errors
    #[error("Run code error: {0}")]
    Code(#[from] CodeError),

    /// Settings errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule database errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Scanner run errors
    #[error("Run error: {0}")]
    Run(#[from] RunError),
}

/// Errors raised by the run code codec
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// The token is not valid base58
    #[error("Malformed run code '{token}': {reason}")]
    MalformedToken {
        /// The offending token
        token: String,
        /// Why decoding failed
        reason: String,
    },

    /// A trimmed encoding was requested for a field with nothing selected
    #[error("Cannot trim the '{field}' field: nothing is selected")]
    EmptyTrimmedSelection {
        /// Name of the field
        field: &'static str,
    },
}

/// Errors that occur while loading or writing settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the settings file
    #[error("Failed to read settings file '{path}': {source}")]
    FileRead {
        /// Path to the settings file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse the settings file
    #[error("Failed to parse settings: {message}")]
    Parse {
        /// Parser message
        message: String,
    },

    /// Failed to serialize settings or generated documents
    #[error("Failed to serialize: {message}")]
    Serialize {
        /// Serializer message
        message: String,
    },
}

/// Errors that occur while reading the rule database
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// No database at the expected location
    #[error("No rule database found at '{path}'")]
    NotFound {
        /// Expected location
        path: String,
    },

    /// Failed to read the database file
    #[error("Failed to read database '{path}': {source}")]
    FileRead {
        /// Path to the database
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The database is not valid JSON or has an unexpected layout
    #[error("Malformed database: {message}")]
    Malformed {
        /// Parser message
        message: String,
    },

    /// A rule's content could not be turned into a ruleset entry
    #[error("Rule '{id}' has invalid content: {reason}")]
    InvalidRule {
        /// Rule id
        id: String,
        /// What was wrong
        reason: String,
    },
}

/// Errors that occur while preparing or running the scanner
#[derive(Error, Debug)]
pub enum RunError {
    /// No scanner binary could be located
    #[error("Unable to find {name}. Make sure it is within your PATH or specify the location directly")]
    BinaryNotFound {
        /// Binary name that was searched for
        name: String,
    },

    /// The configured scanner path is not a regular file
    #[error("Provided path to the scanner is not a valid file: {path}")]
    BinaryNotAFile {
        /// Configured path
        path: String,
    },

    /// The configured scanner is not executable
    #[error("Provided scanner file is not executable: {path}")]
    BinaryNotExecutable {
        /// Configured path
        path: String,
    },

    /// The given rules file cannot be used
    #[error("Rules file '{path}': {reason}")]
    RulesFile {
        /// Path to the rules file
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// Writing to stdout requires exactly one output format
    #[error("When outputting to stdout, exactly one output format must be selected (got {selected})")]
    StdoutFormats {
        /// Number of formats selected
        selected: usize,
    },

    /// An output file exists and overwriting was not requested
    #[error("Output file '{path}' already exists (use --force to overwrite)")]
    OutputExists {
        /// Existing file
        path: String,
    },

    /// Failed to write a file
    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        /// Destination path
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The scanner process could not be started
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

impl From<toml::de::Error> for SgsError {
    fn from(err: toml::de::Error) -> Self {
        SgsError::Config(ConfigError::Parse {
            message: err.to_string(),
        })
    }
}

impl From<serde_json::Error> for SgsError {
    fn from(err: serde_json::Error) -> Self {
        SgsError::Database(DatabaseError::Malformed {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for SgsError {
    fn from(err: serde_yaml::Error) -> Self {
        SgsError::Config(ConfigError::Serialize {
            message: err.to_string(),
        })
    }
}
