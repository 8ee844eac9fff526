//! Exit codes for the CLI
//!
//! # Exit Code Reference
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Ruleset written, scan completed |
//! | 1 | `ERROR` | Runtime error | Database missing, file not writable |
//! | 2 | `SCANNER_FAILED` | Scanner exited non-zero | semgrep reported an error |
//! | 3 | `INVALID_ARGS` | Invalid arguments | Malformed run code, two formats to stdout |
//! | 4 | `SCANNER_UNAVAILABLE` | Scanner unusable | semgrep not in PATH, not executable |

use crate::error::{CodeError, RunError, SgsError};

/// Command completed normally
pub const SUCCESS: i32 = 0;

/// Runtime error (database missing, file system errors, ...)
pub const ERROR: i32 = 1;

/// The scanner ran but exited with a non-zero code
pub const SCANNER_FAILED: i32 = 2;

/// Invalid arguments (malformed run code, bad output combination, ...)
pub const INVALID_ARGS: i32 = 3;

/// The scanner binary could not be found or is not executable
pub const SCANNER_UNAVAILABLE: i32 = 4;

/// Exit code for a failed command
pub fn for_error(err: &SgsError) -> i32 {
    match err {
        SgsError::Code(CodeError::MalformedToken { .. })
        | SgsError::Code(CodeError::EmptyTrimmedSelection { .. }) => INVALID_ARGS,
        SgsError::Run(RunError::StdoutFormats { .. })
        | SgsError::Run(RunError::RulesFile { .. })
        | SgsError::Run(RunError::OutputExists { .. }) => INVALID_ARGS,
        SgsError::Run(RunError::BinaryNotFound { .. })
        | SgsError::Run(RunError::BinaryNotAFile { .. })
        | SgsError::Run(RunError::BinaryNotExecutable { .. }) => SCANNER_UNAVAILABLE,
        _ => ERROR,
    }
}
