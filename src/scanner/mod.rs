//! Scanner module - Locating and running semgrep
//!
//! The scanner is an external program. It is either given explicitly (flag
//! or settings) and then has to be an executable file, or looked up as
//! `semgrep` in `PATH`. Its output streams are passed straight through.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::RunError;
use crate::runconfig::RunConfig;
use crate::utils::permissions::is_executable;
use crate::utils::timing::Timer;

/// Scanner looked up in PATH when no binary is configured
pub const DEFAULT_BINARY: &str = "semgrep";

/// Arguments passed on every invocation
pub const BASE_ARGS: &[&str] = &[
    "--disable-version-check",
    "--metrics=off",
    "--disable-nosem",
];

/// A located scanner binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanner {
    binary: PathBuf,
}

impl Scanner {
    /// Use `explicit` if given, otherwise search PATH for [`DEFAULT_BINARY`]
    pub fn locate(explicit: Option<&Path>) -> Result<Self, RunError> {
        let binary = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(RunError::BinaryNotAFile {
                        path: path.display().to_string(),
                    });
                }
                if !is_executable(path) {
                    return Err(RunError::BinaryNotExecutable {
                        path: path.display().to_string(),
                    });
                }
                path.to_path_buf()
            }
            None => which::which(DEFAULT_BINARY).map_err(|_| RunError::BinaryNotFound {
                name: DEFAULT_BINARY.to_string(),
            })?,
        };

        debug!("Using scanner at {}", binary.display());
        Ok(Self { binary })
    }

    /// Full argument list for scanning with `rules_file`
    pub fn args(&self, config: &RunConfig, rules_file: &Path) -> Vec<String> {
        let mut args: Vec<String> = BASE_ARGS.iter().map(|a| a.to_string()).collect();
        args.push("--config".to_string());
        args.push(rules_file.display().to_string());
        args.extend(config.output_params());
        args.extend(config.extra_args.iter().cloned());
        args
    }

    /// Run the scanner in the config's target directory and return its exit code
    pub async fn run(&self, config: &RunConfig, rules_file: &Path) -> Result<i32, RunError> {
        let args = self.args(config, rules_file);
        debug!("Running {} {}", self.binary.display(), args.join(" "));

        let timer = Timer::start();
        let status = Command::new(&self.binary)
            .args(&args)
            .current_dir(&config.target)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| RunError::Spawn {
                program: self.binary.display().to_string(),
                source: e,
            })?;

        let code = status.code().unwrap_or(-1);
        info!("Scanner finished in {} (exit code {})", timer.elapsed_human(), code);
        Ok(code)
    }
}
