//! Run command - Run semgrep with a run code, a ruleset or filters
//!
//! The run is configured from, in order of precedence: a pre-generated
//! ruleset (`--rules`), a run code (`--config`), or the filter flags.

use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::{debug, error, info};

use super::{report_no_rules, Context, RunArgs};
use crate::cli::exit_codes;
use crate::cli::output::{RulesetRenderer, TerminalOutput, YamlRuleset};
use crate::error::{RunError, SgsError};
use crate::filters::filter_rules;
use crate::runconfig::{RunConfig, DEFAULT_OUTPUT, STDOUT};
use crate::scanner::Scanner;
use crate::utils::absolute_path;

/// Prefix of generated ruleset files
const RULES_FILE_PREFIX: &str = "semgrep-search-";

/// Build the run configuration from the arguments and settings
pub fn build_config(args: &RunArgs, ctx: &Context) -> Result<RunConfig, SgsError> {
    let features = args.outputs.features();

    let mut config = if let Some(rules) = &args.rules {
        RunConfig::from_rules_file(rules, &features)?
    } else if let Some(code) = &args.config {
        RunConfig::from_code(code)?
    } else {
        RunConfig::from_filter(args.filters.to_filter_config(), &features)
    };

    config.binary = args
        .binary
        .clone()
        .or_else(|| ctx.settings.scanner.binary.clone());

    let output = args
        .output
        .clone()
        .or_else(|| ctx.settings.output.clone())
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    config.output = if output == STDOUT {
        output
    } else {
        absolute_path(Path::new(&output)).display().to_string()
    };

    if let Some(target) = &args.target {
        config.target = target.clone();
    }
    config.keep_rules_file |= args.keep_rules_file || ctx.settings.keep_rules_file;
    config.extra_args = ctx.settings.scanner.args.clone();

    Ok(config)
}

/// Refuse to overwrite existing reports unless forced
fn check_existing_outputs(config: &RunConfig, force: bool) -> Result<(), RunError> {
    if force || config.output == STDOUT {
        return Ok(());
    }
    for feature in config.features() {
        let path = config.report_path(feature);
        if Path::new(&path).exists() {
            return Err(RunError::OutputExists { path });
        }
    }
    Ok(())
}

/// Write `rendered` to a new `semgrep-search-*.yaml` file in `dir`.
///
/// The returned handle deletes the file on drop; with `keep` the file is
/// persisted and no handle is returned.
fn write_rules_file(
    rendered: &str,
    dir: &Path,
    keep: bool,
) -> Result<(PathBuf, Option<tempfile::NamedTempFile>), RunError> {
    let write_error = |path: &Path, e: std::io::Error| RunError::FileWrite {
        path: path.display().to_string(),
        source: e,
    };

    let mut file = tempfile::Builder::new()
        .prefix(RULES_FILE_PREFIX)
        .suffix(".yaml")
        .tempfile_in(dir)
        .map_err(|e| write_error(dir, e))?;
    file.write_all(rendered.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| write_error(file.path(), e))?;

    if keep {
        let (_, path) = file.keep().map_err(|e| write_error(e.file.path(), e.error))?;
        info!("Keeping rules file {}", path.display());
        Ok((path, None))
    } else {
        Ok((file.path().to_path_buf(), Some(file)))
    }
}

/// Write the filtered ruleset to a temporary file.
///
/// Returns `None` when no rule matches.
fn write_ruleset(
    config: &RunConfig,
    ctx: &Context,
) -> Result<Option<(PathBuf, Option<tempfile::NamedTempFile>)>, SgsError> {
    let database = ctx.load_database()?;
    let rules = filter_rules(database.rules(), &config.filter);
    if rules.is_empty() {
        return Ok(None);
    }

    let rendered = YamlRuleset::new().render_ruleset(&rules)?;
    let (path, guard) =
        write_rules_file(&rendered, &std::env::temp_dir(), config.keep_rules_file)?;

    eprintln!(
        "{} Successfully written {} rules to {}",
        "Success:".green().bold(),
        rules.len(),
        path.display().to_string().cyan()
    );

    Ok(Some((path, guard)))
}

/// Execute the run command
///
/// # Returns
///
/// `SUCCESS` when semgrep exits cleanly (or nothing matched), otherwise
/// `SCANNER_FAILED`.
pub async fn execute(args: RunArgs, ctx: &Context) -> Result<i32, SgsError> {
    let config = build_config(&args, ctx)?;
    debug!("Run configuration: {:?}", config);

    config.validate_output()?;
    check_existing_outputs(&config, args.force)?;

    let scanner = Scanner::locate(config.binary.as_deref())?;

    if !config.from_code {
        eprintln!("{}", TerminalOutput::new().format_hint(&config.to_code()?));
    }

    // The temp file guard has to outlive the scanner run.
    let (rules_file, _guard) = match &config.rules_file {
        Some(path) => (absolute_path(path), None),
        None => match write_ruleset(&config, ctx)? {
            Some(written) => written,
            None => {
                report_no_rules();
                return Ok(exit_codes::SUCCESS);
            }
        },
    };

    let code = scanner.run(&config, &rules_file).await?;
    if code != 0 {
        error!("semgrep returned non-zero exit code: {}", code);
        return Ok(exit_codes::SCANNER_FAILED);
    }

    Ok(exit_codes::SUCCESS)
}
