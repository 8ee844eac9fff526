//! CLI commands module

pub mod code;
pub mod generate_man;
pub mod run;
pub mod search;

use clap::builder::PossibleValuesParser;
use clap::Args;
use colored::Colorize;
use semver::Version;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cli::output::TerminalOutput;
use crate::config::Settings;
use crate::database::Database;
use crate::error::SgsError;
use crate::filters::{FilterConfig, CATEGORY_CHOICES, SEVERITY_CHOICES};
use crate::runconfig::OutputFeature;
use crate::utils::timing::Timer;

/// State shared by all commands: settings and global flags
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Loaded settings file
    pub settings: Settings,
    /// Database location given on the command line
    pub database: Option<PathBuf>,
}

impl Context {
    /// Load the rule database and report its provenance on stderr
    pub fn load_database(&self) -> Result<Database, SgsError> {
        let path = self.settings.database_path(self.database.as_deref());
        let timer = Timer::start();
        let database = Database::load(&path)?;
        info!("Loaded database in {}", timer.elapsed_human());

        if let Some(meta) = database.metadata() {
            eprintln!("{}", TerminalOutput::new().format_database_info(meta));
        }
        match Version::parse(env!("CARGO_PKG_VERSION")) {
            Ok(current) => database.check_compatibility(&current),
            Err(e) => debug!("Cannot parse own version: {}", e),
        }

        Ok(database)
    }
}

/// Rule filter flags shared by `search`, `run` and `code`
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// The language(s) to filter for. Separate multiple languages with comma or repeat the flag
    #[arg(short = 'l', long = "language", value_name = "LANGUAGE")]
    pub languages: Vec<String>,

    /// The category(/ies) to filter for. Repeat the flag for multiple categories
    #[arg(
        short = 'c',
        long = "category",
        value_name = "CATEGORY",
        value_parser = PossibleValuesParser::new(CATEGORY_CHOICES.iter().copied())
    )]
    pub categories: Vec<String>,

    /// The severity(/ies) to filter for. Repeat the flag for multiple severities
    #[arg(
        short = 's',
        long = "severity",
        value_name = "SEVERITY",
        value_parser = PossibleValuesParser::new(SEVERITY_CHOICES.iter().copied())
    )]
    pub severities: Vec<String>,

    /// The origin(s) to select rules from. Separate multiple origins with comma or repeat the flag
    #[arg(short = 'o', long = "origin", value_name = "ORIGIN")]
    pub origins: Vec<String>,

    /// Include rules that do not specify a selected filter at all
    #[arg(short = 'e', long)]
    pub include_empty: bool,
}

impl FilterArgs {
    /// Build the rule filter described by these flags
    pub fn to_filter_config(&self) -> FilterConfig {
        FilterConfig::from_args(
            &self.languages,
            &self.categories,
            &self.severities,
            &self.origins,
            self.include_empty,
        )
    }
}

/// Report format flags shared by `run` and `code`
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Do not output a text file (text output is on by default)
    #[arg(long)]
    pub no_text: bool,

    /// Output a JSON file
    #[arg(long)]
    pub json: bool,

    /// Output a SARIF file
    #[arg(long)]
    pub sarif: bool,

    /// Output all available file formats
    #[arg(long, conflicts_with = "no_text")]
    pub all: bool,
}

impl OutputArgs {
    /// Selected report formats
    pub fn features(&self) -> Vec<OutputFeature> {
        OutputFeature::ALL
            .into_iter()
            .filter(|feature| match feature {
                OutputFeature::Text => !self.no_text,
                OutputFeature::Json => self.all || self.json,
                OutputFeature::Sarif => self.all || self.sarif,
            })
            .collect()
    }
}

/// Print the "nothing matched" notice used by `search` and `run`
fn report_no_rules() {
    eprintln!(
        "{} No rules found matching your search criteria",
        "Info:".blue()
    );
}

/// Output format for the code command
#[derive(Debug, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum CodeFormat {
    Terminal,
    Json,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output file that contains all matched rules (- for stdout)
    #[arg(short = 'O', long, default_value = "rules.yaml", value_name = "FILE")]
    pub output: String,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub outputs: OutputArgs,

    /// Pre-generated set of rules to run semgrep with
    #[arg(short = 'R', long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// The run code
    #[arg(short = 'C', long, value_name = "CODE")]
    pub config: Option<String>,

    /// The target to run semgrep against (defaults to the working directory)
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Path to the semgrep binary (defaults to searching for "semgrep" in PATH)
    #[arg(short = 'b', long, value_name = "PATH")]
    pub binary: Option<PathBuf>,

    /// Keep the temporary file containing the rules
    #[arg(long)]
    pub keep_rules_file: bool,

    /// Output base filename (use - for stdout)
    #[arg(short = 'O', long, value_name = "BASE")]
    pub output: Option<String>,

    /// Overwrite existing output file(s)
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for the code command
#[derive(Args, Debug)]
pub struct CodeArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub outputs: OutputArgs,

    /// Decode this run code instead of building one
    #[arg(long, value_name = "CODE")]
    pub decode: Option<String>,

    /// Only emit as many bytes per field as the selection needs
    #[arg(long, conflicts_with = "decode")]
    pub trim: bool,

    /// Output format
    #[arg(short = 'F', long, default_value = "terminal")]
    pub format: CodeFormat,
}

/// Arguments for the generate-man command
#[derive(Args, Debug)]
pub struct GenerateManArgs {
    /// Output directory for the man page
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs(no_text: bool, json: bool, sarif: bool, all: bool) -> OutputArgs {
        OutputArgs {
            no_text,
            json,
            sarif,
            all,
        }
    }

    #[test]
    fn test_default_output_is_text() {
        assert_eq!(
            outputs(false, false, false, false).features(),
            vec![OutputFeature::Text]
        );
    }

    #[test]
    fn test_output_flags() {
        assert_eq!(
            outputs(true, true, false, false).features(),
            vec![OutputFeature::Json]
        );
        assert_eq!(
            outputs(false, false, false, true).features(),
            OutputFeature::ALL.to_vec()
        );
        assert!(outputs(true, false, false, false).features().is_empty());
    }

    #[test]
    fn test_filter_args_to_config() {
        let args = FilterArgs {
            languages: vec!["golang".to_string()],
            severities: vec!["ERROR".to_string()],
            ..Default::default()
        };
        let filter = args.to_filter_config();
        assert!(filter.languages.unwrap().contains("go"));
        assert!(filter.severities.unwrap().contains("ERROR"));
        assert!(filter.categories.is_none());
    }
}
