//! # Run configuration
//!
//! A [`RunConfig`] describes one scanner run: which rules to select, which
//! report formats to write and where. The rule selection and formats can be
//! packed into a short base58 *run code* and shared, so that
//! `semgrep-search run -C <code>` reproduces the same run.
//!
//! ## Submodules
//!
//! - [`table`] - fixed name tables for each field of a run code
//! - [`field`] - bitmap groups with continuation-bit framing
//! - [`token`] - composition of the four groups and base58 rendering

pub mod field;
pub mod table;
pub mod token;

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CodeError, RunError};
use crate::filters::FilterConfig;
use token::RunSelection;

/// Default output base name
pub const DEFAULT_OUTPUT: &str = "sgs";

/// Output base name that sends the report to stdout
pub const STDOUT: &str = "-";

/// Report formats the scanner can write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFeature {
    Text,
    Json,
    Sarif,
}

impl OutputFeature {
    /// All formats, in the order their scanner flags are emitted
    pub const ALL: [OutputFeature; 3] = [
        OutputFeature::Text,
        OutputFeature::Json,
        OutputFeature::Sarif,
    ];

    /// Name of the feature in the run code table
    pub fn name(self) -> &'static str {
        match self {
            OutputFeature::Text => "export_text",
            OutputFeature::Json => "export_json",
            OutputFeature::Sarif => "export_sarif",
        }
    }

    /// Scanner flag selecting this format
    pub fn flag(self) -> &'static str {
        match self {
            OutputFeature::Text => "--text-output",
            OutputFeature::Json => "--json-output",
            OutputFeature::Sarif => "--sarif-output",
        }
    }

    /// File extension of the report
    pub fn extension(self) -> &'static str {
        match self {
            OutputFeature::Text => "txt",
            OutputFeature::Json => "json",
            OutputFeature::Sarif => "sarif",
        }
    }
}

/// Everything needed to run the scanner once
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Encodable part of the run
    pub selection: RunSelection,
    /// Rule filter applied to the database
    pub filter: FilterConfig,
    /// Scanner binary, `None` to search PATH
    pub binary: Option<PathBuf>,
    /// Output base name, [`STDOUT`] for stdout
    pub output: String,
    /// Directory the scanner runs in
    pub target: PathBuf,
    /// Whether the run was given as a code or ruleset (no hint is printed)
    pub from_code: bool,
    /// Pre-generated ruleset, skips the database
    pub rules_file: Option<PathBuf>,
    /// Keep the generated ruleset after the run
    pub keep_rules_file: bool,
    /// Extra scanner arguments
    pub extra_args: Vec<String>,
}

impl RunConfig {
    fn with_selection(selection: RunSelection, filter: FilterConfig) -> Self {
        Self {
            selection,
            filter,
            binary: None,
            output: DEFAULT_OUTPUT.to_string(),
            target: PathBuf::from("."),
            from_code: false,
            rules_file: None,
            keep_rules_file: false,
            extra_args: Vec::new(),
        }
    }

    /// Build a run from a filter and the requested report formats
    pub fn from_filter(filter: FilterConfig, features: &[OutputFeature]) -> Self {
        if filter.origins.is_some() || filter.include_empty {
            debug!("Origin and include-empty filters are not part of the run code");
        }

        let selection = RunSelection {
            categories: filter.categories.clone().unwrap_or_default(),
            languages: filter.languages.clone().unwrap_or_default(),
            severities: filter.severities.clone().unwrap_or_default(),
            features: features.iter().map(|f| f.name().to_string()).collect(),
        };
        Self::with_selection(selection, filter)
    }

    /// Build a run from a run code
    pub fn from_code(code: &str) -> Result<Self, CodeError> {
        let selection = token::decode(code)?;
        debug!("Decoded run code {} into {:?}", code, selection);
        let filter = FilterConfig::from_selection(&selection);
        let mut config = Self::with_selection(selection, filter);
        config.from_code = true;
        Ok(config)
    }

    /// Build a run that uses a pre-generated ruleset
    pub fn from_rules_file(path: &Path, features: &[OutputFeature]) -> Result<Self, RunError> {
        let reject = |reason: &str| RunError::RulesFile {
            path: path.display().to_string(),
            reason: reason.to_string(),
        };

        if !path.exists() {
            return Err(reject("file not found"));
        }
        if !path.is_file() {
            return Err(reject("is a directory"));
        }
        File::open(path).map_err(|_| reject("permission denied"))?;

        let mut config = Self::from_filter(FilterConfig::default(), features);
        config.from_code = true;
        config.rules_file = Some(path.to_path_buf());
        config.keep_rules_file = true;
        Ok(config)
    }

    /// Selected report formats
    pub fn features(&self) -> Vec<OutputFeature> {
        OutputFeature::ALL
            .into_iter()
            .filter(|f| self.selection.features.contains(f.name()))
            .collect()
    }

    /// Run code reproducing this run
    pub fn to_code(&self) -> Result<String, CodeError> {
        token::encode(&self.selection, false)
    }

    /// Report destination for `feature`: `<output>.<extension>`, or stdout
    pub fn report_path(&self, feature: OutputFeature) -> String {
        if self.output == STDOUT {
            STDOUT.to_string()
        } else {
            format!("{}.{}", self.output, feature.extension())
        }
    }

    /// Scanner arguments selecting the report formats and their paths
    pub fn output_params(&self) -> Vec<String> {
        let mut params = Vec::new();
        for feature in self.features() {
            params.push(feature.flag().to_string());
            params.push(self.report_path(feature));
        }
        params
    }

    /// Writing to stdout requires exactly one report format
    pub fn validate_output(&self) -> Result<(), RunError> {
        let selected = self.features().len();
        if self.output == STDOUT && selected != 1 {
            return Err(RunError::StdoutFormats { selected });
        }
        Ok(())
    }
}
