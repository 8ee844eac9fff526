//! JSON output formatting

use serde::Serialize;

use super::CodeRenderer;
use crate::error::SgsError;
use crate::runconfig::token::RunSelection;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct CodeOutput<'a> {
    version: &'static str,
    code: &'a str,
    #[serde(flatten)]
    selection: &'a RunSelection,
}

impl CodeRenderer for JsonOutput {
    fn render_code(&self, code: &str, selection: &RunSelection) -> Result<String, SgsError> {
        let output = CodeOutput {
            version: env!("CARGO_PKG_VERSION"),
            code,
            selection,
        };
        serde_json::to_string_pretty(&output).map_err(Into::into)
    }
}
