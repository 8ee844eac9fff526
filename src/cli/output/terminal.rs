//! Terminal output formatting with colors

use colored::Colorize;

use super::CodeRenderer;
use crate::database::Metadata;
use crate::error::SgsError;
use crate::runconfig::table::Field;
use crate::runconfig::token::RunSelection;

pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    /// Hint shown after a run that was configured with flags
    pub fn format_hint(&self, code: &str) -> String {
        format!(
            "{} {}",
            "Hint: This command can also be run by only using".dimmed(),
            code.blue().bold()
        )
    }

    /// One-line description of the loaded database
    pub fn format_database_info(&self, meta: &Metadata) -> String {
        format!(
            "Database was created on {} using semgrep-search-db {} ({})",
            meta.created_on
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .blue(),
            format!("v{}", meta.version).green(),
            meta.commit.cyan()
        )
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeRenderer for TerminalOutput {
    fn render_code(&self, code: &str, selection: &RunSelection) -> Result<String, SgsError> {
        let mut output = format!("{} {}\n", "Run code:".dimmed(), code.blue().bold());

        for field in Field::ALL {
            let names = selection.field(field);
            let value = if names.is_empty() {
                "(any)".dimmed().to_string()
            } else {
                let mut ordered: Vec<&str> = names.iter().map(String::as_str).collect();
                ordered.sort_by_key(|name| field.table().lookup(name));
                ordered.join(", ")
            };
            output.push_str(&format!("  {:<10} {}\n", field.name(), value));
        }

        Ok(output)
    }
}
