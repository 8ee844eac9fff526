//! Output formatting module for CLI

pub mod json;
pub mod ruleset;
mod terminal;

pub use json::JsonOutput;
pub use ruleset::YamlRuleset;
pub use terminal::TerminalOutput;

use crate::database::Rule;
use crate::error::SgsError;
use crate::runconfig::token::RunSelection;

/// Trait for rendering a run code and the selection it stands for
pub trait CodeRenderer {
    fn render_code(&self, code: &str, selection: &RunSelection) -> Result<String, SgsError>;
}

/// Trait for rendering selected rules as a scanner ruleset
pub trait RulesetRenderer {
    fn render_ruleset(&self, rules: &[&Rule]) -> Result<String, SgsError>;
}
