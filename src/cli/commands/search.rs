//! Search command - Filter the rule database and write a ruleset

use colored::Colorize;
use std::path::Path;

use super::{report_no_rules, Context, SearchArgs};
use crate::cli::exit_codes;
use crate::cli::output::{RulesetRenderer, YamlRuleset};
use crate::error::{RunError, SgsError};
use crate::filters::filter_rules;
use crate::runconfig::STDOUT;
use crate::utils::absolute_path;

/// Execute the search command
///
/// Writes every rule matching the filters as a semgrep ruleset, either to
/// the output file or to stdout.
pub async fn execute(args: SearchArgs, ctx: &Context) -> Result<i32, SgsError> {
    let database = ctx.load_database()?;
    let filter = args.filters.to_filter_config();

    let rules = filter_rules(database.rules(), &filter);
    if rules.is_empty() {
        report_no_rules();
        return Ok(exit_codes::SUCCESS);
    }

    let rendered = YamlRuleset::new().render_ruleset(&rules)?;

    if args.output == STDOUT {
        print!("{rendered}");
    } else {
        let output_path = absolute_path(Path::new(&args.output));
        std::fs::write(&output_path, &rendered).map_err(|e| RunError::FileWrite {
            path: output_path.display().to_string(),
            source: e,
        })?;
        eprintln!(
            "{} Successfully written {} rules to {}",
            "Success:".green().bold(),
            rules.len(),
            output_path.display().to_string().cyan()
        );
    }

    Ok(exit_codes::SUCCESS)
}
