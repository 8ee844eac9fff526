//! Code command - Build or decode a run code

use super::{CodeArgs, CodeFormat};
use crate::cli::exit_codes;
use crate::cli::output::{CodeRenderer, JsonOutput, TerminalOutput};
use crate::error::SgsError;
use crate::runconfig::token;
use crate::runconfig::RunConfig;

/// Execute the code command
///
/// With `--decode`, shows the selection a code stands for. Otherwise builds
/// the code for the given filters and report formats.
pub async fn execute(args: CodeArgs) -> Result<i32, SgsError> {
    let (code, selection) = match &args.decode {
        Some(code) => (code.clone(), token::decode(code)?),
        None => {
            let config = RunConfig::from_filter(
                args.filters.to_filter_config(),
                &args.outputs.features(),
            );
            let code = token::encode(&config.selection, args.trim)?;
            (code, config.selection)
        }
    };

    let renderer: Box<dyn CodeRenderer> = match args.format {
        CodeFormat::Terminal => Box::new(TerminalOutput::new()),
        CodeFormat::Json => Box::new(JsonOutput::new()),
    };

    println!("{}", renderer.render_code(&code, &selection)?.trim_end());

    Ok(exit_codes::SUCCESS)
}
