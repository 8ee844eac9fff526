//! semgrep-search - Search semgrep rules and run them from a shareable run code
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use semgrep_search::cli::commands::{self, Context};
use semgrep_search::cli::exit_codes;
use semgrep_search::cli::{Cli, Commands};
use semgrep_search::config::Settings;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    let result = match Settings::load_or_default(cli.settings.as_deref()) {
        Ok(settings) => {
            let ctx = Context {
                settings,
                database: cli.database,
            };
            match cli.command {
                Commands::Search(args) => commands::search::execute(args, &ctx).await,
                Commands::Run(args) => commands::run::execute(args, &ctx).await,
                Commands::Code(args) => commands::code::execute(args).await,
                Commands::GenerateMan(args) => commands::generate_man::execute(args).await,
            }
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(exit_codes::for_error(&e));
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
