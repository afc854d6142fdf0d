//! CV Claw CLI - validate YAML CV documents and render them to PDF
//!
//! This is the main entry point for the CV Claw CLI application, providing
//! commands for validating CV documents and handing them to an external
//! renderer.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;
mod render;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Load configuration before logging so the [logging] section applies
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, !cli.no_color),
    };

    // Set up colored output
    let use_color = cli.use_color(config.output.color);
    control::set_override(use_color);

    // Initialize logging; the guard flushes file logs on exit
    let guard = match init_logging(&cli, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    // Run the application
    let result = run(cli, config, use_color).await;
    drop(guard);

    match result {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e, use_color),
    }
}

/// Print `error` to stderr and exit with its code
fn exit_with(error: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(error, use_color));

    if error.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(error.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
async fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = cli.output_format(&config.output.format);
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        ?format,
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output).await,
        Commands::Render(args) => handlers::handle_render(args, &config, &mut output).await,
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output).await,
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<Option<WorkerGuard>> {
    let verbosity = cli.verbosity_level();

    // CLI verbosity first, then the config file, then the environment
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);
    logging_config.apply_file_config(&config.logging, verbosity);
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        // Test verbose flag
        let cli = Cli::parse_from(["cvclaw", "-vv", "validate", "cv.yaml"]);
        assert_eq!(cli.verbosity_level(), 2);

        // Test quiet flag
        let cli = Cli::parse_from(["cvclaw", "--quiet", "validate", "cv.yaml"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
