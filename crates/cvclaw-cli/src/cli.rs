//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// CV Claw - validate YAML CV documents and render them to PDF
///
/// Checks a CV description for structural problems before handing it to
/// an external renderer, and reports errors and warnings in a human or
/// machine-readable form.
#[derive(Parser, Debug)]
#[command(
    name = "cvclaw",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CVCLAW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results [default: human]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a CV document
    ///
    /// When a skill entry mentions a bare `C++`, the fix is written back to
    /// the file unless --no-write is given.
    Validate(ValidateArgs),

    /// Validate a CV document and render it to PDF
    Render(RenderArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the CV document (YAML)
    #[arg(value_name = "CV_FILE")]
    pub cv_file: PathBuf,

    /// Report fixes without writing them back to the file
    #[arg(long)]
    pub no_write: bool,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Path to the CV document (YAML)
    #[arg(value_name = "CV_FILE")]
    pub cv_file: PathBuf,

    /// Directory the renderer writes into
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Renderer timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Render without validating the document first
    #[arg(long)]
    pub skip_validation: bool,

    /// Report validation fixes without writing them back to the file
    #[arg(long)]
    pub no_write: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),

    /// Get a configuration value
    Get(ConfigGetArgs),

    /// List the configuration file search paths
    Path,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to .cvclaw.toml)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Arguments for config get
#[derive(Parser, Debug)]
pub struct ConfigGetArgs {
    /// Configuration key (e.g., render.program, validation.write_back)
    pub key: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "value")]
    pub format: ConfigGetFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Configuration get output formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigGetFormat {
    /// Just the value
    Value,
    /// JSON formatted
    Json,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Effective output format, falling back to the configured name
    pub fn output_format(&self, configured: &str) -> OutputFormat {
        self.output
            .or_else(|| <OutputFormat as ValueEnum>::from_str(configured, true).ok())
            .unwrap_or(OutputFormat::Human)
    }

    /// Check if colored output should be used
    pub fn use_color(&self, configured: bool) -> bool {
        configured && !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Validate(ValidateArgs {
                cv_file: PathBuf::from("cv.yaml"),
                no_write: false,
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_parse_render_flags() {
        let cli = Cli::try_parse_from([
            "cvclaw",
            "--output",
            "json",
            "render",
            "cv.yaml",
            "--output-dir",
            "out",
            "--timeout",
            "5",
            "--skip-validation",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.cv_file, PathBuf::from("cv.yaml"));
                assert_eq!(args.output_dir, Some(PathBuf::from("out")));
                assert_eq!(args.timeout, Some(5));
                assert!(args.skip_validation);
                assert!(!args.no_write);
            }
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_validate_no_write() {
        let cli = Cli::try_parse_from(["cvclaw", "validate", "cv.yaml", "--no-write"]).unwrap();
        match cli.command {
            Commands::Validate(args) => assert!(args.no_write),
            other => panic!("expected validate, got {:?}", other),
        }
    }

    #[test]
    fn test_output_format_falls_back_to_config() {
        let cli = Cli::try_parse_from(["cvclaw", "validate", "cv.yaml"]).unwrap();
        assert_eq!(cli.output_format("json-pretty"), OutputFormat::JsonPretty);
        assert_eq!(cli.output_format("bogus"), OutputFormat::Human);

        let cli = Cli::try_parse_from(["cvclaw", "-o", "yaml", "validate", "cv.yaml"]).unwrap();
        assert_eq!(cli.output_format("json"), OutputFormat::Yaml);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["cvclaw", "-q", "-v", "validate", "cv.yaml"]).is_err());
    }
}
