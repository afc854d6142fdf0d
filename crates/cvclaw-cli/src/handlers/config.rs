//! Configuration command handlers

use crate::cli::{
    ConfigAction, ConfigArgs, ConfigFormat, ConfigGetArgs, ConfigGetFormat, ConfigInitArgs,
    ConfigShowArgs,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use std::path::PathBuf;

/// Handle the config command
pub async fn handle_config(
    args: ConfigArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Get(get_args) => handle_config_get(get_args, config, output),
        ConfigAction::Path => handle_config_path(output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from(".cvclaw.toml"));

    if path.exists() && !args.force {
        return Err(Error::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to customize settings for your environment.")?;

    Ok(())
}

/// Handle config show subcommand
fn handle_config_show(
    args: ConfigShowArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let content = match args.format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    output.writeln(content.trim_end())
}

/// Handle config get subcommand
fn handle_config_get(
    args: ConfigGetArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let value = config.get_value(&args.key)?;

    match args.format {
        ConfigGetFormat::Value => output.writeln(&display_value(&value)),
        ConfigGetFormat::Json => output.writeln(&serde_json::to_string(&value)?),
    }
}

/// Handle config path subcommand
fn handle_config_path(output: &mut OutputWriter) -> Result<()> {
    for path in Config::default_config_paths() {
        let marker = if path.exists() { "*" } else { " " };
        output.writeln(&format!("{} {}", marker, path.display()))?;
    }
    Ok(())
}

/// Render a config value without JSON quoting for scalars
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
