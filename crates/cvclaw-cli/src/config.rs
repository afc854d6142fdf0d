//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Environment variables
//! - Command-line arguments

use crate::error::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Renderer invocation settings
    pub render: RenderConfig,

    /// Validation settings
    pub validation: ValidationConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Executable to run
    pub program: String,

    /// Arguments placed before `render <file>`
    pub args: Vec<String>,

    /// Timeout in seconds
    pub timeout_secs: u64,

    /// Output directory passed to the renderer
    pub output_dir: Option<PathBuf>,
}

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Write the markdown-safety fix back to the source file
    pub write_back: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec!["-m".to_string(), "rendercv".to_string()],
            timeout_secs: 60,
            output_dir: None,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { write_back: true }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
            file: None,
        }
    }
}

/// File formats recognized by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// A missing or unparsable file is a [`Error::Config`].
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let parsed: Result<Self> = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content).map_err(Error::from),
            FileFormat::Json => serde_json::from_str(&content).map_err(Error::from),
            FileFormat::Toml => toml::from_str(&content).map_err(Error::from),
        };
        let config = parsed.map_err(|e| {
            Error::config(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from the first existing default location
    pub fn load() -> Result<Self> {
        match Self::default_config_paths().iter().find(|p| p.exists()) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file or default locations,
    /// then apply environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Get default configuration file paths to check, in priority order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".cvclaw.toml"), PathBuf::from(".cvclaw.yaml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cvclaw").join("config.toml"));
        }

        paths
    }

    /// Apply overrides from environment variables looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(renderer) = lookup("CVCLAW_RENDERER") {
            let mut words = renderer.split_whitespace().map(str::to_string);
            let program = words
                .next()
                .ok_or_else(|| Error::config("CVCLAW_RENDERER is empty"))?;
            self.render.program = program;
            self.render.args = words.collect();
        }

        if let Some(timeout) = lookup("CVCLAW_RENDER_TIMEOUT") {
            self.render.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::config(format!(
                    "CVCLAW_RENDER_TIMEOUT must be a whole number of seconds, got '{}'",
                    timeout
                ))
            })?;
        }

        if let Some(dir) = lookup("CVCLAW_OUTPUT_DIR") {
            self.render.output_dir = Some(PathBuf::from(dir));
        }

        if let Some(flag) = lookup("CVCLAW_NO_WRITE") {
            if matches!(flag.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on") {
                self.validation.write_back = false;
            }
        }

        if let Some(level) = lookup("CVCLAW_LOG_LEVEL") {
            self.logging.level = Some(level);
        }

        Ok(())
    }

    /// Check settings that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.render.program.trim().is_empty() {
            return Err(Error::config("render.program must not be empty"));
        }
        if self.render.timeout_secs == 0 {
            return Err(Error::config("render.timeout_secs must be positive"));
        }
        if !matches!(
            self.output.format.as_str(),
            "human" | "json" | "json-pretty" | "yaml"
        ) {
            return Err(Error::config(format!(
                "output.format must be one of human, json, json-pretty, yaml; got '{}'",
                self.output.format
            )));
        }
        if !matches!(self.logging.format.as_str(), "compact" | "full" | "json") {
            return Err(Error::config(format!(
                "logging.format must be one of compact, full, json; got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// Look up a dotted key such as `render.program`
    pub fn get_value(&self, key: &str) -> Result<serde_json::Value> {
        let tree = serde_json::to_value(self)?;
        key.split('.')
            .try_fold(&tree, |node, part| node.get(part))
            .cloned()
            .ok_or_else(|| Error::config(format!("Unknown configuration key: {}", key)))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
