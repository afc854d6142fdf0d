//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) for validation and
//! render results, plus a progress spinner.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::render::RenderResult;
use colored::Colorize;
use cvclaw_schemas::ValidationResult;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tracing::trace;

/// Trait for formatting output with specialized support for result types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation result
    fn format_validation_result(&self, result: &ValidationResult) -> Result<String>;

    /// Format a render result
    fn format_render_result(&self, result: &RenderResult) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_validation_result(&self, result: &ValidationResult) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_result_human(result)),
            _ => self.format(result),
        }
    }

    fn format_render_result(&self, result: &RenderResult) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_render_result_human(result)),
            _ => self.format(result),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet
                && format == OutputFormat::Human
                && std::io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        trace!(bytes = content.len(), "Writing output");
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a validation result
    ///
    /// Human output is colored line by line; machine formats print the
    /// serialized result only.
    pub fn validation_result(&mut self, result: &ValidationResult) -> Result<()> {
        if self.format != OutputFormat::Human || !self.use_color {
            let formatted = self.format.format_validation_result(result)?;
            return self.writeln(formatted.trim_end());
        }

        if result.valid {
            self.writeln(&validation_headline(result).green().bold().to_string())?;
        } else {
            self.writeln(&validation_headline(result).red().bold().to_string())?;
        }
        for error in &result.errors {
            self.writeln(&format!("  {} {}", "✗".red(), error))?;
        }
        for warning in &result.warnings {
            self.writeln(&format!("  {} {}", "!".yellow(), warning))?;
        }
        Ok(())
    }

    /// Write a render result
    pub fn render_result(&mut self, result: &RenderResult) -> Result<()> {
        if self.format != OutputFormat::Human || !self.use_color {
            let formatted = self.format.format_render_result(result)?;
            return self.writeln(formatted.trim_end());
        }

        let formatted = format_render_result_human(result);
        if result.success {
            self.writeln(&formatted.green().to_string())
        } else {
            self.writeln(&formatted.red().to_string())
        }
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn validation_headline(result: &ValidationResult) -> String {
    if result.valid {
        match result.warnings.len() {
            0 => "✓ CV is valid".to_string(),
            n => format!("✓ CV is valid with {} warning(s)", n),
        }
    } else {
        format!(
            "✗ CV is invalid: {} error(s), {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        )
    }
}

/// Format a validation result for human reading
fn format_validation_result_human(result: &ValidationResult) -> String {
    let mut output = validation_headline(result);
    output.push('\n');

    if !result.errors.is_empty() {
        output.push_str("\nErrors:\n");
        for (i, error) in result.errors.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, error));
        }
    }

    if !result.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for (i, warning) in result.warnings.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, warning));
        }
    }

    output
}

/// Format a render result for human reading
fn format_render_result_human(result: &RenderResult) -> String {
    if !result.success {
        return format!(
            "✗ Render failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    match &result.pdf {
        Some(pdf) => format!("✓ Rendered {}", pdf.display()),
        None => "✓ Render finished, but no PDF was found".to_string(),
    }
}
