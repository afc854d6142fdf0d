//! Render command handler

use super::validate::{run_validation, validate_options, validation_outcome};
use crate::cli::RenderArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use crate::render::{RenderResult, Renderer};
use cvclaw_schemas::ValidationResult;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Handle the render command
///
/// The document is validated first unless `--skip-validation` is given; an
/// invalid document is reported as a failed render and nothing is rendered.
#[instrument(skip(config, output), fields(file = %args.cv_file.display()))]
pub async fn handle_render(
    args: RenderArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details(
        "render_command",
        &format!("file: {}", args.cv_file.display()),
    );

    if !args.skip_validation && args.cv_file.exists() {
        let result = run_validation(&args.cv_file, &validate_options(config, args.no_write));
        if !result.valid {
            for error in &result.errors {
                warn!(%error, "Pre-flight validation error");
            }
            output.render_result(&preflight_failure(&result))?;
            return validation_outcome(&result);
        }
        for warning in &result.warnings {
            output.warning(warning)?;
        }
    }

    let renderer = renderer_for(&args, config)?;
    let output_dir = output_dir_for(&args, config);

    info!(
        timeout_secs = renderer.timeout().as_secs(),
        output_dir = ?output_dir,
        "Starting renderer"
    );
    output.info(&format!("Rendering {}", args.cv_file.display()))?;
    let spinner = output.spinner("Running renderer...");
    let result = renderer.render(&args.cv_file, output_dir.as_deref()).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    output.render_result(&result)?;
    info!(success = result.success, pdf = ?result.pdf, "Render command finished");

    if result.success {
        Ok(())
    } else {
        Err(Error::RenderFailed {
            message: result.error.unwrap_or_default(),
        })
    }
}

/// Render result reported when validation rejects the document
fn preflight_failure(result: &ValidationResult) -> RenderResult {
    let message = match result.errors.as_slice() {
        [] => "Validation failed".to_string(),
        [only] => format!("Validation failed: {}", only),
        [first, rest @ ..] => format!("Validation failed: {} (+{} more)", first, rest.len()),
    };
    RenderResult::failed(message)
}

/// Renderer with the CLI timeout applied over the configured one
fn renderer_for(args: &RenderArgs, config: &Config) -> Result<Renderer> {
    let renderer = Renderer::from_config(&config.render);
    match args.timeout {
        Some(0) => Err(Error::invalid_args("--timeout must be positive")),
        Some(secs) => Ok(renderer.with_timeout(Duration::from_secs(secs))),
        None => Ok(renderer),
    }
}

fn output_dir_for(args: &RenderArgs, config: &Config) -> Option<PathBuf> {
    args.output_dir
        .clone()
        .or_else(|| config.render.output_dir.clone())
}
