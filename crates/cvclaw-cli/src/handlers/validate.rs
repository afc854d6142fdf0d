//! Validation command handler

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use cvclaw_schemas::{validate_file_with_options, ValidateOptions, ValidationResult};
use std::path::Path;
use tracing::{info, instrument};

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.cv_file.display(), no_write = args.no_write))]
pub async fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details(
        "validate_command",
        &format!("file: {}", args.cv_file.display()),
    );

    let options = validate_options(config, args.no_write);
    let result = run_validation(&args.cv_file, &options);
    output.validation_result(&result)?;

    validation_outcome(&result)
}

/// Effective side-effect options for a validation run
pub(crate) fn validate_options(config: &Config, no_write: bool) -> ValidateOptions {
    ValidateOptions {
        write_back: config.validation.write_back && !no_write,
    }
}

/// Validate `path`, timing the library call
pub(crate) fn run_validation(path: &Path, options: &ValidateOptions) -> ValidationResult {
    let _timer = Timer::new("cv_validation");
    let result = validate_file_with_options(path, options);
    info!(
        valid = result.valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Validation complete"
    );
    result
}

/// Map a validation result to the command outcome
pub(crate) fn validation_outcome(result: &ValidationResult) -> Result<()> {
    if result.valid {
        Ok(())
    } else {
        Err(Error::ValidationFailed {
            errors: result.errors.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_write_flag_wins_over_config() {
        let config = Config::default();
        assert!(validate_options(&config, false).write_back);
        assert!(!validate_options(&config, true).write_back);

        let mut config = Config::default();
        config.validation.write_back = false;
        assert!(!validate_options(&config, false).write_back);
    }

    #[test]
    fn test_outcome_follows_validity() {
        let valid = ValidationResult::new(Vec::new(), vec!["advisory".to_string()]);
        assert!(validation_outcome(&valid).is_ok());

        let invalid = ValidationResult::new(vec!["a".to_string(), "b".to_string()], Vec::new());
        match validation_outcome(&invalid) {
            Err(Error::ValidationFailed { errors }) => assert_eq!(errors, 2),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }
}
