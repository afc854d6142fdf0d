//! Validation findings and the aggregated result type
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors and warnings produced by a single check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    /// Findings that make the document invalid
    pub errors: Vec<String>,
    /// Advisory findings
    pub warnings: Vec<String>,
}

impl Findings {
    /// Create an empty set of findings
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Record a warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Append another check's findings, keeping their order
    pub fn extend(&mut self, other: Findings) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Append another check's findings with every message prefixed by `prefix: `
    pub fn extend_prefixed(&mut self, prefix: &str, other: Findings) {
        self.errors
            .extend(other.errors.into_iter().map(|e| format!("{}: {}", prefix, e)));
        self.warnings
            .extend(other.warnings.into_iter().map(|w| format!("{}: {}", prefix, w)));
    }

    /// True when nothing was reported
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Finish into a [`ValidationResult`]
    pub fn into_result(self) -> ValidationResult {
        ValidationResult::new(self.errors, self.warnings)
    }
}

/// Outcome of validating a CV document
///
/// `valid` is true iff `errors` is empty; warnings never affect validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result, deriving `valid` from the error list
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// A failed result carrying a single error and no warnings
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(vec![message.into()], Vec::new())
    }

    /// Whether the document passed validation
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "Document is valid")?;
        } else {
            write!(f, "Document is invalid ({} error(s))", self.errors.len())?;
        }

        for error in &self.errors {
            write!(f, "\n  error: {}", error)?;
        }
        for warning in &self.warnings {
            write!(f, "\n  warning: {}", warning)?;
        }

        Ok(())
    }
}
