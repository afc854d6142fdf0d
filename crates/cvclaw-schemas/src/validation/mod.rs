//! Validation pipeline for CV documents
//!
//! A document is checked in a fixed order:
//!
//! 1. root shape (`cv` present and a mapping, `name` and `sections` present)
//! 2. per-section structural validators ([`SectionKind::validate`])
//! 3. cross-section checks (date formats, highlight strings, non-empty fields)
//! 4. the `C++` markdown-escaping fix, which may rewrite the source file
//! 5. a serialize-then-reparse round trip
//!
//! Errors invalidate the document; warnings are advisory. Nothing in the
//! pipeline panics on malformed input.
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod cross_checks;
pub mod error;
pub mod normalize;
pub mod roundtrip;
pub mod sections;

pub use base::{SectionKind, ValueHelpers};
pub use error::{Findings, ValidationResult};
pub use normalize::{escape_cpp, escape_cpp_in_skills, Normalization};

use crate::loader::DocumentParser;
use serde_yaml::Value;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

const REQUIRED_CV_FIELDS: [&str; 2] = ["name", "sections"];

/// Options controlling side effects of [`validate_file_with_options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Persist the normalization fix back to the source file
    pub write_back: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self { write_back: true }
    }
}

impl ValidateOptions {
    /// Report fixes without touching the source file
    pub fn dry_run() -> Self {
        Self { write_back: false }
    }
}

/// Outcome of validating an in-memory document
#[derive(Debug, Clone, Default)]
pub struct Validation {
    /// Everything reported, in pipeline order
    pub findings: Findings,
    /// The normalized document, when the fix changed anything
    pub fixed_document: Option<Value>,
}

impl Validation {
    fn fatal(message: &str) -> Self {
        let mut findings = Findings::new();
        findings.error(message);
        Self {
            findings,
            fixed_document: None,
        }
    }
}

/// Validate the document at `path`, persisting the normalization fix
///
/// Note that this may overwrite `path`. Use [`validate_file_with_options`]
/// with [`ValidateOptions::dry_run`] for a read-only check.
///
/// # Examples
///
/// ```rust,no_run
/// use cvclaw_schemas::validate_file;
/// use std::path::Path;
///
/// let result = validate_file(Path::new("cv.yaml"));
/// if !result.valid {
///     for error in &result.errors {
///         eprintln!("{}", error);
///     }
/// }
/// ```
pub fn validate_file(path: &Path) -> ValidationResult {
    validate_file_with_options(path, &ValidateOptions::default())
}

/// Validate the document at `path`
#[instrument(skip(options), fields(path = %path.display(), write_back = options.write_back))]
pub fn validate_file_with_options(path: &Path, options: &ValidateOptions) -> ValidationResult {
    let parser = DocumentParser::new();

    let document = match parser.parse_file(path) {
        Ok(document) => document,
        Err(e) => {
            warn!(error = %e, "Could not load document");
            return ValidationResult::fatal(format!("Cannot read YAML: {}", e));
        }
    };

    let Validation {
        mut findings,
        fixed_document,
    } = validate_document(&document);

    if let Some(fixed) = fixed_document {
        if options.write_back {
            persist_fix(&parser, path, &fixed, &mut findings);
        } else {
            debug!("Write-back disabled; normalized document discarded");
        }
    }

    let result = findings.into_result();
    info!(
        valid = result.valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Validation finished"
    );
    result
}

/// Write the normalized document to `path`
///
/// A failed write is recorded as a warning; it never adds an error.
pub fn persist_fix(parser: &DocumentParser, path: &Path, fixed: &Value, findings: &mut Findings) {
    match parser.write_file(path, fixed) {
        Ok(()) => info!("Wrote normalized document back to source"),
        Err(e) => {
            warn!(error = %e, "Could not persist normalized document");
            findings.warning(format!("Could not write C++ fix back to file: {}", e));
        }
    }
}

/// Validate an in-memory document without any I/O
///
/// The returned [`Validation`] carries the fixed document, if the
/// normalization stage changed anything, so the caller can decide whether
/// to persist it.
pub fn validate_document(document: &Value) -> Validation {
    let Value::Mapping(root) = document else {
        return Validation::fatal("YAML root must be a mapping");
    };
    let Some(cv) = root.get("cv") else {
        return Validation::fatal("Missing 'cv' top-level key");
    };
    let Value::Mapping(cv) = cv else {
        return Validation::fatal("'cv' must be a mapping");
    };

    let mut findings = Findings::new();

    for field in REQUIRED_CV_FIELDS {
        if !cv.contains_key(field) {
            findings.error(format!("Missing required CV field: {}", field));
        }
    }

    match cv.get("sections") {
        Some(Value::Mapping(sections)) => {
            for (name, body) in ValueHelpers::named_sections(sections) {
                match SectionKind::from_name(name) {
                    Some(kind) => {
                        debug!(section = name, kind = ValueHelpers::kind_name(body), "Validating section");
                        findings.extend_prefixed(name, kind.validate(body));
                    }
                    None => debug!(section = name, "Skipping unrecognized section"),
                }
            }

            findings.extend(cross_checks::check_date_formats(document));
            findings.extend(cross_checks::check_highlight_strings(document));
            findings.extend(cross_checks::check_required_entry_fields(document));
        }
        Some(_) => findings.error("Sections must be a dictionary, not a list"),
        None => {}
    }

    let normalization = normalize::escape_cpp_in_skills(document);
    findings.extend(normalization.findings);

    let checked = normalization.document.as_ref().unwrap_or(document);
    findings.extend(roundtrip::check_round_trip(checked));

    Validation {
        findings,
        fixed_document: normalization.document,
    }
}
