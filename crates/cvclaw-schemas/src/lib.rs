//! CV Claw Schemas - validation for YAML CV documents
//!
//! This crate checks a CV description before it is handed to a renderer.
//! A document looks like:
//!
//! ```yaml
//! cv:
//!   name: Ada Lovelace
//!   sections:
//!     professional_summary:
//!       - Mathematician and writer.
//!     experience:
//!       - company: Analytical Engine
//!         position: Programmer
//!         start_date: 1842-01
//!         end_date: present
//!         highlights:
//!           - Wrote the first published algorithm.
//!     skills:
//!       - label: Languages
//!         details: C++ and Python
//! ```
//!
//! ## Features
//!
//! - **Structural validation** of `professional_summary`, `experience`,
//!   `projects`, `education`, and `skills`
//! - **Cross-section checks** for date formats, highlight types, and
//!   non-empty required fields
//! - **Markdown-safety fix** that wraps bare `C++` in skill details in
//!   backticks and writes the document back to disk
//! - **Round-trip check** that the document survives serialization
//!
//! ## Quick Start
//!
//! ```rust
//! use cvclaw_schemas::validate_document;
//!
//! let document = serde_yaml::from_str("cv:\n  name: X\n  sections: {}\n").unwrap();
//! let validation = validate_document(&document);
//! assert!(validation.findings.errors.is_empty());
//! ```
//!
//! ## Side effects
//!
//! [`validate_file`] may **overwrite its input** when the markdown-safety
//! fix applies. Pass [`ValidateOptions::dry_run`] to
//! [`validate_file_with_options`] to keep the file untouched.
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

pub mod loader;
pub mod validation;

// Re-export commonly used types for convenience
pub use loader::{DocumentError, DocumentParser, DocumentResult};
pub use validation::{
    escape_cpp, persist_fix, validate_document, validate_file, validate_file_with_options,
    Findings, SectionKind, ValidateOptions, Validation, ValidationResult, ValueHelpers,
};
