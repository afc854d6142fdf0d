//! Document loading and persistence
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use cvclaw_schemas::loader::DocumentParser;
//! use std::path::Path;
//!
//! let parser = DocumentParser::new();
//! let document = parser.parse_file(Path::new("cv.yaml"))?;
//! println!("{}", parser.to_yaml_string(&document)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

pub use error::{DocumentError, DocumentResult};
pub use parser::DocumentParser;
