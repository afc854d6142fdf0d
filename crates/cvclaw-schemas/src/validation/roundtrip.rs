//! Serialize-then-reparse check
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

use crate::loader::DocumentParser;
use crate::validation::error::Findings;
use serde_yaml::Value;

/// Serialize the document to YAML, parse it back, and require an equal value
pub fn check_round_trip(document: &Value) -> Findings {
    let mut findings = Findings::new();

    match DocumentParser::new().round_trip(document) {
        Ok(reparsed) if reparsed == *document => {}
        Ok(_) => findings.error(
            "YAML serialization round-trip error: reparsed document differs from the original",
        ),
        Err(e) => findings.error(format!("YAML serialization round-trip error: {}", e)),
    }

    findings
}
