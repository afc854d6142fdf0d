//! Checks that look across all sections of a document
//!
//! These run after the per-section validators and deliberately overlap with
//! them; a field that is both missing and re-checked here is reported twice.
//! Every check is a no-op when `cv.sections` is not a mapping.
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

use crate::validation::base::{SectionKind, ValueHelpers};
use crate::validation::error::Findings;
use serde_yaml::Value;

const DATE_FIELDS: [&str; 2] = ["start_date", "end_date"];

/// Warn about date fields that are neither strings nor integers
///
/// Booleans count as integers here, so `start_date: true` passes silently.
pub fn check_date_formats(document: &Value) -> Findings {
    let mut findings = Findings::new();
    let Some(sections) = ValueHelpers::sections_mapping(document) else {
        return findings;
    };

    for (name, body) in ValueHelpers::named_sections(sections) {
        if !SectionKind::from_name(name).is_some_and(SectionKind::has_dates) {
            continue;
        }
        let Value::Sequence(entries) = body else {
            continue;
        };

        for (i, entry) in entries.iter().enumerate() {
            let Value::Mapping(fields) = entry else {
                continue;
            };
            for field in DATE_FIELDS {
                let Some(value) = fields.get(field) else {
                    continue;
                };
                // "present" is a string, so it is covered by the first arm
                let acceptable = value.is_string()
                    || value.is_bool()
                    || ValueHelpers::is_integer(value);
                if !acceptable {
                    findings.warning(format!(
                        "{} entry {}: {} should be string, int, or 'present'",
                        name, i, field
                    ));
                }
            }
        }
    }

    findings
}

/// Every element of a `highlights` list must be a string, in any section
pub fn check_highlight_strings(document: &Value) -> Findings {
    let mut findings = Findings::new();
    let Some(sections) = ValueHelpers::sections_mapping(document) else {
        return findings;
    };

    for (name, body) in ValueHelpers::named_sections(sections) {
        let Value::Sequence(entries) = body else {
            continue;
        };

        for (i, entry) in entries.iter().enumerate() {
            let Some(Value::Sequence(highlights)) =
                entry.as_mapping().and_then(|fields| fields.get("highlights"))
            else {
                continue;
            };

            for (j, highlight) in highlights.iter().enumerate() {
                if !highlight.is_string() {
                    findings.error(format!(
                        "{} entry {} highlight {} must be a string",
                        name, i, j
                    ));
                }
            }
        }
    }

    findings
}

/// Required fields must be present and non-empty
pub fn check_required_entry_fields(document: &Value) -> Findings {
    let mut findings = Findings::new();
    let Some(sections) = ValueHelpers::sections_mapping(document) else {
        return findings;
    };

    for kind in SectionKind::TRUTHINESS_ORDER {
        let Some(Value::Sequence(entries)) = sections.get(kind.name()) else {
            continue;
        };

        for (i, entry) in entries.iter().enumerate() {
            let Value::Mapping(fields) = entry else {
                continue;
            };
            for field in kind.non_empty_fields() {
                let filled = fields.get(*field).is_some_and(ValueHelpers::is_truthy);
                if !filled {
                    findings.error(format!(
                        "{} entry {} missing required field: {}",
                        kind.name(),
                        i,
                        field
                    ));
                }
            }
        }
    }

    findings
}
