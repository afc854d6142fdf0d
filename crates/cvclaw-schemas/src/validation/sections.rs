//! Structural validators for the recognized sections
//!
//! Each validator inspects one section body and never looks outside it.
//! Messages are unprefixed; the orchestrator adds `"<section>: "`.
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

use crate::validation::base::SectionKind;
use crate::validation::error::Findings;
use serde_yaml::Value;

/// `professional_summary`: a list of strings
pub fn validate_professional_summary(body: &Value) -> Findings {
    let mut findings = Findings::new();
    let kind = SectionKind::ProfessionalSummary;

    let Value::Sequence(items) = body else {
        findings.error(kind.shape_error());
        return findings;
    };

    for (i, item) in items.iter().enumerate() {
        if !matches!(item, Value::String(_)) {
            findings.error(format!("{} {} must be a string", kind.entry_label(), i));
        }
    }

    findings
}

/// `experience`: entries need company, position and start_date
pub fn validate_experience(body: &Value) -> Findings {
    validate_entries(SectionKind::Experience, body)
}

/// `projects`: entries need a name
pub fn validate_projects(body: &Value) -> Findings {
    validate_entries(SectionKind::Projects, body)
}

/// `education`: entries need institution, degree and area
pub fn validate_education(body: &Value) -> Findings {
    validate_entries(SectionKind::Education, body)
}

/// `skills`: entries need a label and details
pub fn validate_skills(body: &Value) -> Findings {
    validate_entries(SectionKind::Skills, body)
}

/// Shared rules for list-of-mapping sections
fn validate_entries(kind: SectionKind, body: &Value) -> Findings {
    let mut findings = Findings::new();
    let label = kind.entry_label();

    let Value::Sequence(entries) = body else {
        findings.error(kind.shape_error());
        return findings;
    };

    for (i, entry) in entries.iter().enumerate() {
        let Value::Mapping(fields) = entry else {
            findings.error(format!("{} {} must be a dictionary", label, i));
            continue;
        };

        for field in kind.required_fields() {
            if !fields.contains_key(*field) {
                findings.error(format!("{} {} missing required field: {}", label, i, field));
            }
        }

        if kind.has_highlights() {
            if let Some(highlights) = fields.get("highlights") {
                if !highlights.is_sequence() {
                    findings.error(format!("{} {} highlights must be a list", label, i));
                }
            }
        }
    }

    findings
}
