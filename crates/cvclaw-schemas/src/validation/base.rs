//! Recognized sections and value helpers shared by all checks
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::Findings;
use crate::validation::sections;
use serde_yaml::{Mapping, Value};
use std::fmt;

/// The closed set of section names that carry validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    ProfessionalSummary,
    Experience,
    Projects,
    Education,
    Skills,
}

impl SectionKind {
    /// Every recognized section
    pub const ALL: [SectionKind; 5] = [
        SectionKind::ProfessionalSummary,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Education,
        SectionKind::Skills,
    ];

    /// Sections re-checked for non-empty required fields, in check order
    pub const TRUTHINESS_ORDER: [SectionKind; 3] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
    ];

    /// Look up a section by its key under `cv.sections`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "professional_summary" => Some(Self::ProfessionalSummary),
            "experience" => Some(Self::Experience),
            "projects" => Some(Self::Projects),
            "education" => Some(Self::Education),
            "skills" => Some(Self::Skills),
            _ => None,
        }
    }

    /// The section's key under `cv.sections`
    pub fn name(self) -> &'static str {
        match self {
            Self::ProfessionalSummary => "professional_summary",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Education => "education",
            Self::Skills => "skills",
        }
    }

    /// How one element of this section is referred to in messages
    pub fn entry_label(self) -> &'static str {
        match self {
            Self::ProfessionalSummary => "Summary item",
            Self::Experience => "Experience entry",
            Self::Projects => "Project entry",
            Self::Education => "Education entry",
            Self::Skills => "Skill entry",
        }
    }

    /// Message emitted when the section body has the wrong container type
    pub fn shape_error(self) -> &'static str {
        match self {
            Self::ProfessionalSummary => "Professional summary must be a list of strings",
            Self::Experience => "Experience must be a list of entries",
            Self::Projects => "Projects must be a list of entries",
            Self::Education => "Education must be a list of entries",
            Self::Skills => "Skills must be a list of entries",
        }
    }

    /// Fields every entry must contain
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::ProfessionalSummary => &[],
            Self::Experience => &["company", "position", "start_date"],
            Self::Projects => &["name"],
            Self::Education => &["institution", "degree", "area"],
            Self::Skills => &["label", "details"],
        }
    }

    /// Fields that must be present and non-empty
    pub fn non_empty_fields(self) -> &'static [&'static str] {
        match self {
            Self::Experience => &["company", "position"],
            Self::Education => &["institution", "degree", "area"],
            Self::Projects => &["name"],
            Self::ProfessionalSummary | Self::Skills => &[],
        }
    }

    /// Whether entries may carry `start_date` / `end_date`
    pub fn has_dates(self) -> bool {
        matches!(self, Self::Experience | Self::Education | Self::Projects)
    }

    /// Whether entries may carry a `highlights` list
    pub fn has_highlights(self) -> bool {
        matches!(self, Self::Experience | Self::Education | Self::Projects)
    }

    /// Run this section's structural validator over its raw body
    pub fn validate(self, body: &Value) -> Findings {
        match self {
            Self::ProfessionalSummary => sections::validate_professional_summary(body),
            Self::Experience => sections::validate_experience(body),
            Self::Projects => sections::validate_projects(body),
            Self::Education => sections::validate_education(body),
            Self::Skills => sections::validate_skills(body),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Helper functions for inspecting document values
pub struct ValueHelpers;

impl ValueHelpers {
    /// Look up `cv.sections`, if the root and `cv` are mappings
    pub fn sections(document: &Value) -> Option<&Value> {
        document.as_mapping()?.get("cv")?.as_mapping()?.get("sections")
    }

    /// Look up `cv.sections` only when it is itself a mapping
    pub fn sections_mapping(document: &Value) -> Option<&Mapping> {
        Self::sections(document)?.as_mapping()
    }

    /// Iterate `(name, body)` pairs of a sections mapping in document order,
    /// skipping keys that are not strings
    pub fn named_sections(sections: &Mapping) -> impl Iterator<Item = (&str, &Value)> {
        sections
            .iter()
            .filter_map(|(key, body)| key.as_str().map(|name| (name, body)))
    }

    /// Whether a value counts as present-and-non-empty
    ///
    /// Null, `false`, zero, the empty string, and empty collections are falsy.
    pub fn is_truthy(value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i != 0
                } else if let Some(u) = n.as_u64() {
                    u != 0
                } else {
                    n.as_f64().map_or(true, |f| f != 0.0)
                }
            }
            Value::String(s) => !s.is_empty(),
            Value::Sequence(seq) => !seq.is_empty(),
            Value::Mapping(map) => !map.is_empty(),
            Value::Tagged(_) => true,
        }
    }

    /// Whether a value is an integer scalar
    pub fn is_integer(value: &Value) -> bool {
        match value {
            Value::Number(n) => n.is_i64() || n.is_u64(),
            _ => false,
        }
    }

    /// Short type name used in log output
    pub fn kind_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Tagged(_) => "tagged",
        }
    }
}
