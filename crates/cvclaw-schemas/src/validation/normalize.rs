//! Markdown-safety rewrite of skill details
//!
//! The renderer treats skill details as Markdown, where a bare `C++` can be
//! mangled. Occurrences not already touching a backtick are wrapped in an
//! inline code span. The rewrite never touches the input document: it hands
//! back a fixed copy and leaves persisting it to the caller.
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

use crate::validation::base::{SectionKind, ValueHelpers};
use crate::validation::error::Findings;
use serde_yaml::Value;
use tracing::debug;

const CPP: &str = "C++";
const ESCAPED_CPP: &str = "`C++`";

/// Result of the normalization stage
#[derive(Debug, Clone, Default)]
pub struct Normalization {
    /// The rewritten document, present only if something changed
    pub document: Option<Value>,
    /// One warning per rewritten skill entry
    pub findings: Findings,
}

impl Normalization {
    /// Whether any entry was rewritten
    pub fn changed(&self) -> bool {
        self.document.is_some()
    }
}

/// Wrap every bare `C++` in backticks
///
/// Matches are found left to right without overlap. A match directly preceded
/// or followed by a backtick is left alone. Returns `None` when nothing needs
/// to change.
pub fn escape_cpp(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut escaped = String::with_capacity(text.len() + 2);
    let mut copied_up_to = 0;

    for (start, _) in text.match_indices(CPP) {
        let end = start + CPP.len();
        let before = start.checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(end).copied();
        if before == Some(b'`') || after == Some(b'`') {
            continue;
        }

        escaped.push_str(&text[copied_up_to..start]);
        escaped.push_str(ESCAPED_CPP);
        copied_up_to = end;
    }

    if copied_up_to == 0 {
        return None;
    }
    escaped.push_str(&text[copied_up_to..]);
    Some(escaped)
}

/// Apply [`escape_cpp`] to the `details` of every skill entry
pub fn escape_cpp_in_skills(document: &Value) -> Normalization {
    let mut normalization = Normalization::default();

    let fixes: Vec<(usize, String)> = skill_entries(document)
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let details = entry.as_mapping()?.get("details")?.as_str()?;
            escape_cpp(details).map(|fixed| (i, fixed))
        })
        .collect();

    if fixes.is_empty() {
        return normalization;
    }

    let mut fixed_document = document.clone();
    if let Some(entries) = skill_entries_mut(&mut fixed_document) {
        for (i, fixed) in fixes {
            if let Some(Value::Mapping(fields)) = entries.get_mut(i) {
                fields.insert(Value::from("details"), Value::from(fixed));
            }
            debug!(entry = i, "Escaped C++ in skill details");
            normalization.findings.warning(format!(
                "skills: Entry {} - Replaced 'C++' with '`C++`' for Markdown safety.",
                i
            ));
        }
    }

    normalization.document = Some(fixed_document);
    normalization
}

fn skill_entries(document: &Value) -> &[Value] {
    ValueHelpers::sections_mapping(document)
        .and_then(|sections| sections.get(SectionKind::Skills.name()))
        .and_then(Value::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn skill_entries_mut(document: &mut Value) -> Option<&mut Vec<Value>> {
    document
        .as_mapping_mut()?
        .get_mut("cv")?
        .as_mapping_mut()?
        .get_mut("sections")?
        .as_mapping_mut()?
        .get_mut(SectionKind::Skills.name())?
        .as_sequence_mut()
}
