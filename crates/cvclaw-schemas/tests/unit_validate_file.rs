//! End-to-end tests for file validation
//!
//! These tests write CV documents to temporary files and check the full
//! pipeline: loading, section validators, cross-section checks, the
//! markdown-safety fix with write-back, and the round-trip check.

use cvclaw_schemas::{
    persist_fix, validate_document, validate_file, validate_file_with_options, DocumentParser,
    ValidateOptions,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to `cv.yaml` inside a fresh temporary directory
fn write_cv(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cv.yaml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn is_fix_warning(warning: &str) -> bool {
    warning.starts_with("skills: Entry ") && warning.ends_with("for Markdown safety.")
}

#[cfg(test)]
mod load_failures {
    use super::*;

    #[test]
    fn test_missing_file_is_single_fatal_error() {
        let dir = TempDir::new().unwrap();
        let result = validate_file(&dir.path().join("absent.yaml"));

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Cannot read YAML: "));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_single_fatal_error() {
        let (_dir, path) = write_cv("cv:\n  name: [unterminated\n");
        let result = validate_file(&path);

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Cannot read YAML: "));
    }

    #[test]
    fn test_missing_cv_key() {
        let (_dir, path) = write_cv("resume:\n  name: X\n  sections: {}\n");
        let result = validate_file(&path);

        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Missing 'cv' top-level key"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scalar_root() {
        let (_dir, path) = write_cv("just text\n");
        let result = validate_file(&path);

        assert_eq!(result.errors, vec!["YAML root must be a mapping"]);
        assert!(result.warnings.is_empty());
    }
}

#[cfg(test)]
mod document_rules {
    use super::*;

    #[test]
    fn test_minimal_document_is_valid() {
        let (_dir, path) = write_cv("cv:\n  name: X\n  sections: {}\n");
        let result = validate_file(&path);

        assert!(result.valid, "unexpected errors: {:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_experience_missing_company_message() {
        let (_dir, path) = write_cv(concat!(
            "cv:\n  name: X\n  sections:\n    experience:\n",
            "      - position: Engineer\n        start_date: 2021-03\n",
        ));
        let result = validate_file(&path);

        assert!(!result.valid);
        assert!(result
            .errors
            .contains(&"experience: Experience entry 0 missing required field: company".to_string()));
    }

    #[test]
    fn test_single_non_string_highlight() {
        let (_dir, path) = write_cv(concat!(
            "cv:\n  name: X\n  sections:\n    experience:\n",
            "      - company: A\n        position: B\n        start_date: 2020\n        highlights: [ok, 5]\n",
            "      - company: C\n        position: D\n        start_date: 2021\n        highlights: [fine, also fine]\n",
        ));
        let result = validate_file(&path);

        assert_eq!(result.errors, vec!["experience entry 0 highlight 1 must be a string"]);
    }

    #[test]
    fn test_complete_document_with_unrecognized_section() {
        let (_dir, path) = write_cv(concat!(
            "cv:\n",
            "  name: Ada Lovelace\n",
            "  location: London\n",
            "  sections:\n",
            "    professional_summary:\n",
            "      - Mathematician.\n",
            "    experience:\n",
            "      - company: Analytical Engine\n",
            "        position: Programmer\n",
            "        start_date: 1842-01\n",
            "        end_date: present\n",
            "        highlights:\n",
            "          - First published algorithm.\n",
            "    education:\n",
            "      - institution: Home\n",
            "        degree: Tutoring\n",
            "        area: Mathematics\n",
            "        start_date: 1830\n",
            "    projects:\n",
            "      - name: Notes\n",
            "    skills:\n",
            "      - label: Languages\n",
            "        details: English, French\n",
            "    publications:\n",
            "      - anything: goes\n",
        ));
        let result = validate_file(&path);

        assert!(result.valid, "unexpected errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_date_warning_does_not_invalidate() {
        let (_dir, path) = write_cv(concat!(
            "cv:\n  name: X\n  sections:\n    projects:\n",
            "      - name: P\n        start_date: 2020.5\n",
        ));
        let result = validate_file(&path);

        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec!["projects entry 0: start_date should be string, int, or 'present'"]
        );
    }

    #[test]
    fn test_errors_follow_pipeline_order() {
        let (_dir, path) = write_cv(concat!(
            "cv:\n  sections:\n",
            "    education:\n      - institution: ''\n        degree: BS\n        highlights: [1]\n",
            "    professional_summary: [7]\n",
        ));
        let result = validate_file(&path);

        assert_eq!(
            result.errors,
            vec![
                "Missing required CV field: name",
                "education: Education entry 0 missing required field: area",
                "professional_summary: Summary item 0 must be a string",
                "education entry 0 highlight 0 must be a string",
                "education entry 0 missing required field: institution",
                "education entry 0 missing required field: area",
            ]
        );
    }
}

#[cfg(test)]
mod markdown_fix {
    use super::*;

    const CPP_DOC: &str = concat!(
        "cv:\n",
        "  name: Zoë Ñúñez\n",
        "  sections:\n",
        "    skills:\n",
        "      - label: Lang\n",
        "        details: C++ and Python\n",
    );

    #[test]
    fn test_fix_rewrites_source_file() {
        let (_dir, path) = write_cv(CPP_DOC);
        let result = validate_file(&path);

        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec!["skills: Entry 0 - Replaced 'C++' with '`C++`' for Markdown safety."]
        );

        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("`C++` and Python"));
        assert!(rewritten.contains("Zoë Ñúñez"));
        assert!(rewritten.find("name:").unwrap() < rewritten.find("sections:").unwrap());
        assert!(rewritten.find("label:").unwrap() < rewritten.find("details:").unwrap());
    }

    #[test]
    fn test_fix_is_idempotent() {
        let (_dir, path) = write_cv(CPP_DOC);

        let first = validate_file(&path);
        assert_eq!(first.warnings.iter().filter(|w| is_fix_warning(w)).count(), 1);

        let after_first = fs::read_to_string(&path).unwrap();
        let second = validate_file(&path);
        assert_eq!(second.warnings.iter().filter(|w| is_fix_warning(w)).count(), 0);
        assert!(second.valid);
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let (_dir, path) = write_cv(CPP_DOC);
        let result = validate_file_with_options(&path, &ValidateOptions::dry_run());

        assert_eq!(result.warnings.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), CPP_DOC);
    }

    #[test]
    fn test_no_fix_means_no_write() {
        let original = "cv:\n  name: X   # trailing comment kept\n  sections: {}\n";
        let (_dir, path) = write_cv(original);
        let result = validate_file(&path);

        assert!(result.valid);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_fix_still_applies_to_invalid_documents() {
        let (_dir, path) = write_cv(concat!(
            "cv:\n  sections:\n    skills:\n",
            "      - details: Modern C++\n",
        ));
        let result = validate_file(&path);

        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "Missing required CV field: name",
                "skills: Skill entry 0 missing required field: label",
            ]
        );
        assert_eq!(result.warnings.len(), 1);
        assert!(fs::read_to_string(&path).unwrap().contains("Modern `C++`"));
    }

    #[test]
    fn test_failed_write_back_is_a_warning() {
        let document = serde_yaml::from_str(CPP_DOC).unwrap();
        let validation = validate_document(&document);
        let fixed = validation.fixed_document.unwrap();
        let mut findings = validation.findings;
        assert_eq!(findings.warnings.len(), 1);

        // A directory cannot be overwritten with a file, even by root
        let dir = TempDir::new().unwrap();
        persist_fix(&DocumentParser::new(), dir.path(), &fixed, &mut findings);

        assert!(findings.errors.is_empty());
        assert_eq!(findings.warnings.len(), 2);
        assert!(findings.warnings[1].starts_with("Could not write C++ fix back to file: "));
        assert!(findings.into_result().valid);
    }
}
