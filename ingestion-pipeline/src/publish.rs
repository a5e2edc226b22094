//! Content-type-specific required-section checks gating publication.
//! Failing here blocks the publish transition only; ingestion is unaffected.

use common::{error::AppError, storage::types::section::Section};

const FORM_REQUIRED_SECTIONS: [&str; 4] = [
    "scope & use statement",
    "risk, limitations & legal considerations",
    "signature blocks",
    "versioning & update notes",
];

const ASSESSMENT_REQUIRED_SECTIONS: [&str; 4] = [
    "interpretation guidelines",
    "clinical action & decision notes",
    "contraindications/risks/escalation",
    "privacy notes",
];

/// Best available heading per section: title, then section type, then the
/// last segment of the heading path.
fn heading_of(section: &Section) -> String {
    let heading = if !section.title.is_empty() {
        section.title.as_str()
    } else if !section.section_type.is_empty() {
        section.section_type.as_str()
    } else {
        section
            .heading_path
            .split('>')
            .next_back()
            .unwrap_or("")
            .trim()
    };
    heading.to_lowercase()
}

/// Verifies the item carries every section its content type requires before
/// it may be published. Matching is by lower-cased substring, so "Scoring &
/// Interpretation Guidelines" satisfies "interpretation guidelines". Content
/// types matching neither "assessment" nor "form" require nothing.
pub fn assert_publishable(content_type: &str, sections: &[Section]) -> Result<(), AppError> {
    let content_type = content_type.to_lowercase();
    let headings: Vec<String> = sections
        .iter()
        .map(heading_of)
        .filter(|heading| !heading.is_empty())
        .collect();

    let mut missing = Vec::new();
    if content_type.contains("assessment") {
        for required in ASSESSMENT_REQUIRED_SECTIONS {
            if !headings.iter().any(|heading| heading.contains(required)) {
                missing.push(required.to_string());
            }
        }
    }
    if content_type.contains("form") {
        for required in FORM_REQUIRED_SECTIONS {
            if !headings.iter().any(|heading| heading.contains(required)) {
                missing.push(required.to_string());
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::PublishValidation(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::storage::types::section::Audience;

    fn section(title: &str) -> Section {
        Section {
            heading_path: format!("Collection > Item > {title}"),
            title: title.to_string(),
            text: "body".to_string(),
            section_type: title.to_string(),
            audience: Audience::Clinician,
        }
    }

    #[test]
    fn form_missing_signature_blocks_is_rejected() {
        let sections = vec![
            section("Scope & Use Statement"),
            section("Risk, Limitations & Legal Considerations"),
            section("Versioning & Update Notes"),
        ];
        let err = assert_publishable("Clinical Form", &sections).unwrap_err();
        match err {
            AppError::PublishValidation(missing) => {
                assert_eq!(missing, vec!["signature blocks".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn complete_form_passes() {
        let sections = vec![
            section("Scope & Use Statement"),
            section("Risk, Limitations & Legal Considerations"),
            section("Signature Blocks"),
            section("Versioning & Update Notes"),
        ];
        assert!(assert_publishable("Intake Form", &sections).is_ok());
    }

    #[test]
    fn substring_matching_accepts_decorated_headings() {
        let sections = vec![
            section("Scoring & Interpretation Guidelines"),
            section("Clinical Action & Decision Notes"),
            section("Contraindications/Risks/Escalation"),
            section("Privacy Notes (HIPAA)"),
        ];
        assert!(assert_publishable("Symptom Assessment", &sections).is_ok());
    }

    #[test]
    fn assessment_lists_every_missing_phrase() {
        let err = assert_publishable("Assessment", &[section("Overview")]).unwrap_err();
        match err {
            AppError::PublishValidation(missing) => assert_eq!(missing.len(), 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn heading_falls_back_to_path_segment() {
        let mut fallback = section("ignored");
        fallback.title = String::new();
        fallback.section_type = String::new();
        fallback.heading_path = "Collection > Item > Signature Blocks".to_string();
        let sections = vec![
            section("Scope & Use Statement"),
            section("Risk, Limitations & Legal Considerations"),
            section("Versioning & Update Notes"),
            fallback,
        ];
        assert!(assert_publishable("Form", &sections).is_ok());
    }

    #[test]
    fn other_content_types_require_nothing() {
        assert!(assert_publishable("Therapeutic Content", &[]).is_ok());
    }

    #[test]
    fn error_message_names_the_missing_sections() {
        let err = assert_publishable("Form", &[]).unwrap_err();
        assert!(err.to_string().contains("signature blocks"));
        assert!(err.to_string().starts_with("Cannot publish."));
    }
}
