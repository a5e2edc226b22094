//! Normalization of partial, untrusted metadata and section payloads into
//! the fixed shapes the rest of the pipeline works with.

use common::{
    error::AppError,
    storage::types::{
        metadata::{CustomizationRequired, Metadata, REQUIRED_METADATA_FIELDS},
        section::{Audience, Section},
    },
};
use serde_json::Value;

fn string_or_none(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(ToString::to_string)
}

/// Every element coerced to a string; non-array input becomes the empty list.
fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|elements| {
            elements
                .iter()
                .map(|element| match element {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Loose truthiness for the customization flag, which arrives from untyped
/// editor payloads as booleans, strings, or nothing at all.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Builds the fixed metadata shape from arbitrary partial input, falling
/// back to `content_type` when the payload does not carry one. Array fields
/// default to empty, string fields to `None`. Fails with
/// [`AppError::MissingMetadataField`] if any of the nine required keys is
/// absent from the result; `null` and `[]` are valid values, so this is a
/// key-presence check rather than a truthiness check.
pub fn normalize_metadata(input: &Value, content_type: &str) -> Result<Metadata, AppError> {
    let customization = input.get("customizationRequired");
    let metadata = Metadata {
        content_type: string_or_none(input.get("contentType"))
            .or_else(|| Some(content_type.to_string())),
        primary_clinical_domains: string_array(input.get("primaryClinicalDomains")),
        applicable_modalities: string_array(input.get("applicableModalities")),
        target_population: string_array(input.get("targetPopulation")),
        clinical_setting: string_array(input.get("clinicalSetting")),
        clinical_complexity_level: string_or_none(input.get("clinicalComplexityLevel")),
        session_use: string_or_none(input.get("sessionUse")),
        evidence_basis: string_or_none(input.get("evidenceBasis")),
        customization_required: CustomizationRequired {
            required: is_truthy(customization.and_then(|c| c.get("required"))),
            notes: string_or_none(customization.and_then(|c| c.get("notes"))),
        },
        starter_pack: None,
    };

    let serialized = serde_json::to_value(&metadata)?;
    for key in REQUIRED_METADATA_FIELDS {
        if serialized.get(key).is_none() {
            return Err(AppError::MissingMetadataField(key.to_string()));
        }
    }

    Ok(metadata)
}

/// Accepts either a bare section array or `{"sections": [...]}` and fills
/// per-section defaults. Sections whose text trims to nothing are dropped.
pub fn normalize_sections(input: &Value) -> Result<Vec<Section>, AppError> {
    let raw = if input.is_array() {
        Some(input)
    } else {
        input.get("sections")
    };
    let raw = raw.and_then(Value::as_array).ok_or(AppError::InvalidSections)?;

    let sections = raw
        .iter()
        .map(|section| {
            let title = string_or_none(section.get("title"))
                .unwrap_or_else(|| "Section".to_string());
            let heading_path =
                string_or_none(section.get("headingPath")).unwrap_or_else(|| title.clone());
            let text = string_or_none(section.get("text")).unwrap_or_default();
            let section_type =
                string_or_none(section.get("sectionType")).unwrap_or_else(|| title.clone());
            let audience = match string_or_none(section.get("audience")).as_deref() {
                Some("Client") => Audience::Client,
                Some("Clinician") => Audience::Clinician,
                _ => Audience::from_section_title(&title),
            };
            Section {
                heading_path,
                title,
                text,
                section_type,
                audience,
            }
        })
        .filter(|section| !section.text.trim().is_empty())
        .collect();

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fills_defaults_from_empty_input() {
        let metadata = normalize_metadata(&json!({}), "Clinical Form").unwrap();
        assert_eq!(metadata.content_type.as_deref(), Some("Clinical Form"));
        assert!(metadata.primary_clinical_domains.is_empty());
        assert!(metadata.clinical_complexity_level.is_none());
        assert!(!metadata.customization_required.required);
        assert!(metadata.customization_required.notes.is_none());
    }

    #[test]
    fn coerces_array_elements_to_strings() {
        let metadata = normalize_metadata(
            &json!({ "primaryClinicalDomains": ["ANXIETY", 5, true] }),
            "Assessment",
        )
        .unwrap();
        assert_eq!(
            metadata.primary_clinical_domains,
            vec!["ANXIETY", "5", "true"]
        );
    }

    #[test]
    fn non_array_fields_default_to_empty() {
        let metadata = normalize_metadata(
            &json!({ "applicableModalities": "CBT" }),
            "Assessment",
        )
        .unwrap();
        assert!(metadata.applicable_modalities.is_empty());
    }

    #[test]
    fn payload_content_type_wins_over_fallback() {
        let metadata =
            normalize_metadata(&json!({ "contentType": "Assessment" }), "Clinical Form").unwrap();
        assert_eq!(metadata.content_type.as_deref(), Some("Assessment"));
    }

    #[test]
    fn customization_accepts_loose_truthiness() {
        let metadata = normalize_metadata(
            &json!({ "customizationRequired": { "required": "yes", "notes": "tailor it" } }),
            "Clinical Form",
        )
        .unwrap();
        assert!(metadata.customization_required.required);
        assert_eq!(
            metadata.customization_required.notes.as_deref(),
            Some("tailor it")
        );
    }

    #[test]
    fn sections_accept_bare_array_or_wrapper_object() {
        let bare = json!([{ "title": "Overview", "text": "Intro" }]);
        let wrapped = json!({ "sections": [{ "title": "Overview", "text": "Intro" }] });
        assert_eq!(normalize_sections(&bare).unwrap().len(), 1);
        assert_eq!(normalize_sections(&wrapped).unwrap().len(), 1);
    }

    #[test]
    fn invalid_sections_shape_is_fatal() {
        assert!(matches!(
            normalize_sections(&json!({ "sections": "nope" })),
            Err(AppError::InvalidSections)
        ));
        assert!(matches!(
            normalize_sections(&json!(42)),
            Err(AppError::InvalidSections)
        ));
    }

    #[test]
    fn empty_text_sections_are_dropped_and_defaults_fill_in() {
        let sections = normalize_sections(&json!([
            { "title": "Keep", "text": "content" },
            { "title": "Drop", "text": "   " },
            { "text": "untitled body" }
        ]))
        .unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading_path, "Keep");
        assert_eq!(sections[1].title, "Section");
        assert_eq!(sections[1].section_type, "Section");
    }
}
