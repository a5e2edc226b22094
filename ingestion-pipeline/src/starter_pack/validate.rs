use serde_json::Value;

use super::{SectionKind, StarterPackContentType, ALLOWED_MINUTES};

fn non_blank_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|text| !text.trim().is_empty())
}

fn minutes_allowed(value: &Value) -> bool {
    value
        .as_u64()
        .and_then(|minutes| u32::try_from(minutes).ok())
        .is_some_and(|minutes| ALLOWED_MINUTES.contains(&minutes))
}

/// Schema-validates one raw starter-pack item. Never fails early on the
/// first problem: every violation is accumulated as a labeled string so a
/// whole pack's problems surface in one pass. An empty result means valid.
pub fn validate_item(raw: &Value, label: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let mut add = |msg: String| errors.push(format!("{label}: {msg}"));

    let Some(object) = raw.as_object() else {
        add("Item must be an object".to_string());
        return errors;
    };

    if !non_blank_string(object.get("title")) {
        add("Missing title".to_string());
    }
    if !non_blank_string(object.get("slug")) {
        add("Missing slug".to_string());
    }

    let content_type_valid = object
        .get("contentType")
        .and_then(Value::as_str)
        .is_some_and(|value| StarterPackContentType::ALL.contains(&value));
    if !content_type_valid {
        add("Invalid contentType".to_string());
    }

    let tags_valid = object
        .get("clinicalTags")
        .and_then(Value::as_array)
        .is_some_and(|tags| !tags.is_empty());
    if !tags_valid {
        add("clinicalTags must be a non-empty array".to_string());
    }

    let populations_valid = object
        .get("populations")
        .and_then(Value::as_array)
        .is_some_and(|populations| !populations.is_empty());
    if !populations_valid {
        add("populations must be a non-empty array".to_string());
    }

    if let Some(minutes) = object.get("minutes") {
        if !minutes_allowed(minutes) {
            add("minutes must be one of 5,10,15,20,30".to_string());
        }
    }

    if object.get("clientSafe") != Some(&Value::Bool(true)) {
        add("clientSafe must be true".to_string());
    }
    if object.get("language").and_then(Value::as_str) != Some("en") {
        add("language must be 'en'".to_string());
    }

    let license = object.get("license").and_then(Value::as_object);
    if license.is_none() {
        add("license is required".to_string());
    }
    if license
        .and_then(|license| license.get("type"))
        .and_then(Value::as_str)
        != Some("SELF_AUTHORED")
    {
        add("license.type must be SELF_AUTHORED".to_string());
    }

    let sections = object.get("sections").and_then(Value::as_array);
    if !sections.is_some_and(|sections| sections.len() == 3) {
        add("sections must be an array of length 3".to_string());
    }
    if let Some(sections) = sections {
        let kinds: Vec<Option<&str>> = sections
            .iter()
            .map(|section| section.get("kind").and_then(Value::as_str))
            .collect();
        for required in SectionKind::ALL {
            if !kinds.contains(&Some(required)) {
                add(format!("Missing section kind {required}"));
            }
        }
        for (idx, section) in sections.iter().enumerate() {
            let kind_valid = section
                .get("kind")
                .and_then(Value::as_str)
                .is_some_and(|kind| SectionKind::ALL.contains(&kind));
            if !kind_valid {
                add(format!("Invalid section kind at {idx}"));
            }
            if !non_blank_string(section.get("title")) {
                add(format!("Section title missing at {idx}"));
            }
            if !non_blank_string(section.get("markdown")) {
                add(format!("Section markdown missing at {idx}"));
            }
        }
    }

    match object.get("measure").and_then(Value::as_object) {
        None => add("measure is required".to_string()),
        Some(measure) => {
            let is_measure = measure.get("isMeasure").and_then(Value::as_bool);
            if is_measure.is_none() {
                add("measure.isMeasure must be boolean".to_string());
            }
            if is_measure == Some(true) {
                match measure.get("scoring").and_then(Value::as_object) {
                    None => add("measure.scoring is required when isMeasure is true".to_string()),
                    Some(scoring) => {
                        let scoring_type_valid = scoring
                            .get("type")
                            .and_then(Value::as_str)
                            .is_some_and(|value| ["SUM", "MEAN", "RULES"].contains(&value));
                        if !scoring_type_valid {
                            add("measure.scoring.type invalid".to_string());
                        }
                        let range_valid = scoring.get("range").and_then(Value::as_object).is_some_and(
                            |range| {
                                range.get("min").and_then(Value::as_f64).is_some()
                                    && range.get("max").and_then(Value::as_f64).is_some()
                            },
                        );
                        if !range_valid {
                            add("measure.scoring.range invalid".to_string());
                        }
                        if scoring.get("rulesMarkdown").and_then(Value::as_str).is_none() {
                            add("measure.scoring.rulesMarkdown missing".to_string());
                        }
                    }
                }
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_item() -> Value {
        json!({
            "title": "Grounding Exercise",
            "slug": "grounding-exercise",
            "contentType": "WORKSHEET",
            "clinicalTags": ["ANXIETY"],
            "populations": ["ADULT"],
            "minutes": 10,
            "clientSafe": true,
            "language": "en",
            "license": { "type": "SELF_AUTHORED", "sourceName": "In-house" },
            "sections": [
                { "kind": "INSTRUCTIONS", "title": "How", "markdown": "Read." },
                { "kind": "CONTENT", "title": "Body", "markdown": "Do." },
                { "kind": "CLINICIAN_NOTES", "title": "Notes", "markdown": "Pace." }
            ],
            "measure": { "isMeasure": false, "scoring": null }
        })
    }

    #[test]
    fn valid_item_produces_no_errors() {
        assert!(validate_item(&valid_item(), "item.json").is_empty());
    }

    #[test]
    fn non_object_input_short_circuits() {
        let errors = validate_item(&json!("nope"), "bad.json");
        assert_eq!(errors, vec!["bad.json: Item must be an object"]);
    }

    #[test]
    fn violations_accumulate_instead_of_failing_fast() {
        let mut item = valid_item();
        item["title"] = json!("   ");
        item["contentType"] = json!("NOVEL");
        item["minutes"] = json!(12);
        item["clientSafe"] = json!(false);
        let errors = validate_item(&item, "item.json");
        assert!(errors.contains(&"item.json: Missing title".to_string()));
        assert!(errors.contains(&"item.json: Invalid contentType".to_string()));
        assert!(errors.contains(&"item.json: minutes must be one of 5,10,15,20,30".to_string()));
        assert!(errors.contains(&"item.json: clientSafe must be true".to_string()));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn absent_minutes_is_fine() {
        let mut item = valid_item();
        item.as_object_mut().unwrap().remove("minutes");
        assert!(validate_item(&item, "item.json").is_empty());
    }

    #[test]
    fn missing_license_reports_both_problems() {
        let mut item = valid_item();
        item.as_object_mut().unwrap().remove("license");
        let errors = validate_item(&item, "item.json");
        assert!(errors.contains(&"item.json: license is required".to_string()));
        assert!(errors.contains(&"item.json: license.type must be SELF_AUTHORED".to_string()));
    }

    #[test]
    fn all_three_section_kinds_must_be_present() {
        let mut item = valid_item();
        item["sections"][2]["kind"] = json!("CONTENT");
        let errors = validate_item(&item, "item.json");
        assert!(errors.contains(&"item.json: Missing section kind CLINICIAN_NOTES".to_string()));
    }

    #[test]
    fn wrong_section_count_is_reported() {
        let mut item = valid_item();
        item["sections"].as_array_mut().unwrap().pop();
        let errors = validate_item(&item, "item.json");
        assert!(errors.contains(&"item.json: sections must be an array of length 3".to_string()));
    }

    #[test]
    fn per_section_shape_is_checked_with_indexes() {
        let mut item = valid_item();
        item["sections"][1] = json!({ "kind": "MYSTERY", "title": "", "markdown": "x" });
        let errors = validate_item(&item, "item.json");
        assert!(errors.contains(&"item.json: Invalid section kind at 1".to_string()));
        assert!(errors.contains(&"item.json: Section title missing at 1".to_string()));
    }

    #[test]
    fn measure_scoring_required_only_when_flagged() {
        let mut item = valid_item();
        item["measure"] = json!({ "isMeasure": true, "scoring": null });
        let errors = validate_item(&item, "item.json");
        assert!(errors
            .contains(&"item.json: measure.scoring is required when isMeasure is true".to_string()));

        item["measure"] = json!({
            "isMeasure": true,
            "scoring": { "type": "SUM", "range": { "min": 0, "max": 27 }, "rulesMarkdown": "Sum." }
        });
        assert!(validate_item(&item, "item.json").is_empty());
    }

    #[test]
    fn invalid_scoring_fields_each_get_an_error() {
        let mut item = valid_item();
        item["measure"] = json!({
            "isMeasure": true,
            "scoring": { "type": "MEDIAN", "range": { "min": "low" } }
        });
        let errors = validate_item(&item, "item.json");
        assert!(errors.contains(&"item.json: measure.scoring.type invalid".to_string()));
        assert!(errors.contains(&"item.json: measure.scoring.range invalid".to_string()));
        assert!(errors.contains(&"item.json: measure.scoring.rulesMarkdown missing".to_string()));
    }
}
