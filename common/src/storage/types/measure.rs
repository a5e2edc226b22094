use serde::{Deserialize, Serialize};

/// How a measure-type item is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScoringType {
    Sum,
    Mean,
    Rules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureScoring {
    #[serde(rename = "type")]
    pub scoring_type: ScoringType,
    pub range: ScoringRange,
    pub rules_markdown: String,
}

/// Measure block carried by starter-pack items. `scoring` is only required
/// when `is_measure` is set; plain worksheets carry `scoring: null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterPackMeasure {
    pub is_measure: bool,
    pub scoring: Option<MeasureScoring>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_round_trips_wire_keys() {
        let raw = serde_json::json!({
            "isMeasure": true,
            "scoring": {
                "type": "SUM",
                "range": { "min": 0.0, "max": 27.0 },
                "rulesMarkdown": "Sum all responses."
            }
        });
        let measure: StarterPackMeasure = serde_json::from_value(raw).unwrap();
        assert!(measure.is_measure);
        let scoring = measure.scoring.as_ref().unwrap();
        assert_eq!(scoring.scoring_type, ScoringType::Sum);
        let back = serde_json::to_value(&measure).unwrap();
        assert_eq!(back["scoring"]["type"], "SUM");
        assert_eq!(back["scoring"]["rulesMarkdown"], "Sum all responses.");
    }
}
