//! Request, response and raw backend payload types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{RelayError, RelayResult};

/// One of the three motives scored from a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motive {
    Achievement,
    Affiliation,
    Power,
}

impl Motive {
    /// All motives in output order.
    pub const ALL: [Motive; 3] = [Motive::Achievement, Motive::Affiliation, Motive::Power];

    pub fn as_str(&self) -> &'static str {
        match self {
            Motive::Achievement => "achievement",
            Motive::Affiliation => "affiliation",
            Motive::Power => "power",
        }
    }
}

impl fmt::Display for Motive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound request body for `POST /analyze`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoryRequest {
    pub story: String,
}

/// Flat per-motive percentages (v1 and v2).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotiveScores {
    pub achievement: f64,
    pub affiliation: f64,
    pub power: f64,
}

impl MotiveScores {
    /// Build scores by evaluating `f` once per motive.
    pub fn from_fn(mut f: impl FnMut(Motive) -> f64) -> Self {
        Self {
            achievement: f(Motive::Achievement),
            affiliation: f(Motive::Affiliation),
            power: f(Motive::Power),
        }
    }

    pub fn get(&self, motive: Motive) -> f64 {
        match motive {
            Motive::Achievement => self.achievement,
            Motive::Affiliation => self.affiliation,
            Motive::Power => self.power,
        }
    }

    pub fn total(&self) -> f64 {
        self.achievement + self.affiliation + self.power
    }
}

/// Rich per-sentence analysis (v3).
///
/// Motive sub-results are flattened into the top-level object, so a motive
/// the backend did not report is simply absent from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub sentences: Vec<Value>,
    pub total_words: u64,
    pub total_sentences: u64,
    pub text_length_chars: u64,
    #[serde(flatten)]
    pub motives: BTreeMap<Motive, Value>,
}

/// Body of a successful `POST /analyze`, shaped by the running revision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Scores(MotiveScores),
    Analysis(AnalysisResult),
}

/// A backend number that is either bare or wrapped in a one-element array.
///
/// The local model server serializes scalars both ways depending on how the
/// value was produced, so both shapes have to be accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Number(f64),
    Sequence(Vec<f64>),
}

impl ScoreValue {
    /// The scalar value, taking the first element of a sequence.
    pub fn first(&self) -> Option<f64> {
        match self {
            ScoreValue::Number(n) => Some(*n),
            ScoreValue::Sequence(values) => values.first().copied(),
        }
    }
}

/// Raw `/predict` payload for flat scores.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScores {
    pub achievement: ScoreValue,
    pub affiliation: ScoreValue,
    pub power: ScoreValue,
}

impl RawScores {
    /// Unwrap every motive into a plain number, without rescaling.
    pub fn into_scores(self) -> RelayResult<MotiveScores> {
        let unwrap = |motive: Motive, value: &ScoreValue| {
            value
                .first()
                .ok_or_else(|| RelayError::malformed(format!("empty '{}' score", motive)))
        };

        Ok(MotiveScores {
            achievement: unwrap(Motive::Achievement, &self.achievement)?,
            affiliation: unwrap(Motive::Affiliation, &self.affiliation)?,
            power: unwrap(Motive::Power, &self.power)?,
        })
    }
}

/// One candidate label from a hosted classification endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Hosted classifiers answer either `[{..}]` or `[[{..}]]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelScores {
    Flat(Vec<LabelScore>),
    Nested(Vec<Vec<LabelScore>>),
}

impl LabelScores {
    pub fn into_records(self) -> Vec<LabelScore> {
        match self {
            LabelScores::Flat(records) => records,
            LabelScores::Nested(batches) => batches.into_iter().flatten().collect(),
        }
    }
}

/// Raw `/predict` payload for the per-sentence analysis.
///
/// Every field is optional so an `error` payload can be recognised before
/// the regular fields are required. For `error` and the motives a key that
/// is present counts even when its value is `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysis {
    #[serde(default, deserialize_with = "present")]
    pub error: Option<Value>,
    #[serde(default)]
    pub sentences: Option<Vec<Value>>,
    #[serde(default)]
    pub total_words: Option<ScoreValue>,
    #[serde(default)]
    pub total_sentences: Option<ScoreValue>,
    #[serde(default)]
    pub text_length_chars: Option<ScoreValue>,
    #[serde(default, deserialize_with = "present")]
    pub achievement: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub affiliation: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub power: Option<Value>,
}

impl RawAnalysis {
    /// Convert into the client-facing result, or surface a backend error.
    pub fn into_result(self) -> RelayResult<AnalysisResult> {
        if let Some(error) = self.error {
            return Err(RelayError::BackendReported(error_message(error)));
        }

        let sentences = self
            .sentences
            .ok_or_else(|| RelayError::malformed("missing 'sentences'"))?;

        let mut motives = BTreeMap::new();
        for (motive, value) in [
            (Motive::Achievement, self.achievement),
            (Motive::Affiliation, self.affiliation),
            (Motive::Power, self.power),
        ] {
            if let Some(value) = value {
                motives.insert(motive, value);
            }
        }

        Ok(AnalysisResult {
            sentences,
            total_words: count("total_words", self.total_words)?,
            total_sentences: count("total_sentences", self.total_sentences)?,
            text_length_chars: count("text_length_chars", self.text_length_chars)?,
            motives,
        })
    }
}

/// Keep a present key as `Some`, including an explicit `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn count(name: &str, value: Option<ScoreValue>) -> RelayResult<u64> {
    let n = value
        .and_then(|v| v.first())
        .ok_or_else(|| RelayError::malformed(format!("missing '{}'", name)))?;
    if !n.is_finite() || n < 0.0 || n.fract() != 0.0 {
        return Err(RelayError::malformed(format!("invalid '{}': {}", name, n)));
    }
    Ok(n as u64)
}

/// Backend error messages may arrive boxed in a one-element array.
fn error_message(error: Value) -> String {
    match error {
        Value::String(s) => s,
        Value::Array(mut items) if items.len() == 1 => error_message(items.remove(0)),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_scores_unwraps_singletons() {
        let raw: RawScores = serde_json::from_value(json!({
            "achievement": [0.5],
            "affiliation": 0.3,
            "power": [0.2]
        }))
        .unwrap();
        let scores = raw.into_scores().unwrap();
        assert_eq!(
            scores,
            MotiveScores {
                achievement: 0.5,
                affiliation: 0.3,
                power: 0.2
            }
        );
    }

    #[test]
    fn test_raw_scores_empty_sequence_is_malformed() {
        let raw: RawScores = serde_json::from_value(json!({
            "achievement": [],
            "affiliation": 0.3,
            "power": 0.2
        }))
        .unwrap();
        assert!(matches!(
            raw.into_scores(),
            Err(RelayError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_raw_scores_missing_field_fails_to_parse() {
        let parsed = serde_json::from_value::<RawScores>(json!({"achievement": 1.0}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_label_scores_nested_are_flattened() {
        let nested: LabelScores = serde_json::from_value(json!([[
            {"label": "high", "score": 0.7},
            {"label": "low", "score": 0.3}
        ]]))
        .unwrap();
        assert_eq!(nested.into_records().len(), 2);
    }

    #[test]
    fn test_analysis_error_field_wins() {
        let raw: RawAnalysis = serde_json::from_value(json!({"error": "bad input"})).unwrap();
        match raw.into_result() {
            Err(RelayError::BackendReported(msg)) => assert_eq!(msg, "bad input"),
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_analysis_boxed_error_message() {
        let raw: RawAnalysis = serde_json::from_value(json!({"error": ["empty text"]})).unwrap();
        let err = raw.into_result().unwrap_err();
        assert_eq!(err.to_string(), "empty text");
    }

    #[test]
    fn test_analysis_only_present_motives_are_emitted() {
        let raw: RawAnalysis = serde_json::from_value(json!({
            "sentences": [{"text": "I want to lead.", "power": 1}],
            "total_words": [4],
            "total_sentences": 1,
            "text_length_chars": [15],
            "power": {"count": 1, "density": 0.25}
        }))
        .unwrap();
        let result = raw.into_result().unwrap();
        assert_eq!(result.total_words, 4);
        assert_eq!(result.total_sentences, 1);
        assert_eq!(result.text_length_chars, 15);

        let out = serde_json::to_value(AnalyzeResponse::Analysis(result)).unwrap();
        let obj = out.as_object().unwrap();
        assert!(obj.contains_key("power"));
        assert!(!obj.contains_key("achievement"));
        assert!(!obj.contains_key("affiliation"));
        assert_eq!(obj["power"]["count"], 1);
    }

    #[test]
    fn test_analysis_null_error_is_still_reported() {
        let raw: RawAnalysis = serde_json::from_value(json!({"error": null})).unwrap();
        assert!(matches!(
            raw.into_result(),
            Err(RelayError::BackendReported(_))
        ));
    }

    #[test]
    fn test_analysis_null_motive_is_kept() {
        let raw: RawAnalysis = serde_json::from_value(json!({
            "sentences": [],
            "total_words": 0,
            "total_sentences": 0,
            "text_length_chars": 0,
            "power": null
        }))
        .unwrap();
        let out = serde_json::to_value(AnalyzeResponse::Analysis(raw.into_result().unwrap())).unwrap();
        let obj = out.as_object().unwrap();
        assert!(obj.contains_key("power"));
        assert!(obj["power"].is_null());
        assert!(!obj.contains_key("achievement"));
    }

    #[test]
    fn test_analysis_fractional_counter_is_malformed() {
        let raw: RawAnalysis = serde_json::from_value(json!({
            "sentences": [],
            "total_words": [2.5],
            "total_sentences": 1,
            "text_length_chars": 10
        }))
        .unwrap();
        let err = raw.into_result().unwrap_err();
        assert!(matches!(err, RelayError::MalformedResponse(_)));
        assert!(err.to_string().contains("total_words"));
    }

    #[test]
    fn test_analysis_missing_counter_is_malformed() {
        let raw: RawAnalysis = serde_json::from_value(json!({
            "sentences": [],
            "total_words": 0,
            "total_sentences": 0
        }))
        .unwrap();
        let err = raw.into_result().unwrap_err();
        assert!(err.to_string().contains("text_length_chars"));
    }

    #[test]
    fn test_scores_serialize_flat() {
        let out = serde_json::to_value(AnalyzeResponse::Scores(MotiveScores {
            achievement: 50.0,
            affiliation: 25.0,
            power: 25.0,
        }))
        .unwrap();
        assert_eq!(
            out,
            json!({"achievement": 50.0, "affiliation": 25.0, "power": 25.0})
        );
    }
}
