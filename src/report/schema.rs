//! Structural validation of model output
//!
//! The model's structured payload is decoded into a `serde_json::Value` first and
//! checked field by field, so a rejection can name every non-conforming field
//! instead of stopping at the first serde error. Fields are visited in a fixed
//! order, which keeps the reported violations identical across runs.

use super::types::{ReportDraft, ReportFeedback, ReportMetrics, Tone};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// One rejected field, addressed by dotted path (e.g. `metrics.fluency`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub problem: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Every violation found in one candidate report, in field order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_violations(.violations))]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Dotted paths of the rejected fields
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn first(&self) -> Option<&FieldViolation> {
        self.violations.first()
    }
}

impl From<Vec<FieldViolation>> for ValidationErrors {
    fn from(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a decoded model payload against the report schema.
///
/// Presence, JSON type and range are checked for every field before anything
/// is returned. Numbers are never coerced or clamped. Unknown keys are ignored.
pub fn validate_report(value: &Value) -> Result<ReportDraft, ValidationErrors> {
    let mut v = Validator::default();

    let Some(root) = value.as_object() else {
        v.reject("$", format!("expected object, got {}", type_name(value)));
        return Err(v.finish());
    };

    let score = v.score(root, "score", "score");
    let metrics = v
        .object(root, "metrics", "metrics")
        .and_then(|m| v.metrics(m));
    let feedback = v
        .object(root, "feedback", "feedback")
        .and_then(|fb| v.feedback(fb));
    let summary = v.string(root, "summary", "summary");
    let tone = v.tone(root);

    match (score, metrics, feedback, summary, tone) {
        (Some(score), Some(metrics), Some(feedback), Some(summary), Some(tone))
            if v.violations.is_empty() =>
        {
            Ok(ReportDraft {
                score,
                metrics,
                feedback,
                summary,
                tone,
            })
        }
        _ => Err(v.finish()),
    }
}

#[derive(Default)]
struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    fn reject(&mut self, field: &str, problem: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, problem));
    }

    fn finish(self) -> ValidationErrors {
        ValidationErrors::from(self.violations)
    }

    fn field<'a>(&mut self, obj: &'a Map<String, Value>, key: &str, path: &str) -> Option<&'a Value> {
        match obj.get(key) {
            Some(value) => Some(value),
            None => {
                self.reject(path, "missing required field");
                None
            }
        }
    }

    fn object<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<&'a Map<String, Value>> {
        let value = self.field(obj, key, path)?;
        match value.as_object() {
            Some(map) => Some(map),
            None => {
                self.reject(path, format!("expected object, got {}", type_name(value)));
                None
            }
        }
    }

    fn score(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> Option<f64> {
        let value = self.field(obj, key, path)?;
        let Some(number) = value.as_f64() else {
            self.reject(path, format!("expected number, got {}", type_name(value)));
            return None;
        };

        if !(SCORE_MIN..=SCORE_MAX).contains(&number) {
            self.reject(
                path,
                format!("must be between {} and {}, got {}", SCORE_MIN, SCORE_MAX, number),
            );
            return None;
        }

        Some(number)
    }

    // Each metric is checked before any `?` so all violations are recorded
    fn metrics(&mut self, m: &Map<String, Value>) -> Option<ReportMetrics> {
        let fluency = self.score(m, "fluency", "metrics.fluency");
        let grammar = self.score(m, "grammar", "metrics.grammar");
        let vocabulary = self.score(m, "vocabulary", "metrics.vocabulary");
        let pronunciation = self.score(m, "pronunciation", "metrics.pronunciation");
        let listening = self.score(m, "listening", "metrics.listening");

        Some(ReportMetrics {
            fluency: fluency?,
            grammar: grammar?,
            vocabulary: vocabulary?,
            pronunciation: pronunciation?,
            listening: listening?,
        })
    }

    fn feedback(&mut self, fb: &Map<String, Value>) -> Option<ReportFeedback> {
        let strengths = self.string_list(fb, "strengths", "feedback.strengths");
        let improvements = self.string_list(fb, "improvements", "feedback.improvements");
        let practice_tips = self.string_list(fb, "practiceTips", "feedback.practiceTips");
        let speaking_patterns =
            self.string_list(fb, "speakingPatterns", "feedback.speakingPatterns");
        let cultural_notes = self.string_list(fb, "culturalNotes", "feedback.culturalNotes");

        Some(ReportFeedback {
            strengths: strengths?,
            improvements: improvements?,
            practice_tips: practice_tips?,
            speaking_patterns: speaking_patterns?,
            cultural_notes: cultural_notes?,
        })
    }

    fn string(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> Option<String> {
        let value = self.field(obj, key, path)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.reject(path, format!("expected string, got {}", type_name(value)));
                None
            }
        }
    }

    fn string_list(&mut self, obj: &Map<String, Value>, key: &str, path: &str) -> Option<Vec<String>> {
        let value = self.field(obj, key, path)?;
        let Some(items) = value.as_array() else {
            self.reject(path, format!("expected array of strings, got {}", type_name(value)));
            return None;
        };

        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => out.push(s.to_string()),
                None => {
                    self.reject(
                        &format!("{}[{}]", path, i),
                        format!("expected string, got {}", type_name(item)),
                    );
                    ok = false;
                }
            }
        }

        ok.then_some(out)
    }

    fn tone(&mut self, obj: &Map<String, Value>) -> Option<Tone> {
        let value = self.field(obj, "tone", "tone")?;
        let Some(raw) = value.as_str() else {
            self.reject("tone", format!("expected string, got {}", type_name(value)));
            return None;
        };

        let tone = Tone::parse(raw);
        if tone.is_none() {
            self.reject(
                "tone",
                format!("expected \"encouraging\" or \"constructive\", got \"{}\"", raw),
            );
        }
        tone
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
