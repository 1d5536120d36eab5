use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-skill scores, each in [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    pub fluency: f64,
    pub grammar: f64,
    pub vocabulary: f64,
    pub pronunciation: f64,
    pub listening: f64,
}

impl ReportMetrics {
    /// Metrics in display order, paired with their field names
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("fluency", self.fluency),
            ("grammar", self.grammar),
            ("vocabulary", self.vocabulary),
            ("pronunciation", self.pronunciation),
            ("listening", self.listening),
        ]
    }
}

/// Categorized free-text observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFeedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub practice_tips: Vec<String>,
    pub speaking_patterns: Vec<String>,
    pub cultural_notes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Encouraging,
    Constructive,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Encouraging => "encouraging",
            Tone::Constructive => "constructive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "encouraging" => Some(Tone::Encouraging),
            "constructive" => Some(Tone::Constructive),
            _ => None,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of a report produced by the model, after validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub score: f64,
    pub metrics: ReportMetrics,
    pub feedback: ReportFeedback,
    pub summary: String,
    pub tone: Tone,
}

/// A finished performance report
///
/// Created once per generation and persisted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(flatten)]
    pub draft: ReportDraft,

    /// ISO-8601 time the generation was requested
    pub timestamp: String,

    /// Session length in minutes
    pub duration: u32,
}

impl Report {
    pub fn new(draft: ReportDraft, timestamp: String, duration: u32) -> Self {
        Self {
            draft,
            timestamp,
            duration,
        }
    }

    pub fn score(&self) -> f64 {
        self.draft.score
    }

    pub fn metrics(&self) -> &ReportMetrics {
        &self.draft.metrics
    }

    pub fn feedback(&self) -> &ReportFeedback {
        &self.draft.feedback
    }

    pub fn summary(&self) -> &str {
        &self.draft.summary
    }

    pub fn tone(&self) -> Tone {
        self.draft.tone
    }
}
