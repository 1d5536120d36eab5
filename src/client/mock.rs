//! Offline client returning canned reports
//!
//! Useful for demos and UI work without an API key. The payloads go through the
//! same validation as real model output.

use super::ReportClient;
use crate::error::ReportError;
use crate::prompt::ReportPrompt;
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockProfile {
    High,
    Low,
    Mixed,
}

impl MockProfile {
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "high" => Ok(MockProfile::High),
            "low" => Ok(MockProfile::Low),
            "mixed" => Ok(MockProfile::Mixed),
            other => anyhow::bail!("Unknown mock profile: {} (expected high, low or mixed)", other),
        }
    }

    fn payload(&self) -> Value {
        match self {
            MockProfile::High => json!({
                "score": 85,
                "metrics": {
                    "fluency": 90,
                    "grammar": 85,
                    "vocabulary": 80,
                    "pronunciation": 85,
                    "listening": 90
                },
                "feedback": {
                    "strengths": [
                        "Excellent fluency and natural speaking pace",
                        "Strong vocabulary usage with appropriate word choices",
                        "Clear pronunciation and good intonation",
                        "Active listening and relevant responses"
                    ],
                    "improvements": [
                        "Consider using more complex sentence structures",
                        "Work on reducing filler words"
                    ],
                    "practiceTips": [
                        "Try reading aloud from English newspapers",
                        "Practice with native speakers on language exchange apps",
                        "Record yourself speaking and analyze your pronunciation"
                    ],
                    "speakingPatterns": [
                        "Tends to use simple sentences effectively",
                        "Good use of transition words",
                        "Natural pauses and rhythm"
                    ],
                    "culturalNotes": [
                        "Shows good understanding of cultural context",
                        "Appropriate use of formal/informal language"
                    ]
                },
                "summary": "Overall, you demonstrated strong English speaking skills with excellent fluency and clear communication. Your responses were relevant and well-structured, showing good understanding of the conversation context.",
                "tone": "encouraging"
            }),
            MockProfile::Low => json!({
                "score": 45,
                "metrics": {
                    "fluency": 40,
                    "grammar": 35,
                    "vocabulary": 50,
                    "pronunciation": 45,
                    "listening": 55
                },
                "feedback": {
                    "strengths": [
                        "Shows determination to communicate",
                        "Basic vocabulary is understood",
                        "Willing to take risks in speaking"
                    ],
                    "improvements": [
                        "Focus on basic grammar structures",
                        "Practice common vocabulary",
                        "Work on sentence formation"
                    ],
                    "practiceTips": [
                        "Start with simple daily conversations",
                        "Use language learning apps for basic practice",
                        "Watch children's shows in English"
                    ],
                    "speakingPatterns": [
                        "Frequent pauses for word search",
                        "Basic sentence structures",
                        "Limited vocabulary range"
                    ],
                    "culturalNotes": [
                        "Basic understanding of cultural differences",
                        "Learning appropriate greetings"
                    ]
                },
                "summary": "While you're at the beginning of your English learning journey, you show good determination and willingness to communicate. Focus on building basic vocabulary and grammar skills through regular practice.",
                "tone": "constructive"
            }),
            MockProfile::Mixed => json!({
                "score": 65,
                "metrics": {
                    "fluency": 60,
                    "grammar": 55,
                    "vocabulary": 70,
                    "pronunciation": 65,
                    "listening": 75
                },
                "feedback": {
                    "strengths": [
                        "Good vocabulary range",
                        "Clear pronunciation",
                        "Active listening skills"
                    ],
                    "improvements": [
                        "Work on grammar accuracy",
                        "Practice speaking more fluently",
                        "Reduce hesitation words"
                    ],
                    "practiceTips": [
                        "Practice with grammar exercises",
                        "Record yourself speaking",
                        "Join conversation groups"
                    ],
                    "speakingPatterns": [
                        "Occasional grammar mistakes",
                        "Good use of common phrases",
                        "Some hesitation in responses"
                    ],
                    "culturalNotes": [
                        "Understanding of basic cultural norms",
                        "Appropriate use of formal language"
                    ]
                },
                "summary": "You have a solid foundation in English with good vocabulary and pronunciation. Focus on improving grammar accuracy and speaking fluency through regular practice and conversation.",
                "tone": "encouraging"
            }),
        }
    }
}

pub struct MockClient {
    profile: MockProfile,
}

impl MockClient {
    pub fn new(profile: MockProfile) -> Self {
        Self { profile }
    }
}

#[async_trait::async_trait]
impl ReportClient for MockClient {
    async fn request_structured_report(&self, prompt: &ReportPrompt) -> Result<Value, ReportError> {
        info!(
            "Mock report ({:?}) for prompt of {} bytes",
            self.profile,
            prompt.user.len()
        );
        Ok(self.profile.payload())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
