// Shared fixtures for integration tests
#![allow(dead_code)]

use practice_report::{ReportClient, ReportError, ReportPrompt, TranscriptMessage};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const T0: i64 = 1_730_000_000_000;

/// Scenario transcript: interviewer greets, learner answers
pub fn sample_transcript() -> Vec<TranscriptMessage> {
    vec![
        TranscriptMessage::from_self("Hi", T0),
        TranscriptMessage::from_counterpart("Interviewer", "Hello", T0 + 5_000),
    ]
}

pub fn valid_payload(score: u32) -> Value {
    json!({
        "score": score,
        "metrics": {
            "fluency": 70,
            "grammar": 68,
            "vocabulary": 75,
            "pronunciation": 72,
            "listening": 80
        },
        "feedback": {
            "strengths": ["Friendly greeting", "Quick replies", "Clear voice"],
            "improvements": ["Longer answers", "Follow-up questions", "Varied vocabulary"],
            "practiceTips": ["Describe your day aloud", "Shadow short clips", "Keep a phrase list"],
            "speakingPatterns": ["Short turns", "Rising intonation", "Few fillers"],
            "culturalNotes": ["Greetings are informal", "Small talk is expected", "Smiling helps"]
        },
        "summary": "A warm start to the conversation.",
        "tone": "encouraging"
    })
}

/// Client that replays a fixed response and counts calls
pub struct ScriptedClient {
    response: Mutex<Option<Result<Value, ReportError>>>,
    repeat: Value,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn returning(payload: Value) -> Self {
        Self {
            response: Mutex::new(None),
            repeat: payload,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: ReportError) -> Self {
        Self {
            response: Mutex::new(Some(Err(error))),
            repeat: Value::Null,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ReportClient for ScriptedClient {
    async fn request_structured_report(&self, _prompt: &ReportPrompt) -> Result<Value, ReportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent callers interleave
        tokio::task::yield_now().await;

        match self.response.lock().unwrap().take() {
            Some(result) => result,
            None => Ok(self.repeat.clone()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
