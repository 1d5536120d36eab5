use crate::transcript::{ReportOptions, TranscriptMessage};

/// Coach persona sent as the system message
pub const SYSTEM_PROMPT: &str = "You are an experienced English language tutor providing friendly and constructive feedback.
Your goal is to help learners improve their English speaking skills through positive reinforcement and specific, actionable advice.
Always maintain an encouraging tone while providing honest feedback.
Always respond with valid JSON that matches the required schema.";

const OUTPUT_CONTRACT: &str = r#"{
  "score": number (0-100),
  "metrics": {
    "fluency": number (0-100),
    "grammar": number (0-100),
    "vocabulary": number (0-100),
    "pronunciation": number (0-100),
    "listening": number (0-100)
  },
  "feedback": {
    "strengths": string[],
    "improvements": string[],
    "practiceTips": string[],
    "speakingPatterns": string[],
    "culturalNotes": string[]
  },
  "summary": string,
  "tone": "encouraging" | "constructive"
}"#;

const GUIDELINES: &str = "Guidelines for Analysis:
1. Keep the tone friendly and encouraging throughout
2. Focus on strengths while providing constructive feedback
3. Provide specific, actionable tips for improvement
4. Note any patterns in speaking style
5. Include cultural context where relevant
6. Make suggestions in a supportive way
7. Ensure all numbers are between 0 and 100
8. Provide at least 3 items in each feedback array
9. Consider the following aspects:
   - Speaking fluency and naturalness
   - Grammar and vocabulary usage
   - Pronunciation and clarity
   - Listening comprehension
   - Response appropriateness
   - Cultural awareness
   - Confidence level
10. For the summary:
   - Start with positive observations
   - Include specific examples from the conversation
   - End with encouraging next steps
11. For practice tips:
   - Make them specific and actionable
   - Include both immediate and long-term suggestions
   - Consider the learner's current level
12. For cultural notes:
   - Highlight any cultural differences observed
   - Provide context for language usage
   - Suggest cultural awareness improvements";

/// System and user instructions for one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPrompt {
    pub system: String,
    pub user: String,
}

impl ReportPrompt {
    pub fn build(options: &ReportOptions) -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            user: render_prompt(&options.transcript, options.duration),
        }
    }
}

/// One `Label: text` line per message, in the order given
pub fn serialize_transcript(transcript: &[TranscriptMessage]) -> String {
    transcript
        .iter()
        .map(|msg| format!("{}: {}", msg.speaker_label(), msg.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the user instructions for a transcript of `duration` minutes
pub fn render_prompt(transcript: &[TranscriptMessage], duration: u32) -> String {
    format!(
        "Please analyze this English speaking practice session and provide a friendly, encouraging report.
The session lasted {duration} minutes.

Transcript:
{transcript}

Please provide a comprehensive analysis in the following JSON format:
{contract}

{guidelines}",
        duration = duration,
        transcript = serialize_transcript(transcript),
        contract = OUTPUT_CONTRACT,
        guidelines = GUIDELINES,
    )
}
