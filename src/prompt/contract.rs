use serde_json::{json, Value};

/// Name of the function the model is forced to call
pub const REPORT_FUNCTION_NAME: &str = "generate_report";

fn score(description: &str) -> Value {
    json!({
        "type": "number",
        "minimum": 0,
        "maximum": 100,
        "description": description,
    })
}

fn string_list(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "description": description,
    })
}

/// JSON Schema of the structured output (a report minus timestamp/duration)
pub fn report_parameters_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "score": score("Overall performance score (0-100)"),
            "metrics": {
                "type": "object",
                "properties": {
                    "fluency": score("Fluency score (0-100)"),
                    "grammar": score("Grammar score (0-100)"),
                    "vocabulary": score("Vocabulary score (0-100)"),
                    "pronunciation": score("Pronunciation score (0-100)"),
                    "listening": score("Listening comprehension score (0-100)"),
                },
                "required": ["fluency", "grammar", "vocabulary", "pronunciation", "listening"],
            },
            "feedback": {
                "type": "object",
                "properties": {
                    "strengths": string_list("List of strengths identified"),
                    "improvements": string_list("List of areas for improvement"),
                    "practiceTips": string_list("List of practice tips"),
                    "speakingPatterns": string_list("List of speaking patterns observed"),
                    "culturalNotes": string_list("List of cultural notes"),
                },
                "required": [
                    "strengths",
                    "improvements",
                    "practiceTips",
                    "speakingPatterns",
                    "culturalNotes",
                ],
            },
            "summary": {
                "type": "string",
                "description": "Overall performance summary",
            },
            "tone": {
                "type": "string",
                "enum": ["encouraging", "constructive"],
                "description": "The tone of the feedback",
            },
        },
        "required": ["score", "metrics", "feedback", "summary", "tone"],
    })
}
