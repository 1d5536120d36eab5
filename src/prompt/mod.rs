//! Prompt construction for report generation
//!
//! Everything here is a pure function of the transcript and duration: equal
//! inputs always render byte-identical text.

mod contract;
mod templates;

pub use contract::{report_parameters_schema, REPORT_FUNCTION_NAME};
pub use templates::{render_prompt, serialize_transcript, ReportPrompt, SYSTEM_PROMPT};
