//! Report data model, schema validation and text rendering

mod render;
mod schema;
mod types;

pub use render::render_text;
pub use schema::{validate_report, FieldViolation, ValidationErrors, SCORE_MAX, SCORE_MIN};
pub use types::{Report, ReportDraft, ReportFeedback, ReportMetrics, Tone};
