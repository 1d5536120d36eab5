pub mod client;
pub mod config;
pub mod error;
pub mod generation;
pub mod http;
pub mod prompt;
pub mod report;
pub mod session;
pub mod store;
pub mod transcript;

pub use client::{ClientFactory, MockClient, MockProfile, OpenAiClient, ReportClient, TimeoutClient};
pub use config::Config;
pub use error::ReportError;
pub use generation::{GenerationPhase, GenerationStatus, ReportGenerator, StatusObserver};
pub use http::{create_router, AppState};
pub use prompt::{render_prompt, serialize_transcript, ReportPrompt, SYSTEM_PROMPT};
pub use report::{
    render_text, validate_report, Report, ReportDraft, ReportFeedback, ReportMetrics, Tone,
    ValidationErrors,
};
pub use session::{PracticeSession, ReportSource, SessionConfig, SessionStats};
pub use store::{
    MemoryBackend, ReportStore, SledBackend, StorageBackend, StorageBackendFactory, StoreHealth,
};
pub use transcript::{ReportOptions, TranscriptMessage};
