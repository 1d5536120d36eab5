use super::status::{GenerationStatus, StatusObserver};
use crate::client::ReportClient;
use crate::error::Result;
use crate::prompt::ReportPrompt;
use crate::report::{validate_report, Report};
use crate::transcript::ReportOptions;
use std::sync::Arc;
use tracing::{error, info};

const MSG_STARTING: &str = "Starting report generation...";
const MSG_ANALYZING: &str = "Analyzing conversation...";
const MSG_PROCESSING: &str = "Processing analysis...";
const MSG_SUCCESS: &str = "Report generated successfully!";
const MSG_FAILED: &str = "Failed to generate report";

/// Runs serialize → request → validate → attach metadata for one transcript
#[derive(Clone)]
pub struct ReportGenerator {
    client: Arc<dyn ReportClient>,
}

impl ReportGenerator {
    pub fn new(client: Arc<dyn ReportClient>) -> Self {
        Self { client }
    }

    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    /// Generate a report for `options`.
    ///
    /// The observer sees loading 0 → 20 → 60, then exactly one of success/100
    /// or error/0. On failure the error status is published before the error is
    /// returned. No partially populated report is ever returned.
    pub async fn generate(
        &self,
        options: &ReportOptions,
        observer: Option<&dyn StatusObserver>,
    ) -> Result<Report> {
        publish(observer, GenerationStatus::loading(0, MSG_STARTING));

        match self.run(options, observer).await {
            Ok(report) => {
                info!(
                    "Report generated via {} (score={}, messages={})",
                    self.client.name(),
                    report.score(),
                    options.transcript.len()
                );
                publish(observer, GenerationStatus::success(MSG_SUCCESS));
                Ok(report)
            }
            Err(e) => {
                error!("Report generation failed ({}): {}", e.kind(), e);
                publish(observer, GenerationStatus::failed(MSG_FAILED, e.to_string()));
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        options: &ReportOptions,
        observer: Option<&dyn StatusObserver>,
    ) -> Result<Report> {
        let prompt = ReportPrompt::build(options);

        publish(observer, GenerationStatus::loading(20, MSG_ANALYZING));
        let raw = self.client.request_structured_report(&prompt).await?;

        publish(observer, GenerationStatus::loading(60, MSG_PROCESSING));
        let draft = validate_report(&raw)?;

        Ok(Report::new(
            draft,
            options.timestamp.clone(),
            options.duration,
        ))
    }
}

fn publish(observer: Option<&dyn StatusObserver>, status: GenerationStatus) {
    if let Some(observer) = observer {
        observer.notify(&status);
    }
}
