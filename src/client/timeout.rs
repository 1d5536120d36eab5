use super::ReportClient;
use crate::error::ReportError;
use crate::prompt::ReportPrompt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Bounds a wrapped client's request latency
///
/// Expiry is reported as a transport failure. The in-flight request future is
/// dropped on expiry.
pub struct TimeoutClient {
    inner: Arc<dyn ReportClient>,
    limit: Duration,
}

impl TimeoutClient {
    pub fn new(inner: Arc<dyn ReportClient>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait::async_trait]
impl ReportClient for TimeoutClient {
    async fn request_structured_report(
        &self,
        prompt: &ReportPrompt,
    ) -> Result<serde_json::Value, ReportError> {
        match tokio::time::timeout(self.limit, self.inner.request_structured_report(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "{} request exceeded {:.1}s",
                    self.inner.name(),
                    self.limit.as_secs_f64()
                );
                Err(ReportError::transport(format!(
                    "model request timed out after {:.1}s",
                    self.limit.as_secs_f64()
                )))
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct SlowClient {
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl ReportClient for SlowClient {
        async fn request_structured_report(
            &self,
            _prompt: &ReportPrompt,
        ) -> Result<serde_json::Value, ReportError> {
            tokio::time::sleep(self.delay).await;
            Ok(json!({ "score": 1 }))
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    fn prompt() -> ReportPrompt {
        ReportPrompt {
            system: "s".into(),
            user: "u".into(),
        }
    }

    #[tokio::test]
    async fn test_expiry_maps_to_transport() {
        let client = TimeoutClient::new(
            Arc::new(SlowClient {
                delay: Duration::from_secs(10),
            }),
            Duration::from_millis(50),
        );
        let err = client.request_structured_report(&prompt()).await.unwrap_err();
        assert!(matches!(err, ReportError::Transport { status: None, .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_fast_request_passes_through() {
        let client = TimeoutClient::new(
            Arc::new(SlowClient {
                delay: Duration::from_millis(1),
            }),
            Duration::from_secs(5),
        );
        let value = client.request_structured_report(&prompt()).await.unwrap();
        assert_eq!(value["score"], 1);
    }
}
