//! Model service clients
//!
//! Each client turns a rendered prompt into the raw structured payload returned
//! by one model provider. Clients never retry and never validate the payload
//! against the report schema; both belong to the caller.

mod mock;
mod openai;
mod timeout;

pub use mock::{MockClient, MockProfile};
pub use openai::{OpenAiClient, OpenAiSettings};
pub use timeout::TimeoutClient;

use crate::config::{ModelConfig, ModelProvider};
use crate::error::ReportError;
use crate::prompt::ReportPrompt;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Capability to obtain a structured report payload from a model provider
#[async_trait::async_trait]
pub trait ReportClient: Send + Sync {
    /// Send one generation request and return the decoded structured object
    async fn request_structured_report(
        &self,
        prompt: &ReportPrompt,
    ) -> std::result::Result<serde_json::Value, ReportError>;

    /// Client name for logging
    fn name(&self) -> &str;
}

/// Report client factory
pub struct ClientFactory;

impl ClientFactory {
    /// Create the client selected by the model configuration
    pub fn create(config: &ModelConfig) -> Result<Arc<dyn ReportClient>> {
        let client: Arc<dyn ReportClient> = match config.provider {
            ModelProvider::OpenAi => {
                let settings = OpenAiSettings::from_config(config)?;
                Arc::new(OpenAiClient::new(settings))
            }
            ModelProvider::Mock => {
                let profile = MockProfile::parse(&config.mock_profile)?;
                Arc::new(MockClient::new(profile))
            }
        };

        info!("Report client: {}", client.name());

        match config.request_timeout_secs {
            Some(secs) => Ok(Arc::new(TimeoutClient::new(
                client,
                Duration::from_secs(secs),
            ))),
            None => Ok(client),
        }
    }
}
