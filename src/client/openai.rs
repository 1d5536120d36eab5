//! OpenAI-compatible chat completions client
//!
//! Forces a single `generate_report` function call in JSON mode so the reply
//! carries one structured object in `choices[0].message.function_call.arguments`.
//! Works with any endpoint that speaks the same protocol (OpenAI, OpenRouter,
//! local gateways).

use super::ReportClient;
use crate::config::ModelConfig;
use crate::error::ReportError;
use crate::prompt::{report_parameters_schema, ReportPrompt, REPORT_FUNCTION_NAME};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

/// Connection and sampling settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl OpenAiSettings {
    pub fn from_config(config: &ModelConfig) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key()?,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
    functions: Vec<FunctionSpec>,
    function_call: FunctionChoice,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct FunctionSpec {
    name: &'static str,
    description: &'static str,
    parameters: Value,
}

#[derive(Serialize)]
struct FunctionChoice {
    name: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    function_call: Option<FunctionCall>,
}

#[derive(Deserialize)]
struct FunctionCall {
    arguments: String,
}

// ============================================================================
// Client
// ============================================================================

pub struct OpenAiClient {
    settings: OpenAiSettings,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(settings: OpenAiSettings) -> Self {
        Self {
            settings,
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'))
    }

    fn request_body<'a>(&'a self, prompt: &'a ReportPrompt) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            functions: vec![FunctionSpec {
                name: REPORT_FUNCTION_NAME,
                description: "Generate a report based on the conversation analysis",
                parameters: report_parameters_schema(),
            }],
            function_call: FunctionChoice {
                name: REPORT_FUNCTION_NAME,
            },
        }
    }
}

#[async_trait::async_trait]
impl ReportClient for OpenAiClient {
    async fn request_structured_report(&self, prompt: &ReportPrompt) -> Result<Value, ReportError> {
        let url = self.endpoint();
        info!("Requesting report from {} (model={})", url, self.settings.model);

        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| ReportError::transport(format!("request failed: {}", e)))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ReportError::transport(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            error!("Model service error details: {}", body);
            return Err(ReportError::upstream_status(
                status.as_u16(),
                format!(
                    "model service returned {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )
                .trim_end()
                .to_string(),
            ));
        }

        extract_arguments(&body)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Pull the function-call arguments out of a chat completions envelope
fn extract_arguments(body: &str) -> Result<Value, ReportError> {
    let envelope: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ReportError::transport(format!("malformed response envelope: {}", e)))?;

    let arguments = envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.function_call)
        .map(|call| call.arguments)
        .ok_or_else(|| ReportError::transport("missing structured payload in response"))?;

    debug!("Structured payload: {} bytes", arguments.len());

    let payload: Value = serde_json::from_str(&arguments)
        .map_err(|e| ReportError::MalformedPayload(format!("arguments are not valid JSON: {}", e)))?;

    if !payload.is_object() {
        return Err(ReportError::MalformedPayload(
            "arguments are not a JSON object".to_string(),
        ));
    }

    Ok(payload)
}
