//! OpenAI-compatible analysis backend.
//!
//! Calls the chat completions endpoint with a JSON-schema response format so
//! replies arrive as structured output.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::AnalysisBackend;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{StructureKind, ToolKind};

/// Sampling temperature for analysis calls.
const TEMPERATURE: f64 = 0.7;

/// Response token budget for analysis calls.
const MAX_TOKENS: u32 = 2000;

const SYSTEM_DIRECTIVE: &str =
    "You are a software development expert who provides detailed project analysis and recommendations.";

/// Backend that calls an OpenAI-compatible chat completions API.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.analyze_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl AnalysisBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, directive: &str) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::Upstream("OPENAI_API_KEY is not set".to_string()))?;

        let body = json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "system", "content": SYSTEM_DIRECTIVE },
                { "role": "user", "content": directive }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "project_analysis",
                    "schema": analysis_schema()
                }
            }
        });

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Upstream("analysis request timed out".to_string())
                } else {
                    AppError::Upstream(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body_text
            )));
        }

        let chat: ChatResponse = serde_json::from_str(&body_text)
            .map_err(|e| AppError::Upstream(format!("unexpected response envelope: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::Upstream("response contained no content".to_string()))
    }
}

/// JSON schema the analysis service is constrained to.
///
/// `devStructure` and `infraTools` stay optional; a minimal reply without
/// them still conforms.
fn analysis_schema() -> serde_json::Value {
    let tool_names: Vec<&str> = ToolKind::ALL.iter().map(|t| t.as_str()).collect();
    let structure_names: Vec<&str> = StructureKind::ALL.iter().map(|k| k.as_str()).collect();

    json!({
        "type": "object",
        "properties": {
            "detectedStack": {
                "type": "object",
                "properties": {
                    "frontend": string_array(),
                    "backend": string_array(),
                    "database": string_array(),
                    "deployment": string_array(),
                    "additional": string_array()
                },
                "required": ["frontend", "backend", "database", "deployment", "additional"]
            },
            "recommendedTool": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "enum": tool_names },
                    "description": { "type": "string" },
                    "bestFor": string_array(),
                    "promptStyle": { "type": "string" }
                },
                "required": ["name", "description", "bestFor", "promptStyle"]
            },
            "devStructure": {
                "type": "object",
                "properties": {
                    "type": { "type": "string", "enum": structure_names },
                    "name": { "type": "string" },
                    "description": { "type": "string" },
                    "pros": string_array(),
                    "cons": string_array(),
                    "bestFor": string_array()
                },
                "required": ["type", "name", "description", "pros", "cons", "bestFor"]
            },
            "infraTools": {
                "type": "object",
                "properties": {
                    "containerization": string_array(),
                    "orchestration": string_array(),
                    "cicd": string_array(),
                    "monitoring": string_array(),
                    "hosting": string_array()
                },
                "required": ["containerization", "orchestration", "cicd", "monitoring", "hosting"]
            },
            "generatedPrompt": { "type": "string" },
            "reasoning": { "type": "string" }
        },
        "required": ["detectedStack", "recommendedTool", "generatedPrompt", "reasoning"]
    })
}

fn string_array() -> serde_json::Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

/// Chat completions response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
