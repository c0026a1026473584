//! Project-idea analysis.
//!
//! Turns a free-text project idea into a structured recommendation by
//! delegating text generation to a pluggable backend.

mod directive;
mod openai;

pub use openai::OpenAiBackend;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{AnalysisResult, AnalyzeRequest};

/// Text-generation backend used for project analysis.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Send a directive and return the raw structured-output text.
    async fn complete(&self, directive: &str) -> Result<String, AppError>;
}

/// Project analysis service.
pub struct AnalysisService {
    backend: Arc<dyn AnalysisBackend>,
}

impl AnalysisService {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    /// Analyze a project idea.
    ///
    /// When `custom_data` is present the prompt is rebuilt deterministically
    /// from the edited fields and no backend call is made.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, AppError> {
        if request.project_idea.trim().is_empty() {
            return Err(AppError::Validation("Project idea is required".to_string()));
        }

        if let Some(edited) = &request.custom_data {
            return Ok(directive::rebuild_result(&request.project_idea, edited));
        }

        let directive = directive::build_directive(&request.project_idea, request.language);

        tracing::debug!(backend = self.backend.name(), "requesting analysis");
        let raw = self.backend.complete(&directive).await?;

        parse_analysis(&raw)
    }
}

/// Validate the backend's raw output against the analysis result schema.
fn parse_analysis(raw: &str) -> Result<AnalysisResult, AppError> {
    let result: AnalysisResult = serde_json::from_str(raw)
        .map_err(|e| AppError::Malformed(format!("schema validation failed: {}", e)))?;

    if result.generated_prompt.trim().is_empty() {
        return Err(AppError::Malformed("generatedPrompt is empty".to_string()));
    }

    Ok(result)
}
