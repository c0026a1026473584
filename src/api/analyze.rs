//! Project analysis API endpoint.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::models::{AnalysisResult, AnalyzeRequest};
use crate::AppState;

/// POST /api/analyze - Analyze a project idea.
pub async fn analyze_project(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<AnalysisResult> {
    let result = state.analysis.analyze(&request).await?;
    Ok(Json(result))
}
