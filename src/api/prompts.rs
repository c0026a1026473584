//! Saved prompt API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{ApiResult, SessionQuery};
use crate::errors::AppError;
use crate::models::{CreatePromptRequest, SavedPrompt, UpdatePromptRequest};
use crate::AppState;

/// POST /api/prompts - Save a generated prompt.
pub async fn create_prompt(
    State(state): State<AppState>,
    Json(request): Json<CreatePromptRequest>,
) -> ApiResult<SavedPrompt> {
    // Validate required fields
    if request.project_idea.trim().is_empty() {
        return Err(AppError::Validation("Project idea is required".to_string()));
    }
    if request.user_session.trim().is_empty() {
        return Err(AppError::Validation("User session is required".to_string()));
    }

    let prompt = state.repo.create_prompt(&request).await?;
    Ok(Json(prompt))
}

/// GET /api/prompts?session= - List prompts for a session, newest first.
pub async fn list_prompts(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<Vec<SavedPrompt>> {
    let prompts = state.repo.list_prompts(&query.session).await?;
    Ok(Json(prompts))
}

/// PUT /api/prompts/{id} - Update a prompt's finalization state.
pub async fn update_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePromptRequest>,
) -> ApiResult<SavedPrompt> {
    let prompt = state.repo.update_prompt(&id, &request).await?;
    Ok(Json(prompt))
}
