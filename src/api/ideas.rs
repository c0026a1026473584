//! Idea bank API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{ApiResult, MessageResponse, SessionQuery};
use crate::errors::AppError;
use crate::models::{
    derive_title, CreateIdeaRequest, SavedIdea, UpdateIdeaRequest, DEFAULT_TITLE_MAX_CHARS,
};
use crate::AppState;

/// POST /api/ideas - Save a new idea.
pub async fn create_idea(
    State(state): State<AppState>,
    Json(request): Json<CreateIdeaRequest>,
) -> ApiResult<SavedIdea> {
    // Validate required fields
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }
    if request.user_session.trim().is_empty() {
        return Err(AppError::Validation("User session is required".to_string()));
    }

    // Derive a title from the description when none is provided
    let title = match &request.title {
        Some(title) if !title.trim().is_empty() => title.clone(),
        _ => derive_title(&request.description, DEFAULT_TITLE_MAX_CHARS),
    };

    let idea = state.repo.create_idea(&request, &title).await?;
    Ok(Json(idea))
}

/// GET /api/ideas?session= - List ideas for a session, newest first.
pub async fn list_ideas(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<Vec<SavedIdea>> {
    let ideas = state.repo.list_ideas(&query.session).await?;
    Ok(Json(ideas))
}

/// PUT /api/ideas/{id} - Update an idea.
pub async fn update_idea(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateIdeaRequest>,
) -> ApiResult<SavedIdea> {
    let idea = state.repo.update_idea(&id, &request).await?;
    Ok(Json(idea))
}

/// DELETE /api/ideas/{id} - Delete an idea and its comments.
pub async fn delete_idea(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    state.repo.delete_idea(&id).await?;
    Ok(Json(MessageResponse::new("Idea deleted successfully")))
}
