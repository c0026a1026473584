//! Idea comment API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{ApiResult, MessageResponse};
use crate::errors::AppError;
use crate::models::{CreateCommentRequest, IdeaComment, MAX_COMMENT_CHARS};
use crate::AppState;

/// GET /api/ideas/{id}/comments - List comments for an idea, oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<IdeaComment>> {
    let comments = state.repo.list_comments(&id).await?;
    Ok(Json(comments))
}

/// POST /api/ideas/{id}/comments - Add a comment to an idea.
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<IdeaComment> {
    // Validate required fields
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("Content is required".to_string()));
    }
    if request.content.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::Validation(format!(
            "Content exceeds {} characters",
            MAX_COMMENT_CHARS
        )));
    }
    if request.user_session.trim().is_empty() {
        return Err(AppError::Validation("User session is required".to_string()));
    }

    let comment = state.repo.create_comment(&id, &request).await?;
    Ok(Json(comment))
}

/// DELETE /api/comments/{id} - Delete a comment.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    state.repo.delete_comment(&id).await?;
    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
