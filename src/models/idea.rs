//! Idea bank models.

use serde::{Deserialize, Serialize};

/// Cap applied to derived idea titles.
pub const DEFAULT_TITLE_MAX_CHARS: usize = 100;

/// Maximum length of an idea comment, in characters.
pub const MAX_COMMENT_CHARS: usize = 500;

/// A saved project idea, returned with its comment thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedIdea {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub user_session: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub comments: Vec<IdeaComment>,
}

/// A comment attached to a saved idea.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaComment {
    pub id: String,
    pub idea_id: String,
    pub content: String,
    pub user_session: String,
    pub created_at: String,
}

/// Request body for saving an idea.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIdeaRequest {
    /// When absent, the title is derived from the description.
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub user_session: String,
}

/// Request body for updating an idea. Omitted fields keep their stored values.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIdeaRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Request body for adding a comment to an idea.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub user_session: String,
}

/// Derives an idea title from its description: the text before the first
/// period, trimmed and capped at `max_chars` characters.
///
/// Falls back to the capped description when the first sentence is empty.
pub fn derive_title(description: &str, max_chars: usize) -> String {
    let first_sentence = description
        .split('.')
        .next()
        .unwrap_or(description)
        .trim();

    let base = if first_sentence.is_empty() {
        description.trim()
    } else {
        first_sentence
    };

    base.chars().take(max_chars).collect()
}
