//! Database repository for CRUD operations.
//!
//! Uses prepared statements with JSON-encoded columns for nested structures.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreateCommentRequest, CreateIdeaRequest, CreatePromptRequest, IdeaComment, SavedIdea,
    SavedPrompt, UpdateIdeaRequest, UpdatePromptRequest,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== PROMPT OPERATIONS ====================

    /// Create a new saved prompt.
    pub async fn create_prompt(
        &self,
        request: &CreatePromptRequest,
    ) -> Result<SavedPrompt, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let stack_json = serde_json::to_string(&request.detected_stack).unwrap_or_default();
        let dev_structure_json = request
            .dev_structure
            .as_ref()
            .map(|d| serde_json::to_string(d).unwrap_or_default());
        let infra_tools_json = request
            .infra_tools
            .as_ref()
            .map(|i| serde_json::to_string(i).unwrap_or_default());

        sqlx::query(
            r#"INSERT INTO prompts (
                id, created_at, updated_at, project_idea, detected_stack,
                recommended_tool, dev_structure, infra_tools, generated_prompt,
                final_prompt, is_finalized, user_session
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&now)
        .bind(&now)
        .bind(&request.project_idea)
        .bind(&stack_json)
        .bind(request.recommended_tool.name.as_str())
        .bind(&dev_structure_json)
        .bind(&infra_tools_json)
        .bind(&request.generated_prompt)
        .bind(&request.final_prompt)
        .bind(request.is_finalized as i32)
        .bind(&request.user_session)
        .execute(&self.pool)
        .await?;

        Ok(SavedPrompt {
            id,
            created_at: now.clone(),
            updated_at: now,
            project_idea: request.project_idea.clone(),
            detected_stack: request.detected_stack.clone(),
            recommended_tool: request.recommended_tool.name.as_str().to_string(),
            dev_structure: request.dev_structure.clone(),
            infra_tools: request.infra_tools.clone(),
            generated_prompt: request.generated_prompt.clone(),
            final_prompt: request.final_prompt.clone(),
            is_finalized: request.is_finalized,
            user_session: request.user_session.clone(),
        })
    }

    /// List all prompts for a session, newest first.
    pub async fn list_prompts(&self, session: &str) -> Result<Vec<SavedPrompt>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, created_at, updated_at, project_idea, detected_stack,
                      recommended_tool, dev_structure, infra_tools, generated_prompt,
                      final_prompt, is_finalized, user_session
               FROM prompts WHERE user_session = ?
               ORDER BY created_at DESC, rowid DESC"#,
        )
        .bind(session)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(prompt_from_row).collect())
    }

    /// Get a prompt by ID.
    pub async fn get_prompt(&self, id: &str) -> Result<Option<SavedPrompt>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, created_at, updated_at, project_idea, detected_stack,
                      recommended_tool, dev_structure, infra_tools, generated_prompt,
                      final_prompt, is_finalized, user_session
               FROM prompts WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(prompt_from_row))
    }

    /// Update a prompt's finalization state. Omitted fields keep their stored values.
    pub async fn update_prompt(
        &self,
        id: &str,
        request: &UpdatePromptRequest,
    ) -> Result<SavedPrompt, AppError> {
        let existing = self
            .get_prompt(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prompt {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let final_prompt = request
            .final_prompt
            .clone()
            .or(existing.final_prompt.clone());
        let is_finalized = request.is_finalized.unwrap_or(existing.is_finalized);

        sqlx::query(
            "UPDATE prompts SET final_prompt = ?, is_finalized = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&final_prompt)
        .bind(is_finalized as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(SavedPrompt {
            id: id.to_string(),
            created_at: existing.created_at,
            updated_at: now,
            project_idea: existing.project_idea,
            detected_stack: existing.detected_stack,
            recommended_tool: existing.recommended_tool,
            dev_structure: existing.dev_structure,
            infra_tools: existing.infra_tools,
            generated_prompt: existing.generated_prompt,
            final_prompt,
            is_finalized,
            user_session: existing.user_session,
        })
    }

    // ==================== IDEA OPERATIONS ====================

    /// Create a new idea. The title is resolved by the caller.
    pub async fn create_idea(
        &self,
        request: &CreateIdeaRequest,
        title: &str,
    ) -> Result<SavedIdea, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let tags_json = serde_json::to_string(&request.tags).unwrap_or_default();

        sqlx::query(
            r#"INSERT INTO ideas (id, title, description, category, tags, user_session, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(title)
        .bind(&request.description)
        .bind(&request.category)
        .bind(&tags_json)
        .bind(&request.user_session)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(SavedIdea {
            id,
            title: title.to_string(),
            description: request.description.clone(),
            category: request.category.clone(),
            tags: request.tags.clone(),
            user_session: request.user_session.clone(),
            created_at: now.clone(),
            updated_at: now,
            comments: Vec::new(),
        })
    }

    /// List all ideas for a session, newest first, with their comment threads.
    pub async fn list_ideas(&self, session: &str) -> Result<Vec<SavedIdea>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, description, category, tags, user_session, created_at, updated_at
               FROM ideas WHERE user_session = ?
               ORDER BY created_at DESC, rowid DESC"#,
        )
        .bind(session)
        .fetch_all(&self.pool)
        .await?;

        let mut ideas: Vec<SavedIdea> = rows.iter().map(idea_from_row).collect();

        // One query for all comment threads instead of one per idea
        let comment_rows = sqlx::query(
            r#"SELECT c.id, c.idea_id, c.content, c.user_session, c.created_at
               FROM comments c
               JOIN ideas i ON c.idea_id = i.id
               WHERE i.user_session = ?
               ORDER BY c.created_at, c.rowid"#,
        )
        .bind(session)
        .fetch_all(&self.pool)
        .await?;

        let mut by_idea: HashMap<String, Vec<IdeaComment>> = HashMap::new();
        for row in &comment_rows {
            let comment = comment_from_row(row);
            by_idea
                .entry(comment.idea_id.clone())
                .or_default()
                .push(comment);
        }

        for idea in &mut ideas {
            if let Some(comments) = by_idea.remove(&idea.id) {
                idea.comments = comments;
            }
        }

        Ok(ideas)
    }

    /// Get an idea by ID, with its comment thread.
    pub async fn get_idea(&self, id: &str) -> Result<Option<SavedIdea>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, description, category, tags, user_session, created_at, updated_at
               FROM ideas WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut idea = idea_from_row(&row);
                idea.comments = self.list_comments(id).await?;
                Ok(Some(idea))
            }
            None => Ok(None),
        }
    }

    /// Update an idea. Omitted fields keep their stored values.
    pub async fn update_idea(
        &self,
        id: &str,
        request: &UpdateIdeaRequest,
    ) -> Result<SavedIdea, AppError> {
        let existing = self
            .get_idea(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Idea {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let title = request.title.as_ref().unwrap_or(&existing.title);
        let description = request.description.as_ref().unwrap_or(&existing.description);
        let category = request.category.clone().or(existing.category.clone());
        let tags = request
            .tags
            .clone()
            .unwrap_or_else(|| existing.tags.clone());
        let tags_json = serde_json::to_string(&tags).unwrap_or_default();

        sqlx::query(
            "UPDATE ideas SET title = ?, description = ?, category = ?, tags = ?, updated_at = ? WHERE id = ?",
        )
        .bind(title)
        .bind(description)
        .bind(&category)
        .bind(&tags_json)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(SavedIdea {
            id: id.to_string(),
            title: title.clone(),
            description: description.clone(),
            category,
            tags,
            user_session: existing.user_session,
            created_at: existing.created_at,
            updated_at: now,
            comments: existing.comments,
        })
    }

    /// Delete an idea. Its comments cascade.
    pub async fn delete_idea(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM ideas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Idea {} not found", id)));
        }

        Ok(())
    }

    // ==================== COMMENT OPERATIONS ====================

    /// List comments for an idea, oldest first.
    pub async fn list_comments(&self, idea_id: &str) -> Result<Vec<IdeaComment>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, idea_id, content, user_session, created_at
               FROM comments WHERE idea_id = ?
               ORDER BY created_at, rowid"#,
        )
        .bind(idea_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(comment_from_row).collect())
    }

    /// Add a comment to an idea.
    pub async fn create_comment(
        &self,
        idea_id: &str,
        request: &CreateCommentRequest,
    ) -> Result<IdeaComment, AppError> {
        // Check the idea exists so an unknown id maps to NotFound rather than an FK failure
        let idea = sqlx::query("SELECT id FROM ideas WHERE id = ?")
            .bind(idea_id)
            .fetch_optional(&self.pool)
            .await?;
        if idea.is_none() {
            return Err(AppError::NotFound(format!("Idea {} not found", idea_id)));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO comments (id, idea_id, content, user_session, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(idea_id)
        .bind(&request.content)
        .bind(&request.user_session)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(IdeaComment {
            id,
            idea_id: idea_id.to_string(),
            content: request.content.clone(),
            user_session: request.user_session.clone(),
            created_at: now,
        })
    }

    /// Delete a comment. Deleting it again is NotFound, not a no-op.
    pub async fn delete_comment(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Comment {} not found", id)));
        }

        Ok(())
    }
}

// Helper functions for row conversion

fn prompt_from_row(row: &sqlx::sqlite::SqliteRow) -> SavedPrompt {
    let is_finalized: i32 = row.get("is_finalized");
    let stack_str: String = row.get("detected_stack");
    let dev_structure_str: Option<String> = row.get("dev_structure");
    let infra_tools_str: Option<String> = row.get("infra_tools");

    SavedPrompt {
        id: row.get("id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        project_idea: row.get("project_idea"),
        detected_stack: serde_json::from_str(&stack_str).unwrap_or_default(),
        recommended_tool: row.get("recommended_tool"),
        dev_structure: dev_structure_str.and_then(|s| serde_json::from_str(&s).ok()),
        infra_tools: infra_tools_str.and_then(|s| serde_json::from_str(&s).ok()),
        generated_prompt: row.get("generated_prompt"),
        final_prompt: row.get("final_prompt"),
        is_finalized: is_finalized != 0,
        user_session: row.get("user_session"),
    }
}

fn idea_from_row(row: &sqlx::sqlite::SqliteRow) -> SavedIdea {
    let tags_str: Option<String> = row.get("tags");

    SavedIdea {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: row.get("category"),
        tags: tags_str.map(|s| parse_json_array(&s)).unwrap_or_default(),
        user_session: row.get("user_session"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        comments: Vec::new(),
    }
}

fn comment_from_row(row: &sqlx::sqlite::SqliteRow) -> IdeaComment {
    IdeaComment {
        id: row.get("id"),
        idea_id: row.get("idea_id"),
        content: row.get("content"),
        user_session: row.get("user_session"),
        created_at: row.get("created_at"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
