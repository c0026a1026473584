//! Saved prompt models.

use serde::{Deserialize, Serialize};

use crate::models::analysis::{AiTool, DevStructure, InfraTools, TechStack};

/// A persisted prompt produced from an analysis run.
///
/// Serialized in snake_case to match the stored-entity shape clients read
/// back; the create/update request bodies stay camelCase like the analysis
/// contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPrompt {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub project_idea: String,
    pub detected_stack: TechStack,
    pub recommended_tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_structure: Option<DevStructure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infra_tools: Option<InfraTools>,
    pub generated_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_prompt: Option<String>,
    pub is_finalized: bool,
    pub user_session: String,
}

/// Request body for saving a prompt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromptRequest {
    pub project_idea: String,
    pub detected_stack: TechStack,
    pub recommended_tool: AiTool,
    #[serde(default)]
    pub dev_structure: Option<DevStructure>,
    #[serde(default)]
    pub infra_tools: Option<InfraTools>,
    pub generated_prompt: String,
    #[serde(default)]
    pub final_prompt: Option<String>,
    #[serde(default)]
    pub is_finalized: bool,
    pub user_session: String,
}

/// Request body for updating a prompt's finalization state.
///
/// Omitted fields keep their stored values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromptRequest {
    #[serde(default)]
    pub final_prompt: Option<String>,
    #[serde(default)]
    pub is_finalized: Option<bool>,
}
