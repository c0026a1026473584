//! Analysis contract models matching the frontend AnalysisResult interface.

use serde::{Deserialize, Serialize};

/// The fixed set of supported AI coding-assistant tools.
///
/// Modeled as a closed enum so prompt-styling logic is an exhaustive match
/// instead of string comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ToolKind {
    #[serde(rename = "v0.dev")]
    V0Dev,
    #[serde(rename = "Cursor.ai")]
    CursorAi,
    #[serde(rename = "GPT Engineer")]
    GptEngineer,
    #[serde(rename = "Claude Dev")]
    ClaudeDev,
}

impl ToolKind {
    /// All supported tools, in the order they appear in directives.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::V0Dev,
        ToolKind::CursorAi,
        ToolKind::GptEngineer,
        ToolKind::ClaudeDev,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::V0Dev => "v0.dev",
            ToolKind::CursorAi => "Cursor.ai",
            ToolKind::GptEngineer => "GPT Engineer",
            ToolKind::ClaudeDev => "Claude Dev",
        }
    }

    /// Selection guidance for this tool, in the requested directive language.
    pub fn guidance(&self, language: Language) -> &'static str {
        match (self, language) {
            (ToolKind::V0Dev, Language::En) => {
                "Best for React/Next.js UI components, requires specific component requests"
            }
            (ToolKind::CursorAi, Language::En) => {
                "Best for full-stack applications, prefers detailed file structure"
            }
            (ToolKind::GptEngineer, Language::En) => {
                "Best for complete applications from scratch, likes high-level descriptions"
            }
            (ToolKind::ClaudeDev, Language::En) => {
                "Best for complex logic and architecture, prefers step-by-step breakdowns"
            }
            (ToolKind::V0Dev, Language::Ko) => {
                "React/Next.js UI 컴포넌트에 최적화, 구체적인 컴포넌트 요청 필요"
            }
            (ToolKind::CursorAi, Language::Ko) => {
                "풀스택 애플리케이션에 최적화, 상세한 파일 구조 선호"
            }
            (ToolKind::GptEngineer, Language::Ko) => {
                "처음부터 완전한 애플리케이션 구축에 최적화, 고수준 설명 선호"
            }
            (ToolKind::ClaudeDev, Language::Ko) => {
                "복잡한 로직과 아키텍처에 최적화, 단계별 분석 선호"
            }
        }
    }
}

/// Directive language for the analysis call.
///
/// The directive text is localized, but both locales instruct the service to
/// emit the structured fields in English.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "ko")]
    Ko,
}

/// Detected technology stack grouped by category.
///
/// No uniqueness constraint; duplicates are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TechStack {
    #[serde(default)]
    pub frontend: Vec<String>,
    #[serde(default)]
    pub backend: Vec<String>,
    #[serde(default)]
    pub database: Vec<String>,
    #[serde(default)]
    pub deployment: Vec<String>,
    #[serde(default)]
    pub additional: Vec<String>,
}

/// A recommended AI coding-assistant tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiTool {
    pub name: ToolKind,
    pub description: String,
    #[serde(default)]
    pub best_for: Vec<String>,
    pub prompt_style: String,
}

/// Supported development structure types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StructureKind {
    Monorepo,
    Microservices,
    Separated,
    SingleRepo,
}

impl StructureKind {
    pub const ALL: [StructureKind; 4] = [
        StructureKind::Monorepo,
        StructureKind::Microservices,
        StructureKind::Separated,
        StructureKind::SingleRepo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StructureKind::Monorepo => "monorepo",
            StructureKind::Microservices => "microservices",
            StructureKind::Separated => "separated",
            StructureKind::SingleRepo => "single-repo",
        }
    }

    /// One-line summary used when listing structure options in directives.
    pub fn summary(&self) -> &'static str {
        match self {
            StructureKind::Monorepo => "Managing multiple projects/packages in a single repository",
            StructureKind::Microservices => "Architecture separated into independent services",
            StructureKind::Separated => "Complete separation of frontend/backend",
            StructureKind::SingleRepo => "Traditional single application structure",
        }
    }
}

/// Recommended development structure (optional enrichment).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevStructure {
    #[serde(rename = "type")]
    pub kind: StructureKind,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub best_for: Vec<String>,
}

/// Recommended infrastructure tools grouped by category (optional enrichment).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InfraTools {
    #[serde(default)]
    pub containerization: Vec<String>,
    #[serde(default)]
    pub orchestration: Vec<String>,
    #[serde(default)]
    pub cicd: Vec<String>,
    #[serde(default)]
    pub monitoring: Vec<String>,
    #[serde(default)]
    pub hosting: Vec<String>,
}

/// The structured output of a project-idea analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub detected_stack: TechStack,
    pub recommended_tool: AiTool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_structure: Option<DevStructure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infra_tools: Option<InfraTools>,
    pub generated_prompt: String,
    pub reasoning: String,
}

/// Request body for analyzing a project idea.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub project_idea: String,
    #[serde(default)]
    pub language: Language,
    /// When present, the generated prompt is rebuilt from these edited fields
    /// without calling the analysis service.
    #[serde(default)]
    pub custom_data: Option<EditedAnalysis>,
}

/// User-edited analysis fields for deterministic prompt regeneration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditedAnalysis {
    pub detected_stack: TechStack,
    pub recommended_tool: AiTool,
    #[serde(default)]
    pub dev_structure: Option<DevStructure>,
    #[serde(default)]
    pub infra_tools: Option<InfraTools>,
}
