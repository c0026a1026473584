//! Directive construction for analysis calls.
//!
//! Directive text is localized; the structured fields are always requested in
//! English so stored results stay uniform.

use crate::models::{AnalysisResult, EditedAnalysis, Language, StructureKind, ToolKind};

/// Fixed infrastructure tool categories listed in directives.
const INFRA_CATEGORIES: &str = "- containerization: Docker, Podman, etc.
- orchestration: Docker Compose, Kubernetes, etc.
- cicd: GitHub Actions, GitLab CI, Jenkins, etc.
- monitoring: Prometheus, Grafana, Sentry, etc.
- hosting: Vercel, Netlify, AWS, GCP, etc.";

/// Build the user directive for a project-idea analysis.
pub fn build_directive(project_idea: &str, language: Language) -> String {
    let guidelines = tool_guidelines(language);
    let structures = structure_options();

    match language {
        Language::En => format!(
            "You are a software development expert. Please analyze the following project idea and provide recommendations:\n\n\
             Project idea: \"{project_idea}\"\n\n\
             Please analyze the following:\n\
             1. The most suitable tech stack (including specific frameworks/libraries)\n\
             2. The best AI coding tool for this project\n\
             3. The recommended development structure\n\
             4. The recommended infrastructure tools\n\
             5. Generate a detailed, actionable prompt tailored to the selected tool's style\n\n\
             AI Tool Guidelines:\n{guidelines}\n\n\
             Development Structure Options:\n{structures}\n\n\
             Infrastructure Tool Categories:\n{INFRA_CATEGORIES}\n\n\
             The generated prompt should be detailed, specific, and actionable for the chosen tool.\n\
             Include specific requirements, tech stack, features, and UI/UX considerations.\n\n\
             Please respond in English."
        ),
        Language::Ko => format!(
            "당신은 소프트웨어 개발 전문가입니다. 다음 프로젝트 아이디어를 분석하고 추천사항을 제공해주세요:\n\n\
             프로젝트 아이디어: \"{project_idea}\"\n\n\
             다음 사항들을 분석해주세요:\n\
             1. 가장 적합한 기술 스택 (구체적인 프레임워크/라이브러리 포함)\n\
             2. 이 프로젝트에 가장 적합한 AI 코딩 도구\n\
             3. 권장 개발 구조\n\
             4. 권장 인프라 도구\n\
             5. 선택한 도구의 스타일에 맞춘 상세하고 실행 가능한 프롬프트 생성\n\n\
             AI 도구 가이드라인:\n{guidelines}\n\n\
             Development Structure Options:\n{structures}\n\n\
             Infrastructure Tool Categories:\n{INFRA_CATEGORIES}\n\n\
             생성된 프롬프트는 상세하고 구체적이며 선택한 도구에서 실행 가능해야 합니다.\n\
             구체적인 요구사항, 기술 스택, 기능, UI/UX 고려사항을 포함해주세요.\n\n\
             응답은 반드시 영어로 작성해주세요."
        ),
    }
}

/// Rebuild an analysis result from user-edited fields without a backend call.
///
/// The reasoning is fixed so callers can tell a rebuilt result from a fresh
/// analysis.
pub fn rebuild_result(project_idea: &str, edited: &EditedAnalysis) -> AnalysisResult {
    let stack = &edited.detected_stack;
    let tool = &edited.recommended_tool;

    let mut prompt = format!(
        "Create a {} application using the following specifications:\n\n\
         **Tech Stack:**\n\
         - Frontend: {}\n\
         - Backend: {}\n\
         - Database: {}\n\
         - Additional: {}\n\n\
         **Recommended AI Tool:** {}\n{}",
        project_idea,
        stack.frontend.join(", "),
        stack.backend.join(", "),
        stack.database.join(", "),
        stack.additional.join(", "),
        tool.name.as_str(),
        tool.description,
    );

    if let Some(structure) = &edited.dev_structure {
        prompt.push_str(&format!(
            "\n\n**Development Structure:** {}\n{}",
            structure.name, structure.description
        ));
    }

    if let Some(infra) = &edited.infra_tools {
        prompt.push_str(&format!(
            "\n\n**Infrastructure:**\n\
             - Containerization: {}\n\
             - Orchestration: {}\n\
             - CI/CD: {}\n\
             - Monitoring: {}\n\
             - Hosting: {}",
            infra.containerization.join(", "),
            infra.orchestration.join(", "),
            infra.cicd.join(", "),
            infra.monitoring.join(", "),
            infra.hosting.join(", "),
        ));
    }

    prompt.push_str(
        "\n\n**Requirements:**\n\
         1. Implement the core functionality described in the project idea\n\
         2. Set up the recommended development structure\n\
         3. Configure the suggested infrastructure tools\n\
         4. Include proper error handling and validation\n\
         5. Add comprehensive documentation\n\n\
         **Deliverables:**\n\
         - Complete application code\n\
         - Infrastructure configuration files\n\
         - Development setup instructions\n\
         - Deployment guide\n\n\
         Please provide a detailed implementation plan and code structure.",
    );

    AnalysisResult {
        detected_stack: edited.detected_stack.clone(),
        recommended_tool: edited.recommended_tool.clone(),
        dev_structure: edited.dev_structure.clone(),
        infra_tools: edited.infra_tools.clone(),
        generated_prompt: prompt,
        reasoning: "Generated prompt based on user-edited specifications".to_string(),
    }
}

fn tool_guidelines(language: Language) -> String {
    ToolKind::ALL
        .iter()
        .map(|tool| format!("- {}: {}", tool.as_str(), tool.guidance(language)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn structure_options() -> String {
    StructureKind::ALL
        .iter()
        .map(|kind| format!("- {}: {}", kind.as_str(), kind.summary()))
        .collect::<Vec<_>>()
        .join("\n")
}
