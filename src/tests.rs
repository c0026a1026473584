//! Integration tests for the Promptify backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::analysis::{AnalysisBackend, AnalysisService};
use crate::db::{init_database, Repository};
use crate::errors::AppError;
use crate::{create_router, AppState};

/// Canned analysis output used by the default fixture.
const VALID_ANALYSIS: &str = r#"{
    "detectedStack": {
        "frontend": ["React", "Next.js"],
        "backend": ["Node.js"],
        "database": ["PostgreSQL"],
        "deployment": ["Vercel"],
        "additional": ["Socket.io"]
    },
    "recommendedTool": {
        "name": "Cursor.ai",
        "description": "Optimal for full-stack development",
        "bestFor": ["Full-stack Apps", "Complex Logic"],
        "promptStyle": "Detailed file structure"
    },
    "generatedPrompt": "Create a real-time chat application using React and Node.js.",
    "reasoning": "Full-stack scope with real-time features fits Cursor.ai"
}"#;

/// Analysis backend that replays a scripted response and counts calls.
struct ScriptedBackend {
    response: Result<&'static str, &'static str>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    fn new(response: Result<&'static str, &'static str>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl AnalysisBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, _directive: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.response {
            Ok(body) => Ok(body.to_string()),
            Err(message) => Err(AppError::Upstream(message.to_string())),
        }
    }
}

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    backend: Arc<ScriptedBackend>,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_analysis(Ok(VALID_ANALYSIS)).await
    }

    async fn with_analysis(response: Result<&'static str, &'static str>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        // Scripted analysis backend
        let backend = ScriptedBackend::new(response);
        let analysis = Arc::new(AnalysisService::new(backend.clone()));

        let state = AppState { repo, analysis };
        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            backend,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn analysis_calls(&self) -> usize {
        self.backend.calls.load(Ordering::SeqCst)
    }
}

/// Request body for saving a prompt.
fn prompt_body(project_idea: &str, session: &str) -> Value {
    json!({
        "projectIdea": project_idea,
        "detectedStack": {
            "frontend": ["Next.js"],
            "backend": ["FastAPI"],
            "database": ["PostgreSQL"],
            "deployment": [],
            "additional": []
        },
        "recommendedTool": {
            "name": "Cursor.ai",
            "description": "Optimal for full-stack development",
            "bestFor": ["Full-stack Apps"],
            "promptStyle": "Detailed file structure"
        },
        "generatedPrompt": "Build the application step by step.",
        "userSession": session
    })
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_analyze_project() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/analyze"))
        .json(&json!({ "projectIdea": "A real-time chat app with rooms" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["recommendedTool"]["name"], "Cursor.ai");
    assert_eq!(body["detectedStack"]["frontend"][0], "React");
    assert!(!body["generatedPrompt"].as_str().unwrap().is_empty());
    assert_eq!(body["reasoning"], "Full-stack scope with real-time features fits Cursor.ai");
    assert_eq!(fixture.analysis_calls(), 1);
}

#[tokio::test]
async fn test_analyze_rejects_blank_idea() {
    let fixture = TestFixture::new().await;

    for idea in ["", "   "] {
        let resp = fixture
            .client
            .post(fixture.url("/api/analyze"))
            .json(&json!({ "projectIdea": idea }))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Project idea is required");
    }

    // Rejected before any backend call
    assert_eq!(fixture.analysis_calls(), 0);
}

#[tokio::test]
async fn test_analyze_upstream_failure() {
    let fixture = TestFixture::with_analysis(Err("connection refused")).await;

    let resp = fixture
        .client
        .post(fixture.url("/api/analyze"))
        .json(&json!({ "projectIdea": "A chat app" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to analyze project");
    assert_eq!(body["details"], "analysis service request failed");
    // The raw cause stays out of the response
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_analyze_malformed_result() {
    let fixture = TestFixture::with_analysis(Ok("not even json")).await;

    let resp = fixture
        .client
        .post(fixture.url("/api/analyze"))
        .json(&json!({ "projectIdea": "A chat app" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to analyze project");
    assert_eq!(body["details"], "analysis service returned a malformed result");
}

#[tokio::test]
async fn test_analyze_rejects_unknown_tool() {
    // Structurally valid JSON, but the tool is outside the supported set
    let fixture = TestFixture::with_analysis(Ok(
        r#"{
            "detectedStack": {},
            "recommendedTool": {
                "name": "Copilot",
                "description": "Not one of ours",
                "bestFor": [],
                "promptStyle": "Freeform"
            },
            "generatedPrompt": "Build it.",
            "reasoning": "n/a"
        }"#,
    ))
    .await;

    let resp = fixture
        .client
        .post(fixture.url("/api/analyze"))
        .json(&json!({ "projectIdea": "A chat app" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["details"], "analysis service returned a malformed result");
}

#[tokio::test]
async fn test_analyze_with_custom_data() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/analyze"))
        .json(&json!({
            "projectIdea": "A kanban board",
            "customData": {
                "detectedStack": {
                    "frontend": ["Svelte"],
                    "backend": ["Axum"],
                    "database": ["SQLite"],
                    "deployment": [],
                    "additional": []
                },
                "recommendedTool": {
                    "name": "Claude Dev",
                    "description": "Best for complex logic",
                    "bestFor": ["Architecture"],
                    "promptStyle": "Step-by-step"
                }
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let prompt = body["generatedPrompt"].as_str().unwrap();
    assert!(prompt.contains("Svelte"));
    assert!(prompt.contains("Claude Dev"));
    assert_eq!(
        body["reasoning"],
        "Generated prompt based on user-edited specifications"
    );

    // Rebuilt locally, no analysis call
    assert_eq!(fixture.analysis_calls(), 0);
}

#[tokio::test]
async fn test_prompt_create_and_list() {
    let fixture = TestFixture::new().await;

    // Save a prompt
    let create_resp = fixture
        .client
        .post(fixture.url("/api/prompts"))
        .json(&prompt_body("A recipe sharing platform", "session-1"))
        .send()
        .await
        .unwrap();

    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    assert!(!create_body["id"].as_str().unwrap().is_empty());
    assert_eq!(create_body["project_idea"], "A recipe sharing platform");
    assert_eq!(create_body["recommended_tool"], "Cursor.ai");
    assert_eq!(create_body["is_finalized"], false);
    assert_eq!(create_body["user_session"], "session-1");

    // List for the session
    let list_resp = fixture
        .client
        .get(fixture.url("/api/prompts?session=session-1"))
        .send()
        .await
        .unwrap();

    assert_eq!(list_resp.status(), 200);
    let list_body: Value = list_resp.json().await.unwrap();
    let prompts = list_body.as_array().unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0]["id"], create_body["id"]);
    assert_eq!(prompts[0]["detected_stack"]["frontend"][0], "Next.js");

    // Other sessions see nothing
    let other_resp = fixture
        .client
        .get(fixture.url("/api/prompts?session=someone-else"))
        .send()
        .await
        .unwrap();
    let other_body: Value = other_resp.json().await.unwrap();
    assert!(other_body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_prompts_listed_newest_first() {
    let fixture = TestFixture::new().await;

    for idea in ["First idea", "Second idea"] {
        let resp = fixture
            .client
            .post(fixture.url("/api/prompts"))
            .json(&prompt_body(idea, "session-1"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let list_resp = fixture
        .client
        .get(fixture.url("/api/prompts?session=session-1"))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    let prompts = list_body.as_array().unwrap();

    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0]["project_idea"], "Second idea");
    assert_eq!(prompts[1]["project_idea"], "First idea");
}

#[tokio::test]
async fn test_update_prompt_finalize() {
    let fixture = TestFixture::new().await;

    let create_resp = fixture
        .client
        .post(fixture.url("/api/prompts"))
        .json(&prompt_body("An expense tracker", "session-1"))
        .send()
        .await
        .unwrap();
    let create_body: Value = create_resp.json().await.unwrap();
    let prompt_id = create_body["id"].as_str().unwrap();

    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    // Finalize with an edited prompt
    let update_resp = fixture
        .client
        .put(fixture.url(&format!("/api/prompts/{}", prompt_id)))
        .json(&json!({ "finalPrompt": "Final edited prompt", "isFinalized": true }))
        .send()
        .await
        .unwrap();

    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["final_prompt"], "Final edited prompt");
    assert_eq!(update_body["is_finalized"], true);
    assert_eq!(update_body["generated_prompt"], create_body["generated_prompt"]);

    let created = DateTime::parse_from_rfc3339(create_body["created_at"].as_str().unwrap()).unwrap();
    let updated = DateTime::parse_from_rfc3339(update_body["updated_at"].as_str().unwrap()).unwrap();
    assert!(updated > created);

    // Omitted fields keep their stored values
    let partial_resp = fixture
        .client
        .put(fixture.url(&format!("/api/prompts/{}", prompt_id)))
        .json(&json!({ "finalPrompt": "Adjusted prompt" }))
        .send()
        .await
        .unwrap();
    let partial_body: Value = partial_resp.json().await.unwrap();
    assert_eq!(partial_body["final_prompt"], "Adjusted prompt");
    assert_eq!(partial_body["is_finalized"], true);
}

#[tokio::test]
async fn test_update_prompt_not_found() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .put(fixture.url("/api/prompts/missing-id"))
        .json(&json!({ "isFinalized": true }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Prompt missing-id not found");
}

#[tokio::test]
async fn test_create_prompt_validation() {
    let fixture = TestFixture::new().await;

    // Blank project idea
    let resp = fixture
        .client
        .post(fixture.url("/api/prompts"))
        .json(&prompt_body("   ", "session-1"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Project idea is required");

    // Blank session
    let resp2 = fixture
        .client
        .post(fixture.url("/api/prompts"))
        .json(&prompt_body("A chat app", "  "))
        .send()
        .await
        .unwrap();

    assert_eq!(resp2.status(), 400);
    let body2: Value = resp2.json().await.unwrap();
    assert_eq!(body2["error"], "User session is required");
}

#[tokio::test]
async fn test_idea_crud() {
    let fixture = TestFixture::new().await;

    // Create without an explicit title
    let create_resp = fixture
        .client
        .post(fixture.url("/api/ideas"))
        .json(&json!({
            "description": "Build a chat app. Real-time messaging with rooms.",
            "tags": ["chat", "realtime"],
            "user_session": "session-1"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    let idea_id = create_body["id"].as_str().unwrap();
    assert_eq!(create_body["title"], "Build a chat app");
    assert_eq!(create_body["tags"][0], "chat");
    assert!(create_body["comments"].as_array().unwrap().is_empty());

    // List
    let list_resp = fixture
        .client
        .get(fixture.url("/api/ideas?session=session-1"))
        .send()
        .await
        .unwrap();

    assert_eq!(list_resp.status(), 200);
    let list_body: Value = list_resp.json().await.unwrap();
    assert_eq!(list_body.as_array().unwrap().len(), 1);

    // Update the title only
    let update_resp = fixture
        .client
        .put(fixture.url(&format!("/api/ideas/{}", idea_id)))
        .json(&json!({ "title": "Chat rooms MVP" }))
        .send()
        .await
        .unwrap();

    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["title"], "Chat rooms MVP");
    assert_eq!(
        update_body["description"],
        "Build a chat app. Real-time messaging with rooms."
    );

    // Delete
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/ideas/{}", idea_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(delete_resp.status(), 200);
    let delete_body: Value = delete_resp.json().await.unwrap();
    assert_eq!(delete_body["message"], "Idea deleted successfully");

    // Verify deleted
    let after_resp = fixture
        .client
        .get(fixture.url("/api/ideas?session=session-1"))
        .send()
        .await
        .unwrap();
    let after_body: Value = after_resp.json().await.unwrap();
    assert!(after_body.as_array().unwrap().is_empty());

    // Deleting again is NotFound
    let again_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/ideas/{}", idea_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(again_resp.status(), 404);
}

#[tokio::test]
async fn test_idea_title_fallbacks() {
    let fixture = TestFixture::new().await;

    // Explicit title wins
    let resp = fixture
        .client
        .post(fixture.url("/api/ideas"))
        .json(&json!({
            "title": "Custom name",
            "description": "Something. Else entirely.",
            "user_session": "session-1"
        }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["title"], "Custom name");

    // Blank title falls back to the first sentence
    let resp2 = fixture
        .client
        .post(fixture.url("/api/ideas"))
        .json(&json!({
            "title": "   ",
            "description": "A todo list. With reminders.",
            "user_session": "session-1"
        }))
        .send()
        .await
        .unwrap();
    let body2: Value = resp2.json().await.unwrap();
    assert_eq!(body2["title"], "A todo list");
}

#[tokio::test]
async fn test_ideas_scoped_by_session() {
    let fixture = TestFixture::new().await;

    for (description, session) in [
        ("First idea", "session-1"),
        ("Second idea", "session-1"),
        ("Other idea", "session-2"),
    ] {
        let resp = fixture
            .client
            .post(fixture.url("/api/ideas"))
            .json(&json!({ "description": description, "user_session": session }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    // Newest first, other sessions excluded
    let list_resp = fixture
        .client
        .get(fixture.url("/api/ideas?session=session-1"))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    let ideas = list_body.as_array().unwrap();

    assert_eq!(ideas.len(), 2);
    assert_eq!(ideas[0]["title"], "Second idea");
    assert_eq!(ideas[1]["title"], "First idea");
}

#[tokio::test]
async fn test_idea_validation() {
    let fixture = TestFixture::new().await;

    // Empty description
    let resp = fixture
        .client
        .post(fixture.url("/api/ideas"))
        .json(&json!({ "description": "", "user_session": "session-1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Description is required");

    // Blank session
    let resp2 = fixture
        .client
        .post(fixture.url("/api/ideas"))
        .json(&json!({ "description": "An idea", "user_session": "   " }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp2.status(), 400);

    // Update of a non-existent idea
    let resp3 = fixture
        .client
        .put(fixture.url("/api/ideas/missing-id"))
        .json(&json!({ "title": "New title" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp3.status(), 404);
}

#[tokio::test]
async fn test_comment_flow() {
    let fixture = TestFixture::new().await;

    // Create an idea to comment on
    let idea_resp = fixture
        .client
        .post(fixture.url("/api/ideas"))
        .json(&json!({ "description": "A journaling app", "user_session": "session-1" }))
        .send()
        .await
        .unwrap();
    let idea_body: Value = idea_resp.json().await.unwrap();
    let idea_id = idea_body["id"].as_str().unwrap();

    // Add two comments
    let c1_resp = fixture
        .client
        .post(fixture.url(&format!("/api/ideas/{}/comments", idea_id)))
        .json(&json!({ "content": "Consider offline support", "user_session": "session-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(c1_resp.status(), 200);
    let c1: Value = c1_resp.json().await.unwrap();
    assert_eq!(c1["idea_id"], idea_id);

    let c2_resp = fixture
        .client
        .post(fixture.url(&format!("/api/ideas/{}/comments", idea_id)))
        .json(&json!({ "content": "Markdown export would be nice", "user_session": "session-2" }))
        .send()
        .await
        .unwrap();
    let c2: Value = c2_resp.json().await.unwrap();

    // Listed oldest first
    let list_resp = fixture
        .client
        .get(fixture.url(&format!("/api/ideas/{}/comments", idea_id)))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    let comments = list_body.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["id"], c1["id"]);
    assert_eq!(comments[1]["id"], c2["id"]);

    // The idea list embeds the thread
    let ideas_resp = fixture
        .client
        .get(fixture.url("/api/ideas?session=session-1"))
        .send()
        .await
        .unwrap();
    let ideas_body: Value = ideas_resp.json().await.unwrap();
    assert_eq!(ideas_body[0]["comments"].as_array().unwrap().len(), 2);

    // Delete the first comment
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/comments/{}", c1["id"].as_str().unwrap())))
        .send()
        .await
        .unwrap();

    assert_eq!(delete_resp.status(), 200);
    let delete_body: Value = delete_resp.json().await.unwrap();
    assert_eq!(delete_body["message"], "Comment deleted successfully");

    // Deleting the same comment again is NotFound
    let again_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/comments/{}", c1["id"].as_str().unwrap())))
        .send()
        .await
        .unwrap();
    assert_eq!(again_resp.status(), 404);
}

#[tokio::test]
async fn test_comment_validation() {
    let fixture = TestFixture::new().await;

    let idea_resp = fixture
        .client
        .post(fixture.url("/api/ideas"))
        .json(&json!({ "description": "A habit tracker", "user_session": "session-1" }))
        .send()
        .await
        .unwrap();
    let idea_body: Value = idea_resp.json().await.unwrap();
    let idea_id = idea_body["id"].as_str().unwrap();
    let comments_url = fixture.url(&format!("/api/ideas/{}/comments", idea_id));

    // Empty content
    let resp = fixture
        .client
        .post(&comments_url)
        .json(&json!({ "content": "   ", "user_session": "session-1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Content is required");

    // Over the length cap
    let resp2 = fixture
        .client
        .post(&comments_url)
        .json(&json!({ "content": "x".repeat(501), "user_session": "session-1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp2.status(), 400);
    let body2: Value = resp2.json().await.unwrap();
    assert_eq!(body2["error"], "Content exceeds 500 characters");

    // Exactly at the cap is accepted
    let resp3 = fixture
        .client
        .post(&comments_url)
        .json(&json!({ "content": "y".repeat(500), "user_session": "session-1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp3.status(), 200);

    // Commenting on a non-existent idea
    let resp4 = fixture
        .client
        .post(fixture.url("/api/ideas/missing-id/comments"))
        .json(&json!({ "content": "hello", "user_session": "session-1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp4.status(), 404);
}

#[tokio::test]
async fn test_idea_delete_cascades_comments() {
    let fixture = TestFixture::new().await;

    let idea_resp = fixture
        .client
        .post(fixture.url("/api/ideas"))
        .json(&json!({ "description": "A budgeting app", "user_session": "session-1" }))
        .send()
        .await
        .unwrap();
    let idea_body: Value = idea_resp.json().await.unwrap();
    let idea_id = idea_body["id"].as_str().unwrap();

    let comment_resp = fixture
        .client
        .post(fixture.url(&format!("/api/ideas/{}/comments", idea_id)))
        .json(&json!({ "content": "Add CSV import", "user_session": "session-1" }))
        .send()
        .await
        .unwrap();
    let comment_body: Value = comment_resp.json().await.unwrap();
    let comment_id = comment_body["id"].as_str().unwrap();

    // Delete the idea
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/ideas/{}", idea_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_resp.status(), 200);

    // Its comment thread is gone
    let list_resp = fixture
        .client
        .get(fixture.url(&format!("/api/ideas/{}/comments", idea_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(list_resp.status(), 200);
    let list_body: Value = list_resp.json().await.unwrap();
    assert!(list_body.as_array().unwrap().is_empty());

    // The cascaded comment row no longer exists
    let comment_delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/comments/{}", comment_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(comment_delete_resp.status(), 404);
}

#[tokio::test]
async fn test_concurrent_comments() {
    let fixture = TestFixture::new().await;

    let idea_resp = fixture
        .client
        .post(fixture.url("/api/ideas"))
        .json(&json!({ "description": "A flashcard app", "user_session": "session-1" }))
        .send()
        .await
        .unwrap();
    let idea_body: Value = idea_resp.json().await.unwrap();
    let comments_url = fixture.url(&format!(
        "/api/ideas/{}/comments",
        idea_body["id"].as_str().unwrap()
    ));

    // Two writers on the same idea at once
    let first = fixture
        .client
        .post(&comments_url)
        .json(&json!({ "content": "first", "user_session": "session-1" }))
        .send();
    let second = fixture
        .client
        .post(&comments_url)
        .json(&json!({ "content": "second", "user_session": "session-2" }))
        .send();

    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.unwrap().status(), 200);
    assert_eq!(second.unwrap().status(), 200);

    let list_resp = fixture
        .client
        .get(&comments_url)
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    assert_eq!(list_body.as_array().unwrap().len(), 2);
}
