use client::{ApiClient, AuthContext, RetryConfig, UploadFile};
use common::{InsightError, CONNECTION_ERROR_MESSAGE};
use domain::config::ApiConfig;
use domain::entities::{ChatQuery, ModelChoice};
use domain::{DocLevel, GenerateRequest, GenerationState};
use infrastructure::session::{MemoryTokenStore, TokenStore};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn client_for(server: &ServerGuard) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: format!("{}/api", server.url()),
        ..ApiConfig::default()
    })
    .expect("valid config")
    .with_retry(RetryConfig::new().with_delay(Duration::from_millis(5)))
}

#[tokio::test]
async fn test_file_structure_uses_clean_project_name() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/file-structure/demo")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"name":"src","path":"demo/src","type":"folder","children":[
                {"name":"main.py","path":"demo/src/main.py","type":"file"}]}]"#,
        )
        .create_async()
        .await;

    let nodes = client_for(&server)
        .file_structure("uploads/demo")
        .await
        .expect("tree");

    mock.assert_async().await;
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].children()[0].path, "demo/src/main.py");
}

#[tokio::test]
async fn test_file_structure_failure_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/file-structure/demo")
        .with_status(500)
        .with_body(r#"{"detail":"Project not found"}"#)
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .file_structure("demo")
        .await
        .expect_err("server error");

    mock.assert_async().await;
    assert_eq!(err.user_message(), "Project not found");
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/auth/me")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_body(r#"{"id": 7, "email": "dev@example.com", "is_admin": false}"#)
        .create_async()
        .await;

    let user = client_for(&server)
        .with_token(Some("secret-token".to_string()))
        .me()
        .await
        .expect("user");

    mock.assert_async().await;
    assert_eq!(user.id.to_string(), "7");
}

#[tokio::test]
async fn test_server_errors_retried_then_surfaced() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/documentation")
        .match_query(Matcher::UrlEncoded("path".into(), "demo/src/main.py".into()))
        .with_status(503)
        .with_body(r#"{"detail":"Service temporarily unavailable"}"#)
        .expect(4)
        .create_async()
        .await;

    let err = client_for(&server)
        .documentation("demo/src/main.py")
        .await
        .expect_err("always failing");

    mock.assert_async().await;
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.user_message(), "Service temporarily unavailable");
}

#[tokio::test]
async fn test_client_errors_fail_immediately() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(400)
        .with_body(r#"{"message":"Unknown model"}"#)
        .expect(1)
        .create_async()
        .await;

    let request = GenerateRequest::new(
        Some("7".to_string()),
        "demo",
        vec!["uploads/demo/src".to_string()],
        ModelChoice::default(),
    )
    .expect("valid request");
    let err = client_for(&server)
        .generate(&request)
        .await
        .expect_err("bad request");

    mock.assert_async().await;
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "Unknown model");
}

#[tokio::test]
async fn test_generate_posts_request_and_returns_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({
            "project_name": "demo",
            "root_path": "./demo\\src",
            "selected_items": ["uploads/demo/src"]
        })))
        .with_status(200)
        .with_body(r#"{"progress_key":"job-42"}"#)
        .create_async()
        .await;

    let request = GenerateRequest::new(
        None,
        "demo",
        vec!["uploads/demo/src".to_string()],
        ModelChoice::default(),
    )
    .expect("valid request");
    let key = client_for(&server).generate(&request).await.expect("key");

    mock.assert_async().await;
    assert_eq!(key, "job-42");
}

#[tokio::test]
async fn test_status_not_found_detail_object() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/generate/status/job-1")
        .with_status(404)
        .with_body(r#"{"detail":{"message":"Generation task not found","progress_key":"job-1"}}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .generation_status("job-1")
        .await
        .expect_err("not found");

    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Generation task not found");
}

#[tokio::test]
async fn test_generation_status_parsed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/generate/status/job-1")
        .with_status(200)
        .with_body(r#"{"status":"completed","progress":100,"current_step":"Done","error":null}"#)
        .create_async()
        .await;

    let status = client_for(&server)
        .generation_status("job-1")
        .await
        .expect("status");
    assert_eq!(status.status, GenerationState::Completed);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let api = ApiClient::new(&ApiConfig {
        base_url: "http://127.0.0.1:1/api".to_string(),
        timeout_secs: 2,
        ..ApiConfig::default()
    })
    .expect("valid config");

    let err = api.file_structure("demo").await.expect_err("refused");
    assert!(matches!(err, InsightError::Network(_)));
    assert_eq!(err.user_message(), CONNECTION_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_evaluation_path_suffix_and_level() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/evaluation")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("path".into(), "demo/src/main.py_evaluation".into()),
            Matcher::UrlEncoded("level".into(), "file".into()),
            Matcher::UrlEncoded("model".into(), "gpt-4o".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"evaluation":"Clear and complete","path":"demo/src/main.py","model":"gpt-4o"}"#)
        .create_async()
        .await;

    let evaluation = client_for(&server)
        .evaluation("demo/src/main.py", DocLevel::File, "gpt-4o")
        .await
        .expect("evaluation");

    mock.assert_async().await;
    assert_eq!(evaluation.evaluation, "Clear and complete");
    assert!(evaluation.error.is_none());
}

#[tokio::test]
async fn test_documentation_text_processed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/documentation")
        .match_query(Matcher::UrlEncoded("path".into(), "demo/src".into()))
        .with_status(200)
        .with_body(r##""# Overview\n\nEntry point""##)
        .create_async()
        .await;

    let text = client_for(&server)
        .documentation_text("demo/src")
        .await
        .expect("text");
    assert_eq!(text, "# Overview\n\nEntry point");
}

#[tokio::test]
async fn test_section_update_and_feedback_status() {
    let mut server = Server::new_async().await;
    let update = server
        .mock("PUT", "/api/documentation/sections/12")
        .match_body(Matcher::Json(json!({"section_content": "New text"})))
        .with_status(200)
        .with_body(r#"{"message":"Section updated successfully"}"#)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/api/feedback-status")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "7".into()),
            Matcher::UrlEncoded("documentation_id".into(), "3".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"section_ids":[12, 14]}"#)
        .create_async()
        .await;

    let api = client_for(&server);
    api.update_section(12, "New text").await.expect("updated");
    let rated = api.section_feedback_status("7", 3).await.expect("status");

    update.assert_async().await;
    status.assert_async().await;
    assert!(rated.has_feedback(14));
    assert!(!rated.has_feedback(13));
}

#[tokio::test]
async fn test_models_filtered_from_settings() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/settings")
        .with_status(200)
        .with_body(
            r#"[{"id":1,"key":"gpt-4o","value":"gpt-4o","category":"models"},
                {"id":2,"key":"file_prompt","value":"...","category":"prompt"}]"#,
        )
        .create_async()
        .await;

    let models = client_for(&server).models().await.expect("models");
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].key, "gpt-4o");
}

#[tokio::test]
async fn test_upload_sends_multipart_parts() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/upload")
        .match_header("content-type", Matcher::Regex("multipart/form-data".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="project_name""#.into()),
            Matcher::Regex(r#"filename="demo/src/main.py""#.into()),
        ]))
        .with_status(200)
        .with_body(r#"{"message":"Files uploaded successfully","path":"uploaded_projects/demo"}"#)
        .create_async()
        .await;

    let files = vec![UploadFile {
        relative_path: "demo/src/main.py".to_string(),
        bytes: b"print('hi')".to_vec(),
    }];
    let response = client_for(&server)
        .upload_project("demo", &files)
        .await
        .expect("uploaded");

    mock.assert_async().await;
    assert_eq!(response.path, "uploaded_projects/demo");
}

#[tokio::test]
async fn test_upload_without_files_rejected_locally() {
    let server = Server::new_async().await;
    let err = client_for(&server)
        .upload_project("demo", &[])
        .await
        .expect_err("nothing to upload");
    assert!(matches!(err, InsightError::Domain(_)));
}

#[tokio::test]
async fn test_chat_message_round() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat/message")
        .match_body(Matcher::Json(json!({
            "project_name": "demo",
            "query": "What does main do?",
            "chat_id": null
        })))
        .with_status(200)
        .with_body(r#"{"chat_id":"c-1","message":"It starts the server.","source_documents":[]}"#)
        .create_async()
        .await;

    let reply = client_for(&server)
        .send_chat_message(&ChatQuery {
            project_name: "demo".to_string(),
            query: "What does main do?".to_string(),
            chat_id: None,
        })
        .await
        .expect("reply");

    mock.assert_async().await;
    assert_eq!(reply.chat_id, "c-1");
}

#[tokio::test]
async fn test_auth_init_clears_rejected_token() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/auth/me")
        .with_status(401)
        .with_body(r#"{"detail":"Invalid token"}"#)
        .create_async()
        .await;

    let api = Arc::new(client_for(&server));
    let store = Arc::new(MemoryTokenStore::with_token("expired"));
    let auth = AuthContext::new(Arc::clone(&api), store.clone());

    let user = auth.init().await.expect("init handles rejection");
    assert!(user.is_none());
    assert!(store.load().expect("load").is_none());
    assert!(api.token().is_none());
    assert!(matches!(
        auth.require_user(),
        Err(InsightError::Unauthenticated)
    ));
}

#[tokio::test]
async fn test_auth_init_and_logout() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/auth/me")
        .match_header("authorization", "Bearer good")
        .with_status(200)
        .with_body(r#"{"id":"u-1","email":"dev@example.com","is_admin":true}"#)
        .create_async()
        .await;
    let logout = server
        .mock("POST", "/api/auth/logout")
        .match_header("authorization", "Bearer good")
        .with_status(200)
        .with_body(r#"{"message":"Successfully logged out"}"#)
        .create_async()
        .await;

    let api = Arc::new(client_for(&server));
    let store = Arc::new(MemoryTokenStore::with_token("good"));
    let auth = AuthContext::new(Arc::clone(&api), store.clone());

    let user = auth.init().await.expect("init").expect("user");
    assert_eq!(user.email, "dev@example.com");
    assert_eq!(auth.user_id().as_deref(), Some("u-1"));

    auth.logout().await.expect("logout");
    logout.assert_async().await;
    assert!(!auth.is_authenticated());
    assert!(store.load().expect("load").is_none());
}

#[tokio::test]
async fn test_auth_without_stored_token_stays_anonymous() {
    let server = Server::new_async().await;
    let auth = AuthContext::new(
        Arc::new(client_for(&server)),
        Arc::new(MemoryTokenStore::new()),
    );
    assert!(auth.init().await.expect("init").is_none());
    assert!(auth.user_id().is_none());
}
