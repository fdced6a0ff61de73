//! Resource operation tests
//!
//! One scenario per backend operation: the path and method hit, the JSON
//! body sent and the decoded result.

mod common;

use chrono::{Datelike, NaiveDate, Timelike};
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string_contains, header, header_exists, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use researchhub::api::{Role, WorkspaceUpdate, DEFAULT_SEARCH_LIMIT};
use researchhub::{ApiClient, Session};

use common::{
    anonymous_client, conversation_json, message_json, paper_json, signed_in_client,
    unreachable_base_url, user_json, workspace_json,
};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_login_sends_credentials_and_begins_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "T",
            "user": user_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let auth = client.auth().login("a@b.com", "pw").await.expect("login");

    assert_eq!(auth.access_token(), "T");
    assert_eq!(auth.token_type(), None);
    assert_eq!(auth.user.email, "a@b.com");
    assert_eq!(client.session().token().as_deref(), Some("T"));
    assert_eq!(
        serde_json::to_value(&auth).expect("encode"),
        json!({"token": "T", "user": user_json()})
    );

    server.verify().await;
}

#[tokio::test]
async fn test_login_rejected_keeps_session_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let err = client
        .auth()
        .login("a@b.com", "wrong")
        .await
        .expect_err("401 must fail");

    assert_eq!(err.message(), "Incorrect email or password");
    assert!(client.session().token().is_none());
}

#[tokio::test]
async fn test_register_sends_profile_and_begins_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "email": "a@b.com",
            "password": "pw",
            "full_name": "Ada Lovelace"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "R",
            "token_type": "bearer",
            "user": user_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let auth = client
        .auth()
        .register("a@b.com", "pw", "Ada Lovelace")
        .await
        .expect("register");

    assert_eq!(auth.user.full_name, "Ada Lovelace");
    assert_eq!(client.session().token().as_deref(), Some("R"));

    server.verify().await;
}

// ---------------------------------------------------------------------------
// Workspaces
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_workspace_omits_missing_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/workspaces"))
        .and(body_json(json!({"name": "Thesis"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(workspace_json("w1", "Thesis")))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let workspace = client
        .workspaces()
        .create("Thesis", None)
        .await
        .expect("create");

    assert_eq!(workspace.id, "w1");
    assert_eq!(workspace.created_at.utc().year(), 2024);
    assert_eq!(workspace.updated_at.utc().hour(), 11);
    assert_eq!(workspace.updated_at.as_str(), "2024-03-02T11:30:00.000000");

    server.verify().await;
}

#[tokio::test]
async fn test_create_workspace_with_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/workspaces"))
        .and(body_json(json!({"name": "Thesis", "description": "Chapter 2 sources"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(workspace_json("w1", "Thesis")))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    client
        .workspaces()
        .create("Thesis", Some("Chapter 2 sources"))
        .await
        .expect("create");

    server.verify().await;
}

#[tokio::test]
async fn test_list_workspaces_keeps_backend_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            workspace_json("w2", "Newer"),
            workspace_json("w1", "Older")
        ])))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let workspaces = client.workspaces().list().await.expect("list");
    let ids: Vec<&str> = workspaces.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["w2", "w1"]);
}

#[tokio::test]
async fn test_update_workspace_sends_only_set_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/workspaces/w1"))
        .and(body_json(json!({"name": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(workspace_json("w1", "Renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let workspace = client
        .workspaces()
        .update("w1", &WorkspaceUpdate::default().name("Renamed"))
        .await
        .expect("update");
    assert_eq!(workspace.name, "Renamed");

    server.verify().await;
}

#[tokio::test]
async fn test_delete_missing_workspace_reports_detail() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/workspaces/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Workspace not found"})),
        )
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let err = client
        .workspaces()
        .delete("nope")
        .await
        .expect_err("404 must fail");
    assert_eq!(err.message(), "Workspace not found");
}

// ---------------------------------------------------------------------------
// Papers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_search_sends_query_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/papers/search"))
        .and(header("authorization", "Bearer T"))
        .and(body_json(json!({"query": "transformers", "limit": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            paper_json("p1", "Attention Is All You Need")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let papers = client
        .papers()
        .search("transformers", DEFAULT_SEARCH_LIMIT)
        .await
        .expect("search");

    assert_eq!(papers.len(), 1);
    let paper = &papers[0];
    assert_eq!(paper.title, "Attention Is All You Need");
    assert_eq!(paper.authors.len(), 2);
    assert!(paper.abstract_text.starts_with("The dominant"));
    assert_eq!(paper.publication_date, NaiveDate::from_ymd_opt(2017, 6, 12));
    assert_eq!(paper.arxiv_id.as_deref(), Some("1706.03762v7"));
    assert!(paper.doi.is_none());

    server.verify().await;
}

#[tokio::test]
async fn test_import_paper() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/papers/import"))
        .and(body_json(json!({"workspace_id": "w1", "paper_id": "p1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Paper imported successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let receipt = client.papers().import("w1", "p1").await.expect("import");
    assert_eq!(receipt.message, "Paper imported successfully");

    server.verify().await;
}

#[tokio::test]
async fn test_duplicate_import_is_recognizable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/papers/import"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Paper already in workspace"})),
        )
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let err = client
        .papers()
        .import("w1", "p1")
        .await
        .expect_err("duplicate must fail");

    assert_eq!(err.message(), "Paper already in workspace");
    assert_eq!(err.status(), Some(400));
    assert!(err.is_duplicate_import());
}

#[tokio::test]
async fn test_list_workspace_papers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/papers/workspace/w1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            paper_json("p1", "Attention Is All You Need"),
            paper_json("p2", "BERT")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let papers = client.papers().list_for_workspace("w1").await.expect("list");
    assert_eq!(papers.len(), 2);
    assert_eq!(papers[1].id, "p2");

    server.verify().await;
}

#[tokio::test]
async fn test_remove_paper_from_workspace() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/papers/workspace/w1/paper/p1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    client
        .papers()
        .remove_from_workspace("w1", "p1")
        .await
        .expect("remove");

    server.verify().await;
}

#[tokio::test]
async fn test_upload_sends_multipart_with_metadata_query() {
    let server = MockServer::start().await;

    Mock::given(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/papers/upload"))
        .and(header("authorization", "Bearer T"))
        .and(query_param("title", "My Notes"))
        .and(query_param("authors", "Ada Lovelace, Charles Babbage"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"notes.pdf\""))
        .and(body_string_contains("application/pdf"))
        .and(body_string_contains("%PDF-1.4 fake"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paper_json("p9", "My Notes")))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let paper = client
        .papers()
        .upload(
            "notes.pdf",
            b"%PDF-1.4 fake".to_vec(),
            "My Notes",
            "Ada Lovelace, Charles Babbage",
        )
        .await
        .expect("upload");
    assert_eq!(paper.id, "p9");

    server.verify().await;
}

#[tokio::test]
async fn test_upload_without_session_omits_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/papers/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paper_json("p9", "My Notes")))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let paper = client
        .papers()
        .upload("notes.pdf", b"%PDF-1.4 fake".to_vec(), "My Notes", "")
        .await
        .expect("upload");
    assert_eq!(paper.id, "p9");

    server.verify().await;
}

#[tokio::test]
async fn test_upload_failure_uses_upload_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/papers/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let err = client
        .papers()
        .upload("notes.pdf", b"%PDF".to_vec(), "", "")
        .await
        .expect_err("500 must fail");
    assert_eq!(err.message(), "Upload failed");
}

#[tokio::test]
async fn test_upload_failure_prefers_backend_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/papers/upload"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Only PDF files are allowed"})),
        )
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let err = client
        .papers()
        .upload("notes.txt", b"plain".to_vec(), "", "")
        .await
        .expect_err("400 must fail");
    assert_eq!(err.message(), "Only PDF files are allowed");
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_conversation_without_title() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/conversations"))
        .and(body_json(json!({"workspace_id": "w1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(conversation_json("c1", "w1", "New Conversation")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let conversation = client
        .chat()
        .create_conversation("w1", None)
        .await
        .expect("create");
    assert_eq!(conversation.title, "New Conversation");
    assert_eq!(conversation.workspace_id.as_deref(), Some("w1"));

    server.verify().await;
}

#[tokio::test]
async fn test_create_conversation_with_title() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/conversations"))
        .and(body_json(json!({"workspace_id": "w1", "title": "Methods"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(conversation_json("c2", "w1", "Methods")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    client
        .chat()
        .create_conversation("w1", Some("Methods"))
        .await
        .expect("create");

    server.verify().await;
}

#[tokio::test]
async fn test_list_conversations_for_workspace() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chat/conversations/workspace/w1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            conversation_json("c1", "w1", "Methods"),
            conversation_json("c2", "w1", "Results")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let conversations = client
        .chat()
        .list_conversations("w1")
        .await
        .expect("list");
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[1].title, "Results");

    server.verify().await;
}

#[tokio::test]
async fn test_get_messages_preserves_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chat/conversations/c1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            message_json("m1", "user", "Summarize", "2024-03-01T10:00:00.000000"),
            message_json("m2", "assistant", "Here is a summary", "2024-03-01T10:00:05.000000"),
            message_json("m3", "user", "Thanks", "2024-03-01T10:01:00.000000")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let messages = client.chat().get_messages("c1").await.expect("messages");

    let ids: Vec<&str> = messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m2", "m3"]);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Assistant);

    server.verify().await;
}

#[tokio::test]
async fn test_send_message_returns_both_sides() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({
            "workspace_id": "w1",
            "conversation_id": "c1",
            "message": "What do these papers agree on?"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": message_json("m1", "user", "What do these papers agree on?", "2024-03-01T10:00:00.000000"),
            "response": message_json("m2", "assistant", "Both use attention.", "2024-03-01T10:00:04.000000")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let exchange = client
        .chat()
        .send_message("w1", "c1", "What do these papers agree on?")
        .await
        .expect("send");

    assert_eq!(exchange.message.role, Role::User);
    assert_eq!(exchange.response.role, Role::Assistant);
    assert_eq!(exchange.response.content, "Both use attention.");

    server.verify().await;
}

#[tokio::test]
async fn test_send_message_without_backend_is_network_error() {
    let client =
        ApiClient::new(&unreachable_base_url(), Session::with_token("T")).expect("valid url");

    let err = client
        .chat()
        .send_message("w1", "c1", "hello")
        .await
        .expect_err("must fail");
    assert!(err.is_network());
}

#[tokio::test]
async fn test_delete_conversation() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/chat/conversations/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    client
        .chat()
        .delete_conversation("c1")
        .await
        .expect("delete");

    server.verify().await;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let health = client.health().await.expect("health");
    assert_eq!(health.status, "healthy");

    server.verify().await;
}

// ---------------------------------------------------------------------------
// Records re-serialize to the body the backend sent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_workspace_round_trips_to_backend_body() {
    let server = MockServer::start().await;
    let body = workspace_json("w1", "Thesis");

    Mock::given(method("GET"))
        .and(path("/workspaces/w1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let workspace = client.workspaces().get("w1").await.expect("get");
    assert_eq!(serde_json::to_value(&workspace).expect("encode"), body);
}

#[tokio::test]
async fn test_search_results_round_trip_to_backend_body() {
    let server = MockServer::start().await;
    let body = json!([
        paper_json("p1", "Attention Is All You Need"),
        paper_json("p2", "BERT")
    ]);

    Mock::given(method("POST"))
        .and(path("/papers/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let papers = client.papers().search("transformers", 10).await.expect("search");
    assert_eq!(serde_json::to_value(&papers).expect("encode"), body);
}

#[tokio::test]
async fn test_chat_records_round_trip_to_backend_body() {
    let server = MockServer::start().await;
    let conversations = json!([conversation_json("c1", "w1", "Methods")]);
    let exchange = json!({
        "message": message_json("m1", "user", "Hi", "2024-03-01T10:00:00.000000"),
        "response": message_json("m2", "assistant", "Hello", "2024-03-01T10:00:04+00:00")
    });

    Mock::given(method("GET"))
        .and(path("/chat/conversations/workspace/w1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(conversations.clone()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(exchange.clone()))
        .mount(&server)
        .await;

    let client = signed_in_client(&server, "T");
    let listed = client.chat().list_conversations("w1").await.expect("list");
    assert_eq!(serde_json::to_value(&listed).expect("encode"), conversations);

    let sent = client
        .chat()
        .send_message("w1", "c1", "Hi")
        .await
        .expect("send");
    assert_eq!(serde_json::to_value(&sent).expect("encode"), exchange);
}
