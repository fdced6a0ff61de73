use serde_json::{json, Value};
use wiremock::MockServer;

use researchhub::{ApiClient, Session};

/// Client pointed at the mock server with no session.
#[allow(dead_code)]
pub fn anonymous_client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Session::new()).expect("mock server uri is a valid base url")
}

/// Client pointed at the mock server and signed in with `token`.
#[allow(dead_code)]
pub fn signed_in_client(server: &MockServer, token: &str) -> ApiClient {
    ApiClient::new(&server.uri(), Session::with_token(token))
        .expect("mock server uri is a valid base url")
}

/// Base URL on which nothing is listening.
#[allow(dead_code)]
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[allow(dead_code)]
pub fn user_json() -> Value {
    json!({
        "id": "u1",
        "email": "a@b.com",
        "full_name": "Ada Lovelace",
        "created_at": "2024-01-01T09:00:00.000000"
    })
}

#[allow(dead_code)]
pub fn workspace_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "user_id": "u1",
        "name": name,
        "description": "",
        "created_at": "2024-03-01T10:00:00.000000",
        "updated_at": "2024-03-02T11:30:00.000000"
    })
}

#[allow(dead_code)]
pub fn paper_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "authors": ["Ashish Vaswani", "Noam Shazeer"],
        "abstract": "The dominant sequence transduction models are based on recurrent networks.",
        "publication_date": "2017-06-12",
        "pdf_url": "https://arxiv.org/pdf/1706.03762v7.pdf",
        "arxiv_id": "1706.03762v7",
        "doi": null,
        "created_at": "2024-03-01T10:00:00.000000"
    })
}

#[allow(dead_code)]
pub fn conversation_json(id: &str, workspace_id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "workspace_id": workspace_id,
        "title": title,
        "created_at": "2024-03-01T10:00:00.000000",
        "updated_at": "2024-03-01T10:05:00.000000"
    })
}

#[allow(dead_code)]
pub fn message_json(id: &str, role: &str, content: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "conversation_id": "c1",
        "role": role,
        "content": content,
        "created_at": created_at
    })
}
