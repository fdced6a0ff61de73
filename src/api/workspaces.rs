//! Workspace CRUD

use reqwest::Method;

use super::types::{CreateWorkspaceRequest, Workspace, WorkspaceUpdate};
use super::ApiClient;
use crate::error::RequestResult;

/// Workspace operations, borrowed from an [`ApiClient`]. All of them
/// require authentication.
pub struct WorkspaceApi<'a> {
    client: &'a ApiClient,
}

impl<'a> WorkspaceApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /workspaces`; `description` is omitted from the body when `None`.
    pub async fn create(&self, name: &str, description: Option<&str>) -> RequestResult<Workspace> {
        let body = CreateWorkspaceRequest { name, description };
        self.client
            .request(Method::POST, &["workspaces"], Some(&body), true)
            .await
    }

    /// `GET /workspaces`
    pub async fn list(&self) -> RequestResult<Vec<Workspace>> {
        self.client
            .request::<_, ()>(Method::GET, &["workspaces"], None, true)
            .await
    }

    /// `GET /workspaces/{id}`
    pub async fn get(&self, id: &str) -> RequestResult<Workspace> {
        self.client
            .request::<_, ()>(Method::GET, &["workspaces", id], None, true)
            .await
    }

    /// `PUT /workspaces/{id}` with only the fields set in `update`.
    pub async fn update(&self, id: &str, update: &WorkspaceUpdate) -> RequestResult<Workspace> {
        self.client
            .request(Method::PUT, &["workspaces", id], Some(update), true)
            .await
    }

    /// `DELETE /workspaces/{id}`
    pub async fn delete(&self, id: &str) -> RequestResult<()> {
        self.client
            .request::<_, ()>(Method::DELETE, &["workspaces", id], None, true)
            .await
    }
}
