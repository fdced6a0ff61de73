//! Paper search, import and upload

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::types::{ImportReceipt, ImportRequest, Paper, SearchRequest};
use super::ApiClient;
use crate::error::{RequestError, RequestResult, UPLOAD_ERROR_MESSAGE};

/// Result count used when the caller does not pick one.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

const PDF_MIME: &str = "application/pdf";

/// Paper operations, borrowed from an [`ApiClient`]. All of them require
/// authentication.
pub struct PaperApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PaperApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /papers/search` with `{query, limit}`.
    pub async fn search(&self, query: &str, limit: u32) -> RequestResult<Vec<Paper>> {
        let body = SearchRequest { query, limit };
        self.client
            .request(Method::POST, &["papers", "search"], Some(&body), true)
            .await
    }

    /// `POST /papers/import`, attaching a paper to a workspace.
    ///
    /// Fails with the backend's "already in workspace" message when the
    /// paper is already attached; see
    /// [`RequestError::is_duplicate_import`].
    pub async fn import(&self, workspace_id: &str, paper_id: &str) -> RequestResult<ImportReceipt> {
        let body = ImportRequest {
            workspace_id,
            paper_id,
        };
        self.client
            .request(Method::POST, &["papers", "import"], Some(&body), true)
            .await
    }

    /// `GET /papers/workspace/{workspace_id}`
    pub async fn list_for_workspace(&self, workspace_id: &str) -> RequestResult<Vec<Paper>> {
        self.client
            .request::<_, ()>(Method::GET, &["papers", "workspace", workspace_id], None, true)
            .await
    }

    /// `POST /papers/upload?title=..&authors=..` with the PDF as the `file`
    /// multipart field.
    ///
    /// `authors` is a comma-separated list; the backend splits it.
    pub async fn upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        title: &str,
        authors: &str,
    ) -> RequestResult<Paper> {
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(PDF_MIME)
            .map_err(|e| RequestError::Encode(e.to_string()))?;
        let form = Form::new().part("file", part);

        self.client
            .request_multipart(
                &["papers", "upload"],
                &[("title", title), ("authors", authors)],
                form,
                UPLOAD_ERROR_MESSAGE,
            )
            .await
    }

    /// `DELETE /papers/workspace/{workspace_id}/paper/{paper_id}`
    pub async fn remove_from_workspace(
        &self,
        workspace_id: &str,
        paper_id: &str,
    ) -> RequestResult<()> {
        self.client
            .request::<_, ()>(
                Method::DELETE,
                &["papers", "workspace", workspace_id, "paper", paper_id],
                None,
                true,
            )
            .await
    }
}
