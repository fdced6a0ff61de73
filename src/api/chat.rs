//! Conversations and messages

use reqwest::Method;

use super::types::{ChatExchange, ChatRequest, Conversation, CreateConversationRequest, Message};
use super::ApiClient;
use crate::error::RequestResult;

/// Chat operations, borrowed from an [`ApiClient`]. All of them require
/// authentication.
pub struct ChatApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ChatApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /chat/conversations`; the backend picks a title when `None`.
    pub async fn create_conversation(
        &self,
        workspace_id: &str,
        title: Option<&str>,
    ) -> RequestResult<Conversation> {
        let body = CreateConversationRequest {
            workspace_id,
            title,
        };
        self.client
            .request(Method::POST, &["chat", "conversations"], Some(&body), true)
            .await
    }

    /// `GET /chat/conversations/workspace/{workspace_id}`
    pub async fn list_conversations(&self, workspace_id: &str) -> RequestResult<Vec<Conversation>> {
        self.client
            .request::<_, ()>(
                Method::GET,
                &["chat", "conversations", "workspace", workspace_id],
                None,
                true,
            )
            .await
    }

    /// `GET /chat/conversations/{conversation_id}/messages`, oldest first.
    pub async fn get_messages(&self, conversation_id: &str) -> RequestResult<Vec<Message>> {
        self.client
            .request::<_, ()>(
                Method::GET,
                &["chat", "conversations", conversation_id, "messages"],
                None,
                true,
            )
            .await
    }

    /// `POST /chat`: stores `text` as a user message and returns it together
    /// with the assistant's reply.
    pub async fn send_message(
        &self,
        workspace_id: &str,
        conversation_id: &str,
        text: &str,
    ) -> RequestResult<ChatExchange> {
        let body = ChatRequest {
            workspace_id,
            conversation_id,
            message: text,
        };
        self.client
            .request(Method::POST, &["chat"], Some(&body), true)
            .await
    }

    /// `DELETE /chat/conversations/{conversation_id}`
    pub async fn delete_conversation(&self, conversation_id: &str) -> RequestResult<()> {
        self.client
            .request::<_, ()>(
                Method::DELETE,
                &["chat", "conversations", conversation_id],
                None,
                true,
            )
            .await
    }
}
