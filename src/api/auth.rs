//! Registration and login
//!
//! Neither endpoint needs a bearer token. A successful call begins the
//! client's session with the issued token, so the next authenticated request
//! is signed without further wiring.

use reqwest::Method;

use super::types::{AuthSession, LoginRequest, RegisterRequest};
use super::ApiClient;
use crate::error::RequestResult;

/// Auth operations, borrowed from an [`ApiClient`].
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Creates an account (`POST /auth/register`).
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> RequestResult<AuthSession> {
        let body = RegisterRequest {
            email,
            password,
            full_name,
        };
        let auth: AuthSession = self
            .client
            .request(Method::POST, &["auth", "register"], Some(&body), false)
            .await?;
        self.client.session().begin(auth.access_token());
        tracing::info!("Registered {}", auth.user.email);
        Ok(auth)
    }

    /// Signs in (`POST /auth/login`).
    ///
    /// The response is returned as decoded; its token also becomes the
    /// client's session token.
    pub async fn login(&self, email: &str, password: &str) -> RequestResult<AuthSession> {
        let body = LoginRequest { email, password };
        let auth: AuthSession = self
            .client
            .request(Method::POST, &["auth", "login"], Some(&body), false)
            .await?;
        self.client.session().begin(auth.access_token());
        tracing::info!("Logged in as {}", auth.user.email);
        Ok(auth)
    }

    /// Ends the local session. The backend keeps no server-side session, so
    /// no request is made.
    pub fn logout(&self) {
        self.client.session().end();
    }
}
