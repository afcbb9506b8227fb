//! Outbound request credential attachment
//!
//! Every eligible request carries the current session's bearer credential.
//! The authentication endpoints themselves are excluded so stale credentials
//! never reach the endpoints that establish or tear down the session.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use url::Url;

use crate::auth::token::{bearer_header, decode_claims_unverified};
use crate::constants::AUTH_EXEMPT_PATHS;
use crate::error::Result;
use crate::session::store::SessionStore;

/// Decides, per outgoing request, whether the session credential is attached
pub struct RequestAuthorizer {
    store: Arc<SessionStore>,
}

impl RequestAuthorizer {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Whether a URL targets an authentication endpoint that must never
    /// receive a credential header
    pub fn is_exempt(url: &Url) -> bool {
        AUTH_EXEMPT_PATHS
            .iter()
            .any(|path| url.path().ends_with(path))
    }

    /// Attach the bearer credential when eligible.
    ///
    /// Requests without a token pass through untouched; the backend is
    /// responsible for rejecting unauthenticated calls.
    pub fn apply(&self, request: &mut reqwest::Request) {
        if Self::is_exempt(request.url()) {
            return;
        }

        let token = match self.store.current_token() {
            Some(token) => token,
            None => return,
        };

        match HeaderValue::from_str(&bearer_header(&token)) {
            Ok(value) => {
                request.headers_mut().insert(AUTHORIZATION, value);
                // Unverified decode, diagnostics only; malformed tokens are fine
                if let Some(claims) = decode_claims_unverified(&token) {
                    log::debug!("Outbound request credential claims: {}", claims);
                }
            }
            Err(e) => {
                log::warn!("Token cannot form an Authorization header, skipping attachment: {}", e);
            }
        }
    }
}

/// HTTP client that routes every outbound request through the authorizer
pub struct AuthorizedClient {
    client: reqwest::Client,
    authorizer: RequestAuthorizer,
}

impl AuthorizedClient {
    pub fn new(client: reqwest::Client, store: Arc<SessionStore>) -> Self {
        Self {
            client,
            authorizer: RequestAuthorizer::new(store),
        }
    }

    pub async fn execute(&self, mut request: reqwest::Request) -> Result<reqwest::Response> {
        self.authorizer.apply(&mut request);
        Ok(self.client.execute(request).await?)
    }

    pub async fn get(&self, url: Url) -> Result<reqwest::Response> {
        let request = self.client.get(url).build()?;
        self.execute(request).await
    }

    pub async fn post_json<B: serde::Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<reqwest::Response> {
        let request = self.client.post(url).json(body).build()?;
        self.execute(request).await
    }
}
