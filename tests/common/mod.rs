// Shared fakes and wiring helpers for the integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use opsgate::auth::{AuthenticatedUser, Role};
use opsgate::error::{OpsGateError, Result};
use opsgate::http::backend::{
    AuthBackend, Credentials, LoginRequest, LoginResponse, LogoutResponse, TokenPair, UserDto,
};
use opsgate::routing::Navigator;
use opsgate::session::{
    ActivitySource, ChannelActivitySource, Session, SessionManager, SessionStore,
};
use opsgate::storage::MemoryCredentialStore;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/home";

/// Navigator that records every navigation it is asked to perform
#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn inactivity_redirects(&self) -> usize {
        self.calls()
            .iter()
            .filter(|(path, query)| {
                path == LOGIN_ROUTE
                    && query.contains(&("reason".to_string(), "inactivity".to_string()))
            })
            .count()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str, query: &[(&str, &str)]) {
        let query = query
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        self.calls.lock().unwrap().push((path.to_string(), query));
    }
}

/// Scripted authentication backend
pub struct MockAuthBackend {
    login_response: Mutex<LoginResponse>,
    login_error: Mutex<Option<String>>,
    logout_error: Mutex<Option<String>>,
    logout_calls: Mutex<Vec<String>>,
}

impl MockAuthBackend {
    pub fn with_response(response: LoginResponse) -> Self {
        Self {
            login_response: Mutex::new(response),
            login_error: Mutex::new(None),
            logout_error: Mutex::new(None),
            logout_calls: Mutex::new(Vec::new()),
        }
    }

    /// Backend that accepts the login with the given raw role and token
    pub fn succeeding(role: &str, token: &str) -> Self {
        Self::with_response(success_response(role, token))
    }

    /// Backend that answers `success: false`
    pub fn rejecting(message: &str) -> Self {
        Self::with_response(LoginResponse {
            success: false,
            message: Some(message.to_string()),
            user: None,
            tokens: None,
        })
    }

    /// Backend whose login call fails at the transport layer
    pub fn failing(message: &str) -> Self {
        let backend = Self::rejecting("unused");
        *backend.login_error.lock().unwrap() = Some(message.to_string());
        backend
    }

    pub fn fail_logout(&self, message: &str) {
        *self.logout_error.lock().unwrap() = Some(message.to_string());
    }

    /// Tokens presented to the logout endpoint, in call order
    pub fn logout_tokens(&self) -> Vec<String> {
        self.logout_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse> {
        if let Some(message) = self.login_error.lock().unwrap().clone() {
            return Err(OpsGateError::NetworkError(message));
        }
        Ok(self.login_response.lock().unwrap().clone())
    }

    async fn logout(&self, access_token: &str) -> Result<LogoutResponse> {
        self.logout_calls
            .lock()
            .unwrap()
            .push(access_token.to_string());
        if let Some(message) = self.logout_error.lock().unwrap().clone() {
            return Err(OpsGateError::NetworkError(message));
        }
        Ok(LogoutResponse {
            success: true,
            message: None,
        })
    }
}

pub fn sample_user_dto(role: &str) -> UserDto {
    UserDto {
        id: "u-1".to_string(),
        first_name: "Alba".to_string(),
        last_name: "Reyes".to_string(),
        email: "a@x.com".to_string(),
        role: role.to_string(),
        identification: Some("0912345678".to_string()),
    }
}

pub fn success_response(role: &str, token: &str) -> LoginResponse {
    LoginResponse {
        success: true,
        message: None,
        user: Some(sample_user_dto(role)),
        tokens: Some(TokenPair {
            access_token: token.to_string(),
            refresh_token: None,
        }),
    }
}

pub fn email_credentials() -> Credentials {
    Credentials::with_email("a@x.com".to_string(), "p".to_string())
}

pub fn sample_session(role: Role, token: &str) -> Session {
    Session {
        user: AuthenticatedUser::new(
            "u-1".to_string(),
            "Alba".to_string(),
            "Reyes".to_string(),
            "a@x.com".to_string(),
            role,
        ),
        token: token.to_string(),
    }
}

/// Fully wired session stack over in-memory fakes
pub struct TestHarness {
    pub store: Arc<SessionStore>,
    pub backend: Arc<MockAuthBackend>,
    pub navigator: Arc<RecordingNavigator>,
    pub source: Arc<ChannelActivitySource>,
    pub manager: SessionManager,
}

pub fn harness_with(backend: MockAuthBackend, window: Duration) -> TestHarness {
    let store = Arc::new(SessionStore::new(Arc::new(MemoryCredentialStore::new())));
    let backend = Arc::new(backend);
    let navigator = Arc::new(RecordingNavigator::new());
    let source = Arc::new(ChannelActivitySource::new());
    let manager = SessionManager::new(
        Arc::clone(&store),
        Arc::clone(&backend) as Arc<dyn AuthBackend>,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        Arc::clone(&source) as Arc<dyn ActivitySource>,
        window,
        LOGIN_ROUTE.to_string(),
        HOME_ROUTE.to_string(),
    );
    TestHarness {
        store,
        backend,
        navigator,
        source,
        manager,
    }
}
