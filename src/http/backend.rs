//! Authentication backend interface and its HTTP implementation
//!
//! The console API speaks Spanish on the credential fields; the serde
//! attributes below pin the wire names so the Rust side can stay idiomatic.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::{AuthenticatedUser, Role};
use crate::constants::{LOGIN_ENDPOINT, LOGOUT_ENDPOINT};
use crate::error::{OpsGateError, Result};

/// Login identity: the console accepts either an email or a national
/// identification number
#[derive(Debug, Clone)]
pub enum LoginIdentity {
    Email(String),
    Identification(String),
}

/// Credentials presented to the login endpoint
#[derive(Debug, Clone)]
pub struct Credentials {
    pub identity: LoginIdentity,
    pub password: String,
}

impl Credentials {
    pub fn with_email(email: String, password: String) -> Self {
        Self {
            identity: LoginIdentity::Email(email),
            password,
        }
    }

    pub fn with_identification(identification: String, password: String) -> Self {
        Self {
            identity: LoginIdentity::Identification(identification),
            password,
        }
    }

    /// Loggable identity, never the secret
    pub fn identity_label(&self) -> String {
        match &self.identity {
            LoginIdentity::Email(email) => email.clone(),
            LoginIdentity::Identification(identification) => identification.clone(),
        }
    }
}

/// Wire body for `POST users/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identificacion: Option<String>,
    #[serde(rename = "contraseña")]
    pub password: String,
}

impl From<&Credentials> for LoginRequest {
    fn from(credentials: &Credentials) -> Self {
        let (correo, identificacion) = match &credentials.identity {
            LoginIdentity::Email(email) => (Some(email.clone()), None),
            LoginIdentity::Identification(identification) => (None, Some(identification.clone())),
        };
        Self {
            correo,
            identificacion,
            password: credentials.password.clone(),
        }
    }
}

/// User record as the backend ships it; `role` is the raw backend vocabulary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub identification: Option<String>,
}

impl UserDto {
    /// Normalizes the backend role into the canonical frontend model
    pub fn into_authenticated(self) -> AuthenticatedUser {
        AuthenticatedUser {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role: Role::normalize(&self.role),
            identification: self.identification,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub tokens: Option<TokenPair>,
}

/// Wire body for `POST users/logout`
#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Backend authentication endpoint seam; swapped for a fake in tests
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    async fn logout(&self, access_token: &str) -> Result<LogoutResponse>;
}

/// reqwest-based backend speaking the console API
pub struct HttpAuthBackend {
    client: reqwest::Client,
    base_url: Url,
}

// Rejection bodies still carry a message worth surfacing
#[derive(Debug, Deserialize)]
struct RejectionBody {
    #[serde(default)]
    message: Option<String>,
}

impl HttpAuthBackend {
    /// `base_url` must end with a slash for relative endpoint joins
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| OpsGateError::ConfigError(format!("invalid endpoint '{}': {}", path, e)))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<RejectionBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request rejected")
                        .to_string()
                });
            return Err(OpsGateError::BackendRejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.post_json(LOGIN_ENDPOINT, request).await
    }

    async fn logout(&self, access_token: &str) -> Result<LogoutResponse> {
        let body = LogoutRequest {
            access_token: access_token.to_string(),
        };
        self.post_json(LOGOUT_ENDPOINT, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_uses_spanish_wire_names() {
        let credentials = Credentials::with_email("a@x.com".to_string(), "p".to_string());
        let body = serde_json::to_value(LoginRequest::from(&credentials)).unwrap();
        assert_eq!(body["correo"], "a@x.com");
        assert_eq!(body["contraseña"], "p");
        assert!(body.get("identificacion").is_none());
    }

    #[test]
    fn test_login_request_with_identification() {
        let credentials = Credentials::with_identification("0912345678".to_string(), "p".to_string());
        let body = serde_json::to_value(LoginRequest::from(&credentials)).unwrap();
        assert_eq!(body["identificacion"], "0912345678");
        assert!(body.get("correo").is_none());
    }

    #[test]
    fn test_user_dto_normalizes_role() {
        let dto = UserDto {
            id: "u-1".to_string(),
            first_name: "Alba".to_string(),
            last_name: "Reyes".to_string(),
            email: "a@x.com".to_string(),
            role: "seller".to_string(),
            identification: None,
        };
        let user = dto.into_authenticated();
        assert_eq!(user.role, Role::Supervisor);
    }

    #[test]
    fn test_login_response_tolerates_missing_fields() {
        let response: LoginResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!response.success);
        assert!(response.user.is_none());
        assert!(response.tokens.is_none());
    }
}
