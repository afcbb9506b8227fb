//! Backend transport: authentication endpoints and authorized outbound requests

pub mod authorizer;
pub mod backend;

// Re-export main components
pub use authorizer::{AuthorizedClient, RequestAuthorizer};
pub use backend::{AuthBackend, Credentials, HttpAuthBackend, LoginIdentity};
