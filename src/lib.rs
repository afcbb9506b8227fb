//! OpsGate - session and authorization core for a business operations console
//!
//! This library provides session establishment and teardown against the
//! console backend, credential propagation for outbound requests,
//! inactivity-driven logout, and role-gated route admission.

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod routing;
pub mod security_logger;
pub mod session;
pub mod storage;

// Re-export main components
pub use config::*;
pub use constants::*;
