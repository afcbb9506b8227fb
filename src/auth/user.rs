use serde::{Deserialize, Serialize};

use crate::auth::role::Role;

/// Represents the authenticated console user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Unique user identifier
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Canonical role, normalized from the backend vocabulary
    pub role: Role,
    /// National identification number (optional)
    pub identification: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new user with basic information
    pub fn new(
        id: String,
        first_name: String,
        last_name: String,
        email: String,
        role: Role,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            role,
            identification: None,
        }
    }

    /// Creates a new user carrying an identification number
    pub fn with_identification(
        id: String,
        first_name: String,
        last_name: String,
        email: String,
        role: Role,
        identification: String,
    ) -> Self {
        let mut user = Self::new(id, first_name, last_name, email, role);
        user.identification = Some(identification);
        user
    }

    /// Display name for the header UI
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
