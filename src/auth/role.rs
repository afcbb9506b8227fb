use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical frontend roles
///
/// Backend deployments ship several role vocabularies; every raw role string
/// collapses onto this closed set through [`Role::normalize`]. Strings with no
/// mapping are carried through as their uppercased form rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Provider,
    Planner,
    Supervisor,
    /// Unmapped backend role, uppercased
    Other(String),
}

impl Role {
    /// Maps a raw backend role string onto the canonical set.
    /// Case-insensitive, total, no failure mode.
    pub fn normalize(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "ADMIN" => Role::Admin,
            "SELLER" | "SUPERVISOR" => Role::Supervisor,
            "CLIENT" | "PROVIDER" => Role::Provider,
            "PLANNER" | "PLANIFICADOR" => Role::Planner,
            other => Role::Other(other.to_string()),
        }
    }

    /// Canonical string form
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::Provider => "PROVIDER",
            Role::Planner => "PLANNER",
            Role::Supervisor => "SUPERVISOR",
            Role::Other(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Stored role strings are already canonical; normalizing again keeps the
// round trip stable and absorbs hand-edited storage
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::normalize(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_normalize_to_canonical_set() {
        assert_eq!(Role::normalize("ADMIN"), Role::Admin);
        assert_eq!(Role::normalize("SELLER"), Role::Supervisor);
        assert_eq!(Role::normalize("CLIENT"), Role::Provider);
        assert_eq!(Role::normalize("PROVIDER"), Role::Provider);
        assert_eq!(Role::normalize("PLANNER"), Role::Planner);
        assert_eq!(Role::normalize("PLANIFICADOR"), Role::Planner);
        assert_eq!(Role::normalize("SUPERVISOR"), Role::Supervisor);
    }

    #[test]
    fn test_normalization_is_case_insensitive() {
        assert_eq!(Role::normalize("admin"), Role::Admin);
        assert_eq!(Role::normalize("Seller"), Role::Supervisor);
        assert_eq!(Role::normalize("planificador"), Role::Planner);
        assert_eq!(Role::normalize("cLiEnT"), Role::Provider);
    }

    #[test]
    fn test_unknown_role_escapes_as_uppercased_input() {
        assert_eq!(
            Role::normalize("auditor"),
            Role::Other("AUDITOR".to_string())
        );
        assert_eq!(Role::normalize("AUDITOR").as_str(), "AUDITOR");
    }

    #[test]
    fn test_serde_round_trip_is_stable() {
        for role in [
            Role::Admin,
            Role::Supervisor,
            Role::Other("AUDITOR".to_string()),
        ] {
            let json = serde_json::to_string(&role).unwrap();
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }
}
