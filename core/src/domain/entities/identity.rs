//! Identity entity representing a registered teacher or student account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of an account. Teachers and students live in separate identity spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Course author
    Teacher,
    /// Course consumer
    Student,
}

impl Role {
    /// Lowercase name used in tokens, routes and table lookups
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Capitalized name used in user-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// A registered account within one role's identity space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Username, unique within the role
    pub username: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role the account belongs to
    pub role: Role,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Creates a new identity with a fresh id
    pub fn new(role: Role, username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.updated_at = Utc::now();
    }

    /// The id/role pair carried through authorization checks
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            role: self.role,
        }
    }
}

/// Minimal authenticated caller used by resource services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

impl Principal {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        assert_eq!("teacher".parse::<Role>().unwrap(), Role::Teacher);
        assert_eq!(Role::Student.to_string(), "student");
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_rejects_unknown_value() {
        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let identity = Identity::new(Role::Teacher, "bob", "$2b$10$secret");
        let json = serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"role\":\"teacher\""));
    }

    #[test]
    fn test_set_password_hash_touches_updated_at() {
        let mut identity = Identity::new(Role::Student, "alice", "old");
        let before = identity.updated_at;
        identity.set_password_hash("new");
        assert_eq!(identity.password_hash, "new");
        assert!(identity.updated_at >= before);
    }

    #[test]
    fn test_principal_from_identity() {
        let identity = Identity::new(Role::Student, "alice", "hash");
        let principal = identity.principal();
        assert_eq!(principal.id, identity.id);
        assert!(principal.is_student());
        assert!(!principal.is_teacher());
    }
}
