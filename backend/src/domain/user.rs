//! Credential-bearing user entity and password hashing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::faculty_member::PopulatedFacultyMember;
use super::student::PopulatedStudent;

/// Role carried by a credential record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    /// Prefix letter used in faculty/admin external identifiers.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Student => "",
            Self::Faculty => "F",
            Self::Admin => "A",
        }
    }
}

/// Persisted credential document.
///
/// Exactly one profile reference is set, matching the role; a user without a
/// reachable profile is an invariant violation. The password hash is never
/// serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    /// Sequence-derived external identifier, shared with the profile.
    pub id: String,
    pub role: Role,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Owned student profile reference, set for the Student role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Uuid>,
    /// Owned faculty-member profile reference, set for the Faculty role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// User with its owned profile (and the profile's references) resolved.
///
/// Read-only convenience projection returned after onboarding commits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedUser {
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    pub id: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<PopulatedStudent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<PopulatedFacultyMember>,
    pub created_at: DateTime<Utc>,
}

/// Digest a plaintext password for storage.
///
/// The plaintext is held in a zeroizing buffer so it is wiped once hashed.
#[must_use]
pub fn hash_password(password: Zeroizing<String>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic_and_never_plaintext() {
        let first = hash_password(Zeroizing::new("secret".to_owned()));
        let second = hash_password(Zeroizing::new("secret".to_owned()));
        assert_eq!(first, second);
        assert_ne!(first, "secret");
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn serialised_user_omits_the_password_hash() {
        let user = User {
            record_id: Uuid::new_v4(),
            id: "F-00001".to_owned(),
            role: Role::Faculty,
            password_hash: "abc123".to_owned(),
            student: None,
            faculty: Some(Uuid::new_v4()),
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json.get("id").and_then(|v| v.as_str()), Some("F-00001"));
    }
}
