use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Stable identifier of a user account
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// Some backends hand out numeric ids; they are kept as their decimal text.
impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Number(id) => Self(id.to_string()),
        })
    }
}

/// Administrative role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Moderator,
    #[default]
    Editor,
}

impl Role {
    /// Every role, in display order
    pub const ALL: [Self; 3] = [Self::SuperAdmin, Self::Moderator, Self::Editor];

    /// Wire name of the role
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Moderator => "moderator",
            Self::Editor => "editor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown role: '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// User account as returned by the user-management service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Write-only credential, only ever set on outgoing updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    /// Fields this client does not model, kept so updates round-trip them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// The operator currently signed in to the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_parsing() {
        assert_eq!("super_admin".parse::<Role>(), Ok(Role::SuperAdmin));
        assert_eq!("moderator".parse::<Role>(), Ok(Role::Moderator));
        assert_eq!("editor".parse::<Role>(), Ok(Role::Editor));
        assert!("admin".parse::<Role>().is_err());
        assert!("Editor".parse::<Role>().is_err());
    }

    #[test]
    fn test_user_deserializes_camel_case_and_numeric_id() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "bob",
            "email": "b@x.com",
            "fullName": "Bob B",
            "role": "editor",
            "isActive": true,
            "lastLogin": null
        }))
        .unwrap();

        assert_eq!(user.id, UserId::from("1"));
        assert_eq!(user.full_name, "Bob B");
        assert_eq!(user.role, Role::Editor);
        assert!(user.is_active);
        assert!(user.password.is_none());
        assert!(user.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let input = json!({
            "id": "u-7",
            "username": "alice",
            "email": "alice@example.com",
            "fullName": "Alice Smith",
            "role": "moderator",
            "isActive": false,
            "createdAt": "2024-01-01T00:00:00Z"
        });

        let user: User = serde_json::from_value(input).unwrap();
        let output = serde_json::to_value(&user).unwrap();

        assert_eq!(output["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(output["role"], "moderator");
        // Absent password must not be serialized
        assert!(output.get("password").is_none());
    }
}
