//! User domain entity and related types.

use serde::{Deserialize, Serialize};

use crate::constants::{USER_TYPE_CLIENT, USER_TYPE_HOST};
use crate::error::{DomainError, DomainResult};

/// Account type chosen at registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Client,
    Host,
}

impl UserType {
    /// Check if this account can list places
    pub fn is_host(&self) -> bool {
        matches!(self, UserType::Host)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Client => USER_TYPE_CLIENT,
            UserType::Host => USER_TYPE_HOST,
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            USER_TYPE_CLIENT => Ok(UserType::Client),
            USER_TYPE_HOST => Ok(UserType::Host),
            other => Err(DomainError::UnknownUserType(other.to_string())),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user as returned by the profile and login endpoints.
///
/// Deserialization either yields every field or fails, so a session never
/// holds a partially built user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
}

impl User {
    /// Uppercased first letter of the display name, used for the avatar badge.
    pub fn initial(&self) -> Option<char> {
        self.name
            .trim_start()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }

    /// Check if the user hosts places
    pub fn is_host(&self) -> bool {
        self.user_type.is_host()
    }
}

/// Login payload
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_initial() {
        let user = User {
            id: 1,
            name: "jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            user_type: UserType::Client,
        };
        assert_eq!(user.initial(), Some('J'));
    }

    #[test]
    fn test_user_initial_empty_name() {
        let user = User {
            id: 1,
            name: "  ".to_string(),
            email: "jane@example.com".to_string(),
            user_type: UserType::Client,
        };
        assert_eq!(user.initial(), None);
    }

    #[test]
    fn test_user_type_parse() {
        assert_eq!("host".parse::<UserType>(), Ok(UserType::Host));
        assert_eq!("client".parse::<UserType>(), Ok(UserType::Client));
        assert!("admin".parse::<UserType>().is_err());
    }

    #[test]
    fn test_user_deserializes_from_profile_json() {
        let json = r#"{"id":7,"name":"Ana","email":"ana@example.com","userType":"host","createdAt":"x"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert!(user.is_host());
    }

    #[test]
    fn test_partial_user_is_rejected() {
        let json = r#"{"id":7,"email":"ana@example.com"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn test_user_without_type_is_rejected() {
        let json = r#"{"id":1,"name":"Host","email":"h@x.com"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn test_registration_serializes_camel_case() {
        let payload = Registration {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            user_type: UserType::Host,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["userType"], "host");
    }
}
