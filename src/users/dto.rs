use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub username: String,
    pub prompt: Option<String>,
}

/// Response returned after registration; the password never appears here.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: String,
}

/// Request body for a profile update. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub prompt: Option<String>,
}

/// Public part of the user returned to clients.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            name: u.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_response_serialization_excludes_password() {
        let response = RegisterResponse {
            id: 1,
            email: "alice@x.com".to_string(),
            username: "alice_w".to_string(),
            name: "Alice".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("alice@x.com"));
        assert!(json.contains("alice_w"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn user_row_never_serializes_its_hash() {
        let user = User {
            id: 7,
            name: "Alice".into(),
            email: "alice@x.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            username: "alice_w".into(),
            prompt: None,
            created_at: time::OffsetDateTime::UNIX_EPOCH,
            updated_at: None,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}
