use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
///
/// The `password` column only ever holds an argon2 hash; the field is
/// renamed here so it cannot be mistaken for plaintext and is skipped on
/// serialization either way.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,                   // display name, globally unique
    pub email: String,                  // login identifier, globally unique
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub username: String,               // nickname, globally unique
    pub prompt: Option<String>,
    pub created_at: OffsetDateTime,     // set once, never altered
    pub updated_at: Option<OffsetDateTime>, // refreshed on every mutation
}
