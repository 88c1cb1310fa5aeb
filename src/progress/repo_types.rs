use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Per-user learning progress on one word.
///
/// Lives in its own `user_words` table; both references are required and the
/// row is removed by the FK cascade when either side is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserWord {
    pub id: i64,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub created_at: OffsetDateTime,
    pub user_id: i64,
    pub word_id: i64,
}

/// Progress row joined with its word, for list views.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserWordWithWord {
    pub id: i64,
    pub correct_count: i32,
    pub incorrect_count: i32,
    pub created_at: OffsetDateTime,
    pub word_id: i64,
    pub english: String,
    pub korean: String,
}
