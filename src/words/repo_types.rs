use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Vocabulary item, shared across users. Term and meaning are immutable
/// after creation; there is no update path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Word {
    pub id: i64,
    pub english: String,
    pub korean: String,
    pub created_at: OffsetDateTime,
}
