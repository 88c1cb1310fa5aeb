use sqlx::PgPool;
use time::OffsetDateTime;

use crate::progress::repo_types::{UserWord, UserWordWithWord};

impl UserWord {
    /// Start tracking a word for a user; both counters begin at zero.
    ///
    /// Returns the raw `sqlx` error so the caller can map a foreign-key
    /// violation (unknown user or word) to a not-found error.
    pub async fn create(db: &PgPool, user_id: i64, word_id: i64) -> sqlx::Result<UserWord> {
        let now = OffsetDateTime::now_utc();
        sqlx::query_as::<_, UserWord>(
            r#"
            INSERT INTO user_words (correct_count, incorrect_count, created_at, user_id, word_id)
            VALUES (0, 0, $1, $2, $3)
            RETURNING id, correct_count, incorrect_count, created_at, user_id, word_id
            "#,
        )
        .bind(now)
        .bind(user_id)
        .bind(word_id)
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<UserWord>> {
        let row = sqlx::query_as::<_, UserWord>(
            r#"
            SELECT id, correct_count, incorrect_count, created_at, user_id, word_id
            FROM user_words
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<UserWordWithWord>> {
        let rows = sqlx::query_as::<_, UserWordWithWord>(
            r#"
            SELECT uw.id, uw.correct_count, uw.incorrect_count, uw.created_at,
                   uw.word_id, w.english, w.korean
            FROM user_words uw
            JOIN words w ON w.id = uw.word_id
            WHERE uw.user_id = $1
            ORDER BY uw.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Record one quiz outcome, bumping exactly one of the two counters.
    pub async fn record_answer(
        db: &PgPool,
        id: i64,
        correct: bool,
    ) -> anyhow::Result<Option<UserWord>> {
        let row = sqlx::query_as::<_, UserWord>(
            r#"
            UPDATE user_words
            SET correct_count = correct_count + CASE WHEN $2 THEN 1 ELSE 0 END,
                incorrect_count = incorrect_count + CASE WHEN $2 THEN 0 ELSE 1 END
            WHERE id = $1
            RETURNING id, correct_count, incorrect_count, created_at, user_id, word_id
            "#,
        )
        .bind(id)
        .bind(correct)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Reset progress by removing the record outright.
    pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM user_words WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
