use sqlx::PgPool;
use time::OffsetDateTime;

use crate::words::repo_types::Word;

impl Word {
    pub async fn create(db: &PgPool, english: &str, korean: &str) -> anyhow::Result<Word> {
        let now = OffsetDateTime::now_utc();
        let word = sqlx::query_as::<_, Word>(
            r#"
            INSERT INTO words (english, korean, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, english, korean, created_at
            "#,
        )
        .bind(english)
        .bind(korean)
        .bind(now)
        .fetch_one(db)
        .await?;
        Ok(word)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Word>> {
        let word = sqlx::query_as::<_, Word>(
            r#"
            SELECT id, english, korean, created_at
            FROM words
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(word)
    }

    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<Word>> {
        let rows = sqlx::query_as::<_, Word>(
            r#"
            SELECT id, english, korean, created_at
            FROM words
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Delete a word; progress rows referencing it go via the FK cascade.
    pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM words WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
