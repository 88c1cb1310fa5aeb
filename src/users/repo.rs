use sqlx::PgPool;
use time::OffsetDateTime;

use crate::users::repo_types::User;

impl User {
    /// True if a user with this email already exists.
    pub async fn exists_by_email(db: &PgPool, email: &str) -> anyhow::Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as(r#"SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)"#)
                .bind(email)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    /// True if a user with this nickname already exists.
    pub async fn exists_by_username(db: &PgPool, username: &str) -> anyhow::Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as(r#"SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)"#)
                .bind(username)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    /// True if a user with this display name already exists.
    pub async fn exists_by_name(db: &PgPool, name: &str) -> anyhow::Result<bool> {
        let (exists,): (bool,) =
            sqlx::query_as(r#"SELECT EXISTS (SELECT 1 FROM users WHERE name = $1)"#)
                .bind(name)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }

    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password AS password_hash, username, prompt,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password AS password_hash, username, prompt,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with a hashed password.
    ///
    /// Returns the raw `sqlx` error so the caller can tell a unique-constraint
    /// violation (a concurrent registration won the race) from an
    /// infrastructure failure. `created_at` is assigned here, not by a column
    /// default, and is never touched again.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        username: &str,
        prompt: Option<&str>,
    ) -> sqlx::Result<User> {
        let now = OffsetDateTime::now_utc();
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, username, prompt, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, password AS password_hash, username, prompt,
                      created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(username)
        .bind(prompt)
        .bind(now)
        .fetch_one(db)
        .await
    }

    /// Apply a profile change, refreshing `updated_at` in the same statement.
    /// Absent fields keep their current value.
    pub async fn update_profile(
        db: &PgPool,
        id: i64,
        name: Option<&str>,
        prompt: Option<&str>,
    ) -> sqlx::Result<Option<User>> {
        let now = OffsetDateTime::now_utc();
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                prompt = COALESCE($3, prompt),
                updated_at = $4
            WHERE id = $1
            RETURNING id, name, email, password AS password_hash, username, prompt,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(prompt)
        .bind(now)
        .fetch_optional(db)
        .await
    }

    /// Delete a user; progress rows go with it via the FK cascade.
    pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
