//! Repository for user database operations.
//!
//! Users mirror subjects of the external identity provider. Rows are
//! provisioned on first authenticated request.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::UserEntity;

/// Repository for user operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds a user by ID.
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, username, display_name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a user by email, case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, username, display_name, created_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts a mirror row for an identity-provider subject, or refreshes
    /// its email and display name if one already exists.
    ///
    /// The generated username is kept stable across refreshes.
    pub async fn upsert_from_identity(
        &self,
        user_id: Uuid,
        email: &str,
        username: &str,
        display_name: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, email, username, display_name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET email = EXCLUDED.email, display_name = EXCLUDED.display_name
            RETURNING id, email, username, display_name, created_at
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(username)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
    }

    /// Resolves a unique username by appending a numeric suffix on
    /// collision.
    pub async fn generate_unique_username(&self, base: &str) -> Result<String, sqlx::Error> {
        let mut candidate = base.to_string();
        let mut suffix = 2;

        loop {
            let exists: bool = sqlx::query_scalar(
                r#"
                SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)
                "#,
            )
            .bind(&candidate)
            .fetch_one(&self.pool)
            .await?;

            if !exists {
                return Ok(candidate);
            }

            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }
    }
}
