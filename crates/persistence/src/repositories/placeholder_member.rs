//! Repository for placeholder member database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PlaceholderMemberEntity;

/// Repository for placeholder member operations.
#[derive(Clone)]
pub struct PlaceholderMemberRepository {
    pool: PgPool,
}

impl PlaceholderMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a placeholder member.
    ///
    /// The partial unique index on (league_id, lower(display_name)) rejects
    /// duplicates among non-retired placeholders.
    pub async fn create(
        &self,
        league_id: Uuid,
        display_name: &str,
        created_by: Uuid,
    ) -> Result<PlaceholderMemberEntity, sqlx::Error> {
        sqlx::query_as::<_, PlaceholderMemberEntity>(
            r#"
            INSERT INTO placeholder_members (league_id, display_name, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, league_id, display_name, created_by, retired_at, created_at
            "#,
        )
        .bind(league_id)
        .bind(display_name)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a placeholder by ID within a league.
    pub async fn find_by_id(
        &self,
        placeholder_id: Uuid,
        league_id: Uuid,
    ) -> Result<Option<PlaceholderMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, PlaceholderMemberEntity>(
            r#"
            SELECT id, league_id, display_name, created_by, retired_at, created_at
            FROM placeholder_members
            WHERE id = $1 AND league_id = $2
            "#,
        )
        .bind(placeholder_id)
        .bind(league_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists available (non-retired) placeholders for a league.
    pub async fn list_available(
        &self,
        league_id: Uuid,
    ) -> Result<Vec<PlaceholderMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, PlaceholderMemberEntity>(
            r#"
            SELECT id, league_id, display_name, created_by, retired_at, created_at
            FROM placeholder_members
            WHERE league_id = $1 AND retired_at IS NULL
            ORDER BY display_name ASC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Retires a placeholder. Returns false if it was already retired.
    pub async fn retire(&self, placeholder_id: Uuid, league_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE placeholder_members
            SET retired_at = NOW()
            WHERE id = $1 AND league_id = $2 AND retired_at IS NULL
            "#,
        )
        .bind(placeholder_id)
        .bind(league_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Restores a retired placeholder. Returns false if it was not retired.
    pub async fn restore(
        &self,
        placeholder_id: Uuid,
        league_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE placeholder_members
            SET retired_at = NULL
            WHERE id = $1 AND league_id = $2 AND retired_at IS NOT NULL
            "#,
        )
        .bind(placeholder_id)
        .bind(league_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
