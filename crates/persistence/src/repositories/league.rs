//! Repository for league database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{LeagueEntity, LeagueVisibilityDb, LeagueWithMembershipEntity};

/// Repository for league operations.
#[derive(Clone)]
pub struct LeagueRepository {
    pool: PgPool,
}

impl LeagueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a league.
    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        description: Option<&str>,
        visibility: LeagueVisibilityDb,
        logo_url: Option<&str>,
        created_by: Uuid,
    ) -> Result<LeagueEntity, sqlx::Error> {
        sqlx::query_as::<_, LeagueEntity>(
            r#"
            INSERT INTO leagues (name, slug, description, visibility, logo_url, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, slug, description, visibility, logo_url, archived_at,
                      created_by, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(visibility)
        .bind(logo_url)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    /// Creates a league and seats its creator as the founding executive, in
    /// one transaction.
    pub async fn create_with_executive(
        &self,
        name: &str,
        slug: &str,
        description: Option<&str>,
        visibility: LeagueVisibilityDb,
        logo_url: Option<&str>,
        created_by: Uuid,
    ) -> Result<LeagueEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let league = sqlx::query_as::<_, LeagueEntity>(
            r#"
            INSERT INTO leagues (name, slug, description, visibility, logo_url, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, slug, description, visibility, logo_url, archived_at,
                      created_by, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(visibility)
        .bind(logo_url)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO league_members (league_id, user_id, role)
            VALUES ($1, $2, 'executive')
            "#,
        )
        .bind(league.id)
        .bind(created_by)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(league)
    }

    /// Finds a league by ID.
    pub async fn find_by_id(&self, league_id: Uuid) -> Result<Option<LeagueEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueEntity>(
            r#"
            SELECT id, name, slug, description, visibility, logo_url, archived_at,
                   created_by, created_at, updated_at
            FROM leagues
            WHERE id = $1
            "#,
        )
        .bind(league_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a league together with the caller's membership and member count.
    pub async fn find_with_membership(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<LeagueWithMembershipEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueWithMembershipEntity>(
            r#"
            SELECT l.id, l.name, l.slug, l.description, l.visibility, l.logo_url,
                   l.archived_at, l.created_by, l.created_at, l.updated_at,
                   m.id AS membership_id, m.role, m.joined_at,
                   (SELECT COUNT(*) FROM league_members WHERE league_id = l.id) AS member_count
            FROM leagues l
            JOIN league_members m ON m.league_id = l.id AND m.user_id = $2
            WHERE l.id = $1
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists the leagues the user belongs to, newest membership first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<LeagueWithMembershipEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueWithMembershipEntity>(
            r#"
            SELECT l.id, l.name, l.slug, l.description, l.visibility, l.logo_url,
                   l.archived_at, l.created_by, l.created_at, l.updated_at,
                   m.id AS membership_id, m.role, m.joined_at,
                   (SELECT COUNT(*) FROM league_members WHERE league_id = l.id) AS member_count
            FROM leagues l
            JOIN league_members m ON m.league_id = l.id
            WHERE m.user_id = $1
            ORDER BY m.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Updates a league's mutable fields. Passing None keeps a field.
    pub async fn update(
        &self,
        league_id: Uuid,
        name: Option<&str>,
        slug: Option<&str>,
        description: Option<&str>,
        visibility: Option<LeagueVisibilityDb>,
        logo_url: Option<&str>,
    ) -> Result<LeagueEntity, sqlx::Error> {
        sqlx::query_as::<_, LeagueEntity>(
            r#"
            UPDATE leagues
            SET name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                visibility = COALESCE($5, visibility),
                logo_url = COALESCE($6, logo_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, description, visibility, logo_url, archived_at,
                      created_by, created_at, updated_at
            "#,
        )
        .bind(league_id)
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(visibility)
        .bind(logo_url)
        .fetch_one(&self.pool)
        .await
    }

    /// Archives a league. Returns false if it was already archived.
    pub async fn archive(&self, league_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE leagues
            SET archived_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND archived_at IS NULL
            "#,
        )
        .bind(league_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts current members of a league.
    pub async fn member_count(&self, league_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM league_members WHERE league_id = $1
            "#,
        )
        .bind(league_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Resolves a unique slug by appending a numeric suffix on collision.
    pub async fn generate_unique_slug(&self, base_slug: &str) -> Result<String, sqlx::Error> {
        let mut candidate = base_slug.to_string();
        let mut suffix = 2;

        loop {
            let exists: bool = sqlx::query_scalar(
                r#"
                SELECT EXISTS(SELECT 1 FROM leagues WHERE slug = $1)
                "#,
            )
            .bind(&candidate)
            .fetch_one(&self.pool)
            .await?;

            if !exists {
                return Ok(candidate);
            }

            candidate = format!("{}-{}", base_slug, suffix);
            suffix += 1;
        }
    }
}
