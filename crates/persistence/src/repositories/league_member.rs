//! Repository for league membership database operations.
//!
//! Membership uniqueness is owned by the `UNIQUE (league_id, user_id)`
//! constraint, not by application-level checks: concurrent join attempts for
//! the same pair resolve to exactly one row, and the loser sees no insert.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{LeagueMemberEntity, LeagueRoleDb, MemberWithUserEntity};

/// Repository for league member operations.
#[derive(Clone)]
pub struct LeagueMemberRepository {
    pool: PgPool,
}

impl LeagueMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds a user's membership in a league.
    pub async fn find_by_league_and_user(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<LeagueMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueMemberEntity>(
            r#"
            SELECT id, league_id, user_id, role, joined_at
            FROM league_members
            WHERE league_id = $1 AND user_id = $2
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a user's membership within a caller-held transaction.
    pub async fn find_by_league_and_user_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<LeagueMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueMemberEntity>(
            r#"
            SELECT id, league_id, user_id, role, joined_at
            FROM league_members
            WHERE league_id = $1 AND user_id = $2
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Inserts a membership inside a caller-held transaction.
    ///
    /// Returns None when the unique constraint swallowed the insert because
    /// a membership for (league, user) already exists.
    pub async fn insert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        league_id: Uuid,
        user_id: Uuid,
        role: LeagueRoleDb,
    ) -> Result<Option<LeagueMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueMemberEntity>(
            r#"
            INSERT INTO league_members (league_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (league_id, user_id) DO NOTHING
            RETURNING id, league_id, user_id, role, joined_at
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Lists members with user display info.
    pub async fn list_by_league(
        &self,
        league_id: Uuid,
    ) -> Result<Vec<MemberWithUserEntity>, sqlx::Error> {
        sqlx::query_as::<_, MemberWithUserEntity>(
            r#"
            SELECT m.id, m.league_id, m.user_id, m.role, m.joined_at,
                   u.username, u.display_name
            FROM league_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.league_id = $1
            ORDER BY m.joined_at ASC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts how many leagues a user belongs to.
    pub async fn count_leagues_for_user(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM league_members WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Counts members of a league within a caller-held transaction.
    pub async fn count_by_league_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        league_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM league_members WHERE league_id = $1
            "#,
        )
        .bind(league_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count)
    }

    /// Counts leagues for a user within a caller-held transaction.
    pub async fn count_leagues_for_user_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM league_members WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count)
    }

    /// Counts executives of a league.
    pub async fn count_executives(&self, league_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM league_members
            WHERE league_id = $1 AND role = 'executive'
            "#,
        )
        .bind(league_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Changes a member's role.
    pub async fn update_role(
        &self,
        membership_id: Uuid,
        role: LeagueRoleDb,
    ) -> Result<Option<LeagueMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, LeagueMemberEntity>(
            r#"
            UPDATE league_members
            SET role = $2
            WHERE id = $1
            RETURNING id, league_id, user_id, role, joined_at
            "#,
        )
        .bind(membership_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
    }

    /// Removes a user's membership. Returns true if a row was deleted.
    pub async fn delete_by_league_and_user(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM league_members WHERE league_id = $1 AND user_id = $2
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes a membership inside a caller-held transaction.
    pub async fn delete_by_league_and_user_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM league_members WHERE league_id = $1 AND user_id = $2
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
