//! Repository for team database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{TeamEntity, TeamMemberEntity, TeamMemberWithNameEntity, TeamRoleDb};

/// Repository for team operations.
#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a team and seats the creating league member as its manager,
    /// in one transaction.
    pub async fn create_with_manager(
        &self,
        league_id: Uuid,
        name: &str,
        created_by: Uuid,
        creator_league_member_id: Uuid,
    ) -> Result<TeamEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let team = sqlx::query_as::<_, TeamEntity>(
            r#"
            INSERT INTO teams (league_id, name, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, league_id, name, created_by, created_at
            "#,
        )
        .bind(league_id)
        .bind(name)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, league_member_id, role)
            VALUES ($1, $2, 'manager')
            "#,
        )
        .bind(team.id)
        .bind(creator_league_member_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(team)
    }

    /// Finds a team by ID within a league.
    pub async fn find_by_id(
        &self,
        team_id: Uuid,
        league_id: Uuid,
    ) -> Result<Option<TeamEntity>, sqlx::Error> {
        sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, league_id, name, created_by, created_at
            FROM teams
            WHERE id = $1 AND league_id = $2
            "#,
        )
        .bind(team_id)
        .bind(league_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists teams in a league.
    pub async fn list_by_league(&self, league_id: Uuid) -> Result<Vec<TeamEntity>, sqlx::Error> {
        sqlx::query_as::<_, TeamEntity>(
            r#"
            SELECT id, league_id, name, created_by, created_at
            FROM teams
            WHERE league_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Renames a team.
    pub async fn rename(&self, team_id: Uuid, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE teams SET name = $2 WHERE id = $1
            "#,
        )
        .bind(team_id)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds a league member's seat on a team.
    pub async fn get_team_membership(
        &self,
        team_id: Uuid,
        league_member_id: Uuid,
    ) -> Result<Option<TeamMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, TeamMemberEntity>(
            r#"
            SELECT id, team_id, league_member_id, role, joined_at
            FROM team_members
            WHERE team_id = $1 AND league_member_id = $2
            "#,
        )
        .bind(team_id)
        .bind(league_member_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Adds a league member to a team.
    ///
    /// Returns None when the member already has a seat (unique constraint).
    pub async fn add_member(
        &self,
        team_id: Uuid,
        league_member_id: Uuid,
        role: TeamRoleDb,
    ) -> Result<Option<TeamMemberEntity>, sqlx::Error> {
        sqlx::query_as::<_, TeamMemberEntity>(
            r#"
            INSERT INTO team_members (team_id, league_member_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (team_id, league_member_id) DO NOTHING
            RETURNING id, team_id, league_member_id, role, joined_at
            "#,
        )
        .bind(team_id)
        .bind(league_member_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
    }

    /// Removes a member from a team. Returns true if a seat was deleted.
    pub async fn remove_member(
        &self,
        team_id: Uuid,
        league_member_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM team_members WHERE team_id = $1 AND league_member_id = $2
            "#,
        )
        .bind(team_id)
        .bind(league_member_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the roster with display names.
    pub async fn roster(&self, team_id: Uuid) -> Result<Vec<TeamMemberWithNameEntity>, sqlx::Error> {
        sqlx::query_as::<_, TeamMemberWithNameEntity>(
            r#"
            SELECT tm.id, tm.team_id, tm.league_member_id, tm.role, tm.joined_at,
                   u.display_name
            FROM team_members tm
            JOIN league_members m ON m.id = tm.league_member_id
            JOIN users u ON u.id = m.user_id
            WHERE tm.team_id = $1
            ORDER BY tm.joined_at ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts managers on a team.
    pub async fn count_managers(&self, team_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM team_members
            WHERE team_id = $1 AND role = 'manager'
            "#,
        )
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
