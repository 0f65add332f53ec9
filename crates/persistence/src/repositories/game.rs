//! Repositories for game type and match database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GameTypeEntity, MatchEntity};

/// Repository for game type operations.
#[derive(Clone)]
pub struct GameTypeRepository {
    pool: PgPool,
}

impl GameTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a game type.
    ///
    /// The unique index on (league_id, lower(name)) rejects duplicates.
    pub async fn create(
        &self,
        league_id: Uuid,
        name: &str,
        description: Option<&str>,
        icon: Option<&str>,
        created_by: Uuid,
    ) -> Result<GameTypeEntity, sqlx::Error> {
        sqlx::query_as::<_, GameTypeEntity>(
            r#"
            INSERT INTO game_types (league_id, name, description, icon, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, league_id, name, description, icon, created_by, created_at
            "#,
        )
        .bind(league_id)
        .bind(name)
        .bind(description)
        .bind(icon)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a game type by ID within a league.
    pub async fn find_by_id(
        &self,
        game_type_id: Uuid,
        league_id: Uuid,
    ) -> Result<Option<GameTypeEntity>, sqlx::Error> {
        sqlx::query_as::<_, GameTypeEntity>(
            r#"
            SELECT id, league_id, name, description, icon, created_by, created_at
            FROM game_types
            WHERE id = $1 AND league_id = $2
            "#,
        )
        .bind(game_type_id)
        .bind(league_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists game types in a league.
    pub async fn list_by_league(
        &self,
        league_id: Uuid,
    ) -> Result<Vec<GameTypeEntity>, sqlx::Error> {
        sqlx::query_as::<_, GameTypeEntity>(
            r#"
            SELECT id, league_id, name, description, icon, created_by, created_at
            FROM game_types
            WHERE league_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Deletes a game type. Returns true if a row was deleted.
    pub async fn delete(&self, game_type_id: Uuid, league_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM game_types WHERE id = $1 AND league_id = $2
            "#,
        )
        .bind(game_type_id)
        .bind(league_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Repository for match operations.
#[derive(Clone)]
pub struct MatchRepository {
    pool: PgPool,
}

impl MatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a match.
    pub async fn create(
        &self,
        league_id: Uuid,
        game_type_id: Uuid,
        reported_by: Uuid,
        played_at: DateTime<Utc>,
        participants: &serde_json::Value,
    ) -> Result<MatchEntity, sqlx::Error> {
        sqlx::query_as::<_, MatchEntity>(
            r#"
            INSERT INTO matches (league_id, game_type_id, reported_by, played_at, participants)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, league_id, game_type_id, reported_by, played_at, participants, created_at
            "#,
        )
        .bind(league_id)
        .bind(game_type_id)
        .bind(reported_by)
        .bind(played_at)
        .bind(participants)
        .fetch_one(&self.pool)
        .await
    }

    /// Lists recent matches in a league, newest first.
    pub async fn list_recent(
        &self,
        league_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MatchEntity>, sqlx::Error> {
        sqlx::query_as::<_, MatchEntity>(
            r#"
            SELECT id, league_id, game_type_id, reported_by, played_at, participants, created_at
            FROM matches
            WHERE league_id = $1
            ORDER BY played_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(league_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Counts how many of the given IDs are usable participants in the
    /// league: active league members or non-retired placeholders.
    pub async fn count_valid_participants(
        &self,
        league_id: Uuid,
        ids: &[Uuid],
    ) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT
                (SELECT COUNT(*) FROM league_members
                 WHERE league_id = $1 AND id = ANY($2))
              + (SELECT COUNT(*) FROM placeholder_members
                 WHERE league_id = $1 AND retired_at IS NULL AND id = ANY($2))
            "#,
        )
        .bind(league_id)
        .bind(ids)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Counts matches in a league.
    pub async fn count_by_league(&self, league_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM matches WHERE league_id = $1
            "#,
        )
        .bind(league_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
