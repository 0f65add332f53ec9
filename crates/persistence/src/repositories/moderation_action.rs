//! Repository for moderation action database operations.
//!
//! The action log is append-only. Suspension state is derived from it on
//! read; nothing here updates or deletes an action.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{ModerationActionEntity, ModerationActionTypeDb};

/// Repository for moderation action operations.
#[derive(Clone)]
pub struct ModerationActionRepository {
    pool: PgPool,
}

impl ModerationActionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records an action inside a caller-held transaction, so that report
    /// resolution and membership removal commit with it or not at all.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        league_id: Uuid,
        report_id: Option<Uuid>,
        actor_id: Uuid,
        target_user_id: Uuid,
        action_type: ModerationActionTypeDb,
        reason: &str,
        suspension_days: Option<i32>,
    ) -> Result<ModerationActionEntity, sqlx::Error> {
        sqlx::query_as::<_, ModerationActionEntity>(
            r#"
            INSERT INTO moderation_actions
                (league_id, report_id, actor_id, target_user_id, action_type, reason, suspension_days)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, league_id, report_id, actor_id, target_user_id, action_type,
                      reason, suspension_days, created_at
            "#,
        )
        .bind(league_id)
        .bind(report_id)
        .bind(actor_id)
        .bind(target_user_id)
        .bind(action_type)
        .bind(reason)
        .bind(suspension_days)
        .fetch_one(&mut **tx)
        .await
    }

    /// Lists every action against a user in a league, newest first.
    pub async fn list_for_target(
        &self,
        league_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<Vec<ModerationActionEntity>, sqlx::Error> {
        sqlx::query_as::<_, ModerationActionEntity>(
            r#"
            SELECT id, league_id, report_id, actor_id, target_user_id, action_type,
                   reason, suspension_days, created_at
            FROM moderation_actions
            WHERE league_id = $1 AND target_user_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(league_id)
        .bind(target_user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Lists warnings against a user in a league, newest first.
    pub async fn list_warnings_for_target(
        &self,
        league_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<Vec<ModerationActionEntity>, sqlx::Error> {
        sqlx::query_as::<_, ModerationActionEntity>(
            r#"
            SELECT id, league_id, report_id, actor_id, target_user_id, action_type,
                   reason, suspension_days, created_at
            FROM moderation_actions
            WHERE league_id = $1 AND target_user_id = $2 AND action_type = 'warned'
            ORDER BY created_at DESC
            "#,
        )
        .bind(league_id)
        .bind(target_user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Lists suspension actions against a user in a league.
    ///
    /// The caller derives the active window from these with
    /// `domain::models::moderation::suspended_until`.
    pub async fn list_suspensions_for_target(
        &self,
        league_id: Uuid,
        target_user_id: Uuid,
    ) -> Result<Vec<ModerationActionEntity>, sqlx::Error> {
        sqlx::query_as::<_, ModerationActionEntity>(
            r#"
            SELECT id, league_id, report_id, actor_id, target_user_id, action_type,
                   reason, suspension_days, created_at
            FROM moderation_actions
            WHERE league_id = $1 AND target_user_id = $2 AND action_type = 'suspended'
            ORDER BY created_at DESC
            "#,
        )
        .bind(league_id)
        .bind(target_user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Lists actions taken in a league, newest first.
    pub async fn list_by_league(
        &self,
        league_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ModerationActionEntity>, sqlx::Error> {
        sqlx::query_as::<_, ModerationActionEntity>(
            r#"
            SELECT id, league_id, report_id, actor_id, target_user_id, action_type,
                   reason, suspension_days, created_at
            FROM moderation_actions
            WHERE league_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(league_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }
}
