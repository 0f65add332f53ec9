//! Repository for conduct report database operations.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{ReportEntity, ReportReasonDb};

/// Repository for report operations.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a report.
    pub async fn create(
        &self,
        league_id: Uuid,
        reporter_id: Uuid,
        reported_user_id: Uuid,
        reason: ReportReasonDb,
        description: &str,
        evidence_url: Option<&str>,
    ) -> Result<ReportEntity, sqlx::Error> {
        sqlx::query_as::<_, ReportEntity>(
            r#"
            INSERT INTO reports (league_id, reporter_id, reported_user_id, reason, description, evidence_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, league_id, reporter_id, reported_user_id, reason, description,
                      evidence_url, status, created_at, resolved_at
            "#,
        )
        .bind(league_id)
        .bind(reporter_id)
        .bind(reported_user_id)
        .bind(reason)
        .bind(description)
        .bind(evidence_url)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a report by ID.
    pub async fn find_by_id(&self, report_id: Uuid) -> Result<Option<ReportEntity>, sqlx::Error> {
        sqlx::query_as::<_, ReportEntity>(
            r#"
            SELECT id, league_id, reporter_id, reported_user_id, reason, description,
                   evidence_url, status, created_at, resolved_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(report_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Whether the reporter already has a pending report against this target
    /// in this league.
    pub async fn has_pending_duplicate(
        &self,
        league_id: Uuid,
        reporter_id: Uuid,
        reported_user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM reports
            WHERE league_id = $1 AND reporter_id = $2 AND reported_user_id = $3
              AND status = 'pending'
            "#,
        )
        .bind(league_id)
        .bind(reporter_id)
        .bind(reported_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Lists reports for a league, optionally filtered by status, newest first.
    pub async fn list_by_league(
        &self,
        league_id: Uuid,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReportEntity>, sqlx::Error> {
        let query = match status {
            Some("pending") => {
                r#"
                SELECT id, league_id, reporter_id, reported_user_id, reason, description,
                       evidence_url, status, created_at, resolved_at
                FROM reports
                WHERE league_id = $1 AND status = 'pending'
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#
            }
            Some("resolved") => {
                r#"
                SELECT id, league_id, reporter_id, reported_user_id, reason, description,
                       evidence_url, status, created_at, resolved_at
                FROM reports
                WHERE league_id = $1 AND status = 'resolved'
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#
            }
            _ => {
                r#"
                SELECT id, league_id, reporter_id, reported_user_id, reason, description,
                       evidence_url, status, created_at, resolved_at
                FROM reports
                WHERE league_id = $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#
            }
        };

        sqlx::query_as::<_, ReportEntity>(query)
            .bind(league_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Counts reports for a league with the same filter semantics as
    /// `list_by_league`.
    pub async fn count_by_league(
        &self,
        league_id: Uuid,
        status: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = match status {
            Some("pending") => {
                "SELECT COUNT(*) FROM reports WHERE league_id = $1 AND status = 'pending'"
            }
            Some("resolved") => {
                "SELECT COUNT(*) FROM reports WHERE league_id = $1 AND status = 'resolved'"
            }
            _ => "SELECT COUNT(*) FROM reports WHERE league_id = $1",
        };

        let count: i64 = sqlx::query_scalar(query)
            .bind(league_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Resolves a report inside a caller-held transaction.
    ///
    /// The conditional `status = 'pending'` keeps resolution one-way; false
    /// means the report was already resolved.
    pub async fn resolve_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        report_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE reports
            SET status = 'resolved', resolved_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(report_id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
