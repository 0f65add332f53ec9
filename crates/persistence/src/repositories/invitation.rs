//! Repository for direct invitation database operations.

use chrono::{DateTime, Duration, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{InvitationEntity, LeagueRoleDb};

/// Repository for direct invitation operations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a direct invitation.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        league_id: Uuid,
        email: &str,
        invitee_user_id: Option<Uuid>,
        role: LeagueRoleDb,
        invited_by: Uuid,
        note: Option<&str>,
        expires_at: DateTime<Utc>,
    ) -> Result<InvitationEntity, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            INSERT INTO invitations (league_id, email, invitee_user_id, role, invited_by, note, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, league_id, email, invitee_user_id, role, status, note,
                      invited_by, expires_at, responded_at, created_at
            "#,
        )
        .bind(league_id)
        .bind(email)
        .bind(invitee_user_id)
        .bind(role)
        .bind(invited_by)
        .bind(note)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds an invitation by ID.
    pub async fn find_by_id(
        &self,
        invitation_id: Uuid,
    ) -> Result<Option<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, league_id, email, invitee_user_id, role, status, note,
                   invited_by, expires_at, responded_at, created_at
            FROM invitations
            WHERE id = $1
            "#,
        )
        .bind(invitation_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists invitations for a league with a status filter.
    ///
    /// Status filter options:
    /// - "pending": stored pending and not past expiry
    /// - "accepted" / "declined": the stored terminal states
    /// - "expired": stored pending but past expiry
    /// - "all" or None: everything
    pub async fn list_by_league_with_status(
        &self,
        league_id: Uuid,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<InvitationEntity>, sqlx::Error> {
        let query = match status {
            Some("pending") => {
                r#"
                SELECT id, league_id, email, invitee_user_id, role, status, note,
                       invited_by, expires_at, responded_at, created_at
                FROM invitations
                WHERE league_id = $1 AND status = 'pending' AND expires_at > NOW()
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#
            }
            Some("accepted") => {
                r#"
                SELECT id, league_id, email, invitee_user_id, role, status, note,
                       invited_by, expires_at, responded_at, created_at
                FROM invitations
                WHERE league_id = $1 AND status = 'accepted'
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#
            }
            Some("declined") => {
                r#"
                SELECT id, league_id, email, invitee_user_id, role, status, note,
                       invited_by, expires_at, responded_at, created_at
                FROM invitations
                WHERE league_id = $1 AND status = 'declined'
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#
            }
            Some("expired") => {
                r#"
                SELECT id, league_id, email, invitee_user_id, role, status, note,
                       invited_by, expires_at, responded_at, created_at
                FROM invitations
                WHERE league_id = $1 AND status = 'pending' AND expires_at <= NOW()
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#
            }
            _ => {
                r#"
                SELECT id, league_id, email, invitee_user_id, role, status, note,
                       invited_by, expires_at, responded_at, created_at
                FROM invitations
                WHERE league_id = $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#
            }
        };

        sqlx::query_as::<_, InvitationEntity>(query)
            .bind(league_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Counts invitations for a league with the same status filter semantics
    /// as `list_by_league_with_status`.
    pub async fn count_by_league_with_status(
        &self,
        league_id: Uuid,
        status: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = match status {
            Some("pending") => {
                "SELECT COUNT(*) FROM invitations WHERE league_id = $1 AND status = 'pending' AND expires_at > NOW()"
            }
            Some("accepted") => {
                "SELECT COUNT(*) FROM invitations WHERE league_id = $1 AND status = 'accepted'"
            }
            Some("declined") => {
                "SELECT COUNT(*) FROM invitations WHERE league_id = $1 AND status = 'declined'"
            }
            Some("expired") => {
                "SELECT COUNT(*) FROM invitations WHERE league_id = $1 AND status = 'pending' AND expires_at <= NOW()"
            }
            _ => "SELECT COUNT(*) FROM invitations WHERE league_id = $1",
        };

        let count: i64 = sqlx::query_scalar(query)
            .bind(league_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Per-status summary counts for a league.
    pub async fn summary_counts(
        &self,
        league_id: Uuid,
    ) -> Result<InvitationSummaryCounts, sqlx::Error> {
        let result: (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending' AND expires_at > NOW()) as pending,
                COUNT(*) FILTER (WHERE status = 'accepted') as accepted,
                COUNT(*) FILTER (WHERE status = 'declined') as declined,
                COUNT(*) FILTER (WHERE status = 'pending' AND expires_at <= NOW()) as expired
            FROM invitations
            WHERE league_id = $1
            "#,
        )
        .bind(league_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(InvitationSummaryCounts {
            pending: result.0,
            accepted: result.1,
            declined: result.2,
            expired: result.3,
        })
    }

    /// Whether an open invitation already exists for this email in the league.
    pub async fn has_open_invitation(
        &self,
        league_id: Uuid,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM invitations
            WHERE league_id = $1 AND LOWER(email) = LOWER($2)
              AND status = 'pending' AND expires_at > NOW()
            "#,
        )
        .bind(league_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Counts open invitations for a league (for the pending-invitation gate).
    pub async fn count_open_by_league(&self, league_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM invitations
            WHERE league_id = $1 AND status = 'pending' AND expires_at > NOW()
            "#,
        )
        .bind(league_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Lists open invitations addressed to a user, newest first.
    pub async fn list_open_for_invitee(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<Vec<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, league_id, email, invitee_user_id, role, status, note,
                   invited_by, expires_at, responded_at, created_at
            FROM invitations
            WHERE status = 'pending'
              AND expires_at > NOW()
              AND (invitee_user_id = $1 OR (invitee_user_id IS NULL AND LOWER(email) = LOWER($2)))
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(email)
        .fetch_all(&self.pool)
        .await
    }

    /// Marks an invitation accepted inside a caller-held transaction.
    ///
    /// The conditional `status = 'pending'` makes the transition one-way;
    /// false means the invitation was no longer pending.
    pub async fn mark_accepted_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invitation_id: Uuid,
        invitee_user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = 'accepted', invitee_user_id = $2, responded_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(invitation_id)
        .bind(invitee_user_id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Marks an invitation declined. False means it was no longer pending.
    pub async fn mark_declined(
        &self,
        invitation_id: Uuid,
        invitee_user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = 'declined', invitee_user_id = $2, responded_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(invitation_id)
        .bind(invitee_user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Marks every open invitation addressed to the user in this league as
    /// accepted, inside a caller-held transaction.
    ///
    /// Join cleanup: a user who enters through another path must not keep a
    /// dangling pending invitation to the same league.
    pub async fn accept_all_open_for_user_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        league_id: Uuid,
        user_id: Uuid,
        email: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE invitations
            SET status = 'accepted', invitee_user_id = $2, responded_at = NOW()
            WHERE league_id = $1
              AND status = 'pending'
              AND expires_at > NOW()
              AND (invitee_user_id = $2 OR (invitee_user_id IS NULL AND LOWER(email) = LOWER($3)))
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .bind(email)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// Deletes a pending invitation. Returns true if a row was deleted.
    pub async fn delete_pending(
        &self,
        invitation_id: Uuid,
        league_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM invitations
            WHERE id = $1 AND league_id = $2 AND status = 'pending'
            "#,
        )
        .bind(invitation_id)
        .bind(league_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Per-status counts for a league's invitations.
#[derive(Debug, Clone)]
pub struct InvitationSummaryCounts {
    pub pending: i64,
    pub accepted: i64,
    pub declined: i64,
    pub expired: i64,
}

/// Default invitation expiration (14 days).
pub fn default_invitation_expiration() -> DateTime<Utc> {
    Utc::now() + Duration::days(14)
}

/// Calculate invitation expiration from days.
pub fn calculate_invitation_expiration(days: i32) -> DateTime<Utc> {
    Utc::now() + Duration::days(days as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_invitation_expiration() {
        let expiration = default_invitation_expiration();
        let diff = expiration - Utc::now();
        assert!(diff.num_days() >= 13 && diff.num_days() <= 14);
    }

    #[test]
    fn test_calculate_invitation_expiration() {
        let expiration = calculate_invitation_expiration(30);
        let diff = expiration - Utc::now();
        assert!(diff.num_days() >= 29 && diff.num_days() <= 30);
    }
}
