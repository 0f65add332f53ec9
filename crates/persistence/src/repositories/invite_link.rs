//! Repository for invite link database operations.
//!
//! Consumption is a single conditional increment-and-check so two
//! redemptions racing at the use cap cannot both pass: the row is checked
//! and bumped in one UPDATE, and the caller commits it together with the
//! membership insert.

use rand::Rng;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{InviteLinkEntity, InviteLinkWithLeagueEntity, LeagueRoleDb};

/// Repository for invite link operations.
#[derive(Clone)]
pub struct InviteLinkRepository {
    pool: PgPool,
}

impl InviteLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates an invite link.
    pub async fn create(
        &self,
        league_id: Uuid,
        token: &str,
        role: LeagueRoleDb,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
        max_uses: Option<i32>,
        created_by: Uuid,
    ) -> Result<InviteLinkEntity, sqlx::Error> {
        sqlx::query_as::<_, InviteLinkEntity>(
            r#"
            INSERT INTO invite_links (league_id, token, role, expires_at, max_uses, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, league_id, token, role, expires_at, max_uses, current_uses,
                      created_by, created_at, revoked_at
            "#,
        )
        .bind(league_id)
        .bind(token)
        .bind(role)
        .bind(expires_at)
        .bind(max_uses)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    /// Finds a link by its token.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<InviteLinkEntity>, sqlx::Error> {
        sqlx::query_as::<_, InviteLinkEntity>(
            r#"
            SELECT id, league_id, token, role, expires_at, max_uses, current_uses,
                   created_by, created_at, revoked_at
            FROM invite_links
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
    }

    /// Finds a link by token together with league preview columns.
    pub async fn find_by_token_with_league(
        &self,
        token: &str,
    ) -> Result<Option<InviteLinkWithLeagueEntity>, sqlx::Error> {
        sqlx::query_as::<_, InviteLinkWithLeagueEntity>(
            r#"
            SELECT il.id, il.league_id, il.token, il.role, il.expires_at, il.max_uses,
                   il.current_uses, il.created_by, il.created_at, il.revoked_at,
                   l.name AS league_name, l.logo_url AS league_logo_url,
                   l.archived_at AS league_archived_at,
                   (SELECT COUNT(*) FROM league_members WHERE league_id = l.id) AS member_count
            FROM invite_links il
            JOIN leagues l ON l.id = il.league_id
            WHERE il.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists redeemable links for a league.
    pub async fn list_active_by_league(
        &self,
        league_id: Uuid,
    ) -> Result<Vec<InviteLinkEntity>, sqlx::Error> {
        sqlx::query_as::<_, InviteLinkEntity>(
            r#"
            SELECT id, league_id, token, role, expires_at, max_uses, current_uses,
                   created_by, created_at, revoked_at
            FROM invite_links
            WHERE league_id = $1
              AND revoked_at IS NULL
              AND (expires_at IS NULL OR expires_at > NOW())
              AND (max_uses IS NULL OR current_uses < max_uses)
            ORDER BY created_at DESC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Revokes a link. Returns false if it was already revoked.
    pub async fn revoke(&self, link_id: Uuid, league_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE invite_links
            SET revoked_at = NOW()
            WHERE id = $1 AND league_id = $2 AND revoked_at IS NULL
            "#,
        )
        .bind(link_id)
        .bind(league_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Consumes one use of a link inside a caller-held transaction.
    ///
    /// The WHERE clause re-checks revocation, expiry, and the use cap in the
    /// same statement that increments, so only rows that are still
    /// redeemable are bumped. Returns the consumed link, or None when the
    /// link is no longer redeemable (the caller distinguishes why from a
    /// plain read).
    pub async fn consume_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: &str,
    ) -> Result<Option<InviteLinkEntity>, sqlx::Error> {
        sqlx::query_as::<_, InviteLinkEntity>(
            r#"
            UPDATE invite_links
            SET current_uses = current_uses + 1
            WHERE token = $1
              AND revoked_at IS NULL
              AND (expires_at IS NULL OR expires_at > NOW())
              AND (max_uses IS NULL OR current_uses < max_uses)
            RETURNING id, league_id, token, role, expires_at, max_uses, current_uses,
                      created_by, created_at, revoked_at
            "#,
        )
        .bind(token)
        .fetch_optional(&mut **tx)
        .await
    }
}

/// Generate an invite link token.
///
/// URL-safe characters, avoiding confusable ones (0, O, 1, l, I).
pub fn generate_invite_link_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";
    let mut rng = rand::thread_rng();

    (0..32)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_invite_link_token_length() {
        let token = generate_invite_link_token();
        assert_eq!(token.len(), 32);
    }

    #[test]
    fn test_generate_invite_link_token_unique() {
        let token1 = generate_invite_link_token();
        let token2 = generate_invite_link_token();
        assert_ne!(token1, token2);
    }

    #[test]
    fn test_generate_invite_link_token_charset() {
        let token = generate_invite_link_token();
        assert!(!token.contains('0'));
        assert!(!token.contains('O'));
        assert!(!token.contains('1'));
        assert!(!token.contains('l'));
        assert!(!token.contains('I'));
    }
}
