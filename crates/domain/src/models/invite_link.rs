//! Shareable invite link domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::models::member::LeagueRole;

/// A shareable token granting join rights under configured constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteLink {
    pub id: Uuid,
    pub league_id: Uuid,
    pub token: String,
    pub role: LeagueRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
}

impl InviteLink {
    /// Whether the link can still be redeemed. League archival is checked by
    /// the caller, which holds the league row.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.invalid_reason(now).is_none()
    }

    /// Why the link cannot be redeemed, if it cannot.
    ///
    /// Revocation wins over expiry, expiry over exhaustion, so the reported
    /// reason is stable as time passes.
    pub fn invalid_reason(&self, now: DateTime<Utc>) -> Option<InviteLinkInvalidReason> {
        if self.revoked_at.is_some() {
            return Some(InviteLinkInvalidReason::Revoked);
        }
        if self.expires_at.is_some_and(|exp| now >= exp) {
            return Some(InviteLinkInvalidReason::Expired);
        }
        if self.max_uses.is_some_and(|max| self.current_uses >= max) {
            return Some(InviteLinkInvalidReason::UsageLimitReached);
        }
        None
    }

    /// Remaining uses (None if uncapped).
    pub fn remaining_uses(&self) -> Option<i32> {
        self.max_uses.map(|max| (max - self.current_uses).max(0))
    }
}

/// Why an invite link is not redeemable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteLinkInvalidReason {
    Expired,
    UsageLimitReached,
    Revoked,
    LeagueArchived,
}

impl InviteLinkInvalidReason {
    pub fn message(&self) -> &'static str {
        match self {
            InviteLinkInvalidReason::Expired => "expired",
            InviteLinkInvalidReason::UsageLimitReached => "usage limit reached",
            InviteLinkInvalidReason::Revoked => "revoked",
            InviteLinkInvalidReason::LeagueArchived => "league archived",
        }
    }
}

impl fmt::Display for InviteLinkInvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Request payload for creating an invite link.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateInviteLinkRequest {
    /// Role granted on join. Executive seats cannot be handed out by link.
    pub role: Option<LeagueRole>,

    #[validate(custom(function = "shared::validation::validate_invite_link_lifetime"))]
    pub expires_in_hours: Option<i32>,

    #[validate(custom(function = "shared::validation::validate_invite_link_max_uses"))]
    pub max_uses: Option<i32>,
}

/// Invite link as shown to its managers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteLinkResponse {
    pub id: Uuid,
    pub league_id: Uuid,
    pub token: String,
    pub url: String,
    pub role: LeagueRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_uses: Option<i32>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// League preview on the public link-details endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PublicLeagueInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub member_count: i64,
}

/// Public details for an invite link token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InviteLinkDetails {
    pub league: PublicLeagueInfo,
    pub role: LeagueRole,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<InviteLinkInvalidReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_link(
        expires_at: Option<DateTime<Utc>>,
        max_uses: Option<i32>,
        current_uses: i32,
        revoked_at: Option<DateTime<Utc>>,
    ) -> InviteLink {
        InviteLink {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            token: "AbCdEfGh23456789AbCdEfGh23456789".to_string(),
            role: LeagueRole::Member,
            expires_at,
            max_uses,
            current_uses,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            revoked_at,
        }
    }

    #[test]
    fn test_open_ended_link_is_valid() {
        let link = test_link(None, None, 10_000, None);
        assert!(link.is_valid(Utc::now()));
        assert_eq!(link.remaining_uses(), None);
    }

    #[test]
    fn test_expired_link() {
        let now = Utc::now();
        let link = test_link(Some(now - Duration::hours(1)), None, 0, None);
        assert_eq!(link.invalid_reason(now), Some(InviteLinkInvalidReason::Expired));
    }

    #[test]
    fn test_exhausted_link() {
        let now = Utc::now();
        let link = test_link(None, Some(5), 5, None);
        assert_eq!(
            link.invalid_reason(now),
            Some(InviteLinkInvalidReason::UsageLimitReached)
        );
        assert_eq!(link.remaining_uses(), Some(0));
    }

    #[test]
    fn test_link_with_one_use_left() {
        let now = Utc::now();
        let link = test_link(None, Some(5), 4, None);
        assert!(link.is_valid(now));
        assert_eq!(link.remaining_uses(), Some(1));
    }

    #[test]
    fn test_revoked_wins_over_other_reasons() {
        let now = Utc::now();
        let link = test_link(Some(now - Duration::hours(1)), Some(1), 1, Some(now));
        assert_eq!(link.invalid_reason(now), Some(InviteLinkInvalidReason::Revoked));
    }

    #[test]
    fn test_expiry_boundary_is_exclusive() {
        let now = Utc::now();
        let link = test_link(Some(now), None, 0, None);
        // A link expiring exactly now is no longer redeemable.
        assert!(!link.is_valid(now));
    }

    #[test]
    fn test_reason_messages() {
        assert_eq!(InviteLinkInvalidReason::Expired.message(), "expired");
        assert_eq!(
            InviteLinkInvalidReason::UsageLimitReached.message(),
            "usage limit reached"
        );
        assert_eq!(InviteLinkInvalidReason::Revoked.message(), "revoked");
        assert_eq!(InviteLinkInvalidReason::LeagueArchived.message(), "league archived");
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateInviteLinkRequest {
            role: Some(LeagueRole::Member),
            expires_in_hours: Some(48),
            max_uses: Some(10),
        };
        assert!(valid.validate().is_ok());

        let zero_uses = CreateInviteLinkRequest {
            role: None,
            expires_in_hours: None,
            max_uses: Some(0),
        };
        assert!(zero_uses.validate().is_err());
    }
}
