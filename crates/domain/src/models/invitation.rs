//! Direct invitation domain models.
//!
//! Direct invitations target a single email address. Status transitions are
//! one-way: pending moves to accepted or declined exactly once, and a pending
//! invitation past its expiry reads as expired without ever being written
//! back (lazy evaluation, no background job).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::member::LeagueRole;

/// Lifecycle state of a direct invitation.
///
/// `Expired` is derived at read time from `expires_at`; only the other three
/// are ever stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Expired,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
            InvitationStatus::Expired => "expired",
        }
    }
}

impl FromStr for InvitationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "declined" => Ok(InvitationStatus::Declined),
            "expired" => Ok(InvitationStatus::Expired),
            _ => Err(format!("Invalid invitation status: {}", s)),
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The status an invitation presents given its stored state and expiry.
pub fn effective_status(
    stored: InvitationStatus,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> InvitationStatus {
    if stored == InvitationStatus::Pending && expires_at <= now {
        InvitationStatus::Expired
    } else {
        stored
    }
}

/// Request payload for creating a direct invitation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateInvitationRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub role: Option<LeagueRole>,

    #[validate(length(max = 300, message = "Note must be at most 300 characters"))]
    pub note: Option<String>,

    #[validate(custom(function = "shared::validation::validate_invitation_lifetime"))]
    pub expires_in_days: Option<i32>,
}

/// Query parameters for listing invitations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitationsQuery {
    /// pending | accepted | declined | expired | all
    pub status: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Invitation detail in listings and lookups.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationResponse {
    pub id: Uuid,
    pub league_id: Uuid,
    pub email: String,
    pub role: LeagueRole,
    pub status: InvitationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub invited_by: Uuid,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Per-status counts returned with invitation listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationSummary {
    pub pending: i64,
    pub accepted: i64,
    pub declined: i64,
    pub expired: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_round_trip() {
        for status in [
            InvitationStatus::Pending,
            InvitationStatus::Accepted,
            InvitationStatus::Declined,
            InvitationStatus::Expired,
        ] {
            assert_eq!(status.as_str().parse::<InvitationStatus>().unwrap(), status);
        }
        assert!("revoked".parse::<InvitationStatus>().is_err());
    }

    #[test]
    fn test_effective_status_pending_unexpired() {
        let now = Utc::now();
        assert_eq!(
            effective_status(InvitationStatus::Pending, now + Duration::days(1), now),
            InvitationStatus::Pending
        );
    }

    #[test]
    fn test_effective_status_pending_past_expiry_reads_expired() {
        let now = Utc::now();
        assert_eq!(
            effective_status(InvitationStatus::Pending, now - Duration::hours(1), now),
            InvitationStatus::Expired
        );
    }

    #[test]
    fn test_effective_status_terminal_states_ignore_expiry() {
        let now = Utc::now();
        let past = now - Duration::days(30);
        assert_eq!(
            effective_status(InvitationStatus::Accepted, past, now),
            InvitationStatus::Accepted
        );
        assert_eq!(
            effective_status(InvitationStatus::Declined, past, now),
            InvitationStatus::Declined
        );
    }

    #[test]
    fn test_create_invitation_request_validation() {
        let valid = CreateInvitationRequest {
            email: "rival@example.com".to_string(),
            role: Some(LeagueRole::Member),
            note: Some("Join us on Thursdays".to_string()),
            expires_in_days: Some(7),
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_create_invitation_invalid_email() {
        let invalid = CreateInvitationRequest {
            email: "not-an-email".to_string(),
            role: None,
            note: None,
            expires_in_days: None,
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_create_invitation_lifetime_out_of_range() {
        let invalid = CreateInvitationRequest {
            email: "rival@example.com".to_string(),
            role: None,
            note: None,
            expires_in_days: Some(0),
        };
        assert!(invalid.validate().is_err());
    }
}
