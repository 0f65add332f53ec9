//! Direct invitation entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::invitation::{effective_status, InvitationStatus};
use sqlx::FromRow;
use uuid::Uuid;

use super::league_member::LeagueRoleDb;

/// Database enum for invitation_status.
///
/// Only the three stored states exist here; `expired` is derived at read
/// time and never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invitation_status", rename_all = "lowercase")]
pub enum InvitationStatusDb {
    Pending,
    Accepted,
    Declined,
}

impl From<InvitationStatusDb> for InvitationStatus {
    fn from(db: InvitationStatusDb) -> Self {
        match db {
            InvitationStatusDb::Pending => InvitationStatus::Pending,
            InvitationStatusDb::Accepted => InvitationStatus::Accepted,
            InvitationStatusDb::Declined => InvitationStatus::Declined,
        }
    }
}

/// Database row mapping for the invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub email: String,
    pub invitee_user_id: Option<Uuid>,
    pub role: LeagueRoleDb,
    pub status: InvitationStatusDb,
    pub note: Option<String>,
    pub invited_by: Uuid,
    pub expires_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl InvitationEntity {
    /// The status this invitation presents, with lazy expiry.
    pub fn status_now(&self) -> InvitationStatus {
        effective_status(self.status.into(), self.expires_at, Utc::now())
    }

    /// Pending and not past expiry.
    pub fn is_open(&self) -> bool {
        self.status_now() == InvitationStatus::Pending
    }

    /// Whether the given authenticated user may respond to this invitation.
    ///
    /// The invitee matches either by bound user id or, for invitations sent
    /// before the account existed, by email.
    pub fn is_addressed_to(&self, user_id: Uuid, email: &str) -> bool {
        match self.invitee_user_id {
            Some(bound) => bound == user_id,
            None => self.email.eq_ignore_ascii_case(email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_invitation(
        status: InvitationStatusDb,
        expires_at: DateTime<Utc>,
        invitee_user_id: Option<Uuid>,
    ) -> InvitationEntity {
        InvitationEntity {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            email: "invitee@example.com".to_string(),
            invitee_user_id,
            role: LeagueRoleDb::Member,
            status,
            note: None,
            invited_by: Uuid::new_v4(),
            expires_at,
            responded_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_now_pending() {
        let invitation = test_invitation(
            InvitationStatusDb::Pending,
            Utc::now() + Duration::days(7),
            None,
        );
        assert_eq!(invitation.status_now(), InvitationStatus::Pending);
        assert!(invitation.is_open());
    }

    #[test]
    fn test_status_now_lazily_expires() {
        let invitation = test_invitation(
            InvitationStatusDb::Pending,
            Utc::now() - Duration::hours(1),
            None,
        );
        assert_eq!(invitation.status_now(), InvitationStatus::Expired);
        assert!(!invitation.is_open());
    }

    #[test]
    fn test_status_now_terminal_states_stick() {
        let accepted = test_invitation(
            InvitationStatusDb::Accepted,
            Utc::now() - Duration::days(30),
            None,
        );
        assert_eq!(accepted.status_now(), InvitationStatus::Accepted);

        let declined = test_invitation(
            InvitationStatusDb::Declined,
            Utc::now() - Duration::days(30),
            None,
        );
        assert_eq!(declined.status_now(), InvitationStatus::Declined);
    }

    #[test]
    fn test_is_addressed_to_by_bound_user() {
        let user_id = Uuid::new_v4();
        let invitation = test_invitation(
            InvitationStatusDb::Pending,
            Utc::now() + Duration::days(7),
            Some(user_id),
        );
        assert!(invitation.is_addressed_to(user_id, "someone-else@example.com"));
        assert!(!invitation.is_addressed_to(Uuid::new_v4(), "invitee@example.com"));
    }

    #[test]
    fn test_is_addressed_to_by_email_when_unbound() {
        let invitation = test_invitation(
            InvitationStatusDb::Pending,
            Utc::now() + Duration::days(7),
            None,
        );
        assert!(invitation.is_addressed_to(Uuid::new_v4(), "INVITEE@example.com"));
        assert!(!invitation.is_addressed_to(Uuid::new_v4(), "other@example.com"));
    }
}
