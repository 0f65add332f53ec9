//! Invite link entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::invite_link::InviteLink;
use sqlx::FromRow;
use uuid::Uuid;

use super::league_member::LeagueRoleDb;

/// Database row mapping for the invite_links table.
#[derive(Debug, Clone, FromRow)]
pub struct InviteLinkEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub token: String,
    pub role: LeagueRoleDb,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl From<InviteLinkEntity> for InviteLink {
    fn from(entity: InviteLinkEntity) -> Self {
        Self {
            id: entity.id,
            league_id: entity.league_id,
            token: entity.token,
            role: entity.role.into(),
            expires_at: entity.expires_at,
            max_uses: entity.max_uses,
            current_uses: entity.current_uses,
            created_by: entity.created_by,
            created_at: entity.created_at,
            revoked_at: entity.revoked_at,
        }
    }
}

/// Link row joined with league preview info for the public lookup.
#[derive(Debug, Clone, FromRow)]
pub struct InviteLinkWithLeagueEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub token: String,
    pub role: LeagueRoleDb,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub current_uses: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub league_name: String,
    pub league_logo_url: Option<String>,
    pub league_archived_at: Option<DateTime<Utc>>,
    pub member_count: i64,
}

impl InviteLinkWithLeagueEntity {
    /// The bare link, without the league columns.
    pub fn link(&self) -> InviteLink {
        InviteLink {
            id: self.id,
            league_id: self.league_id,
            token: self.token.clone(),
            role: self.role.into(),
            expires_at: self.expires_at,
            max_uses: self.max_uses,
            current_uses: self.current_uses,
            created_by: self.created_by,
            created_at: self.created_at,
            revoked_at: self.revoked_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::member::LeagueRole;

    #[test]
    fn test_conversion_to_domain() {
        let entity = InviteLinkEntity {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            token: "AbCdEfGh23456789AbCdEfGh23456789".to_string(),
            role: LeagueRoleDb::Manager,
            expires_at: None,
            max_uses: Some(5),
            current_uses: 2,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            revoked_at: None,
        };

        let link: InviteLink = entity.clone().into();
        assert_eq!(link.token, entity.token);
        assert_eq!(link.role, LeagueRole::Manager);
        assert_eq!(link.remaining_uses(), Some(3));
    }
}
