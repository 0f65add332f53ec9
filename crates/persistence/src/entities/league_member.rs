//! League member and placeholder member entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::member::{LeagueMember, LeagueRole, PlaceholderMember};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for league_role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "league_role", rename_all = "lowercase")]
pub enum LeagueRoleDb {
    Member,
    Manager,
    Executive,
}

impl From<LeagueRoleDb> for LeagueRole {
    fn from(db: LeagueRoleDb) -> Self {
        match db {
            LeagueRoleDb::Member => LeagueRole::Member,
            LeagueRoleDb::Manager => LeagueRole::Manager,
            LeagueRoleDb::Executive => LeagueRole::Executive,
        }
    }
}

impl From<LeagueRole> for LeagueRoleDb {
    fn from(role: LeagueRole) -> Self {
        match role {
            LeagueRole::Member => LeagueRoleDb::Member,
            LeagueRole::Manager => LeagueRoleDb::Manager,
            LeagueRole::Executive => LeagueRoleDb::Executive,
        }
    }
}

/// Database row mapping for the league_members table.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueMemberEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub role: LeagueRoleDb,
    pub joined_at: DateTime<Utc>,
}

impl From<LeagueMemberEntity> for LeagueMember {
    fn from(entity: LeagueMemberEntity) -> Self {
        Self {
            id: entity.id,
            league_id: entity.league_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            joined_at: entity.joined_at,
        }
    }
}

/// Member row joined with user display info for listings.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithUserEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub role: LeagueRoleDb,
    pub joined_at: DateTime<Utc>,
    pub username: String,
    pub display_name: String,
}

/// Database row mapping for the placeholder_members table.
#[derive(Debug, Clone, FromRow)]
pub struct PlaceholderMemberEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub display_name: String,
    pub created_by: Uuid,
    pub retired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PlaceholderMemberEntity {
    pub fn is_retired(&self) -> bool {
        self.retired_at.is_some()
    }
}

impl From<PlaceholderMemberEntity> for PlaceholderMember {
    fn from(entity: PlaceholderMemberEntity) -> Self {
        Self {
            id: entity.id,
            league_id: entity.league_id,
            display_name: entity.display_name,
            created_by: entity.created_by,
            retired_at: entity.retired_at,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mapping_round_trip() {
        for role in [LeagueRole::Member, LeagueRole::Manager, LeagueRole::Executive] {
            let db: LeagueRoleDb = role.into();
            let back: LeagueRole = db.into();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn test_member_conversion() {
        let entity = LeagueMemberEntity {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: LeagueRoleDb::Manager,
            joined_at: Utc::now(),
        };
        let member: LeagueMember = entity.clone().into();
        assert_eq!(member.id, entity.id);
        assert_eq!(member.role, LeagueRole::Manager);
    }

    #[test]
    fn test_placeholder_retired() {
        let entity = PlaceholderMemberEntity {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            display_name: "Ringer".to_string(),
            created_by: Uuid::new_v4(),
            retired_at: None,
            created_at: Utc::now(),
        };
        assert!(!entity.is_retired());

        let retired = PlaceholderMemberEntity {
            retired_at: Some(Utc::now()),
            ..entity
        };
        assert!(retired.is_retired());
    }
}
