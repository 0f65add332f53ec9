//! Team and team member entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::team::{Team, TeamMember, TeamRole};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for team_role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "team_role", rename_all = "lowercase")]
pub enum TeamRoleDb {
    Manager,
    Member,
}

impl From<TeamRoleDb> for TeamRole {
    fn from(db: TeamRoleDb) -> Self {
        match db {
            TeamRoleDb::Manager => TeamRole::Manager,
            TeamRoleDb::Member => TeamRole::Member,
        }
    }
}

impl From<TeamRole> for TeamRoleDb {
    fn from(role: TeamRole) -> Self {
        match role {
            TeamRole::Manager => TeamRoleDb::Manager,
            TeamRole::Member => TeamRoleDb::Member,
        }
    }
}

/// Database row mapping for the teams table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<TeamEntity> for Team {
    fn from(entity: TeamEntity) -> Self {
        Self {
            id: entity.id,
            league_id: entity.league_id,
            name: entity.name,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the team_members table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberEntity {
    pub id: Uuid,
    pub team_id: Uuid,
    pub league_member_id: Uuid,
    pub role: TeamRoleDb,
    pub joined_at: DateTime<Utc>,
}

impl From<TeamMemberEntity> for TeamMember {
    fn from(entity: TeamMemberEntity) -> Self {
        Self {
            id: entity.id,
            team_id: entity.team_id,
            league_member_id: entity.league_member_id,
            role: entity.role.into(),
            joined_at: entity.joined_at,
        }
    }
}

/// Team member row joined with display info for rosters.
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberWithNameEntity {
    pub id: Uuid,
    pub team_id: Uuid,
    pub league_member_id: Uuid,
    pub role: TeamRoleDb,
    pub joined_at: DateTime<Utc>,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_role_mapping_round_trip() {
        for role in [TeamRole::Manager, TeamRole::Member] {
            let db: TeamRoleDb = role.into();
            let back: TeamRole = db.into();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn test_team_member_conversion() {
        let entity = TeamMemberEntity {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            league_member_id: Uuid::new_v4(),
            role: TeamRoleDb::Manager,
            joined_at: Utc::now(),
        };
        let member: TeamMember = entity.clone().into();
        assert_eq!(member.role, TeamRole::Manager);
        assert_eq!(member.league_member_id, entity.league_member_id);
    }
}
