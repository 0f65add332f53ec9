//! League entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::league::{League, LeagueVisibility};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for league_visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "league_visibility", rename_all = "lowercase")]
pub enum LeagueVisibilityDb {
    Public,
    Private,
}

impl From<LeagueVisibilityDb> for LeagueVisibility {
    fn from(db: LeagueVisibilityDb) -> Self {
        match db {
            LeagueVisibilityDb::Public => LeagueVisibility::Public,
            LeagueVisibilityDb::Private => LeagueVisibility::Private,
        }
    }
}

impl From<LeagueVisibility> for LeagueVisibilityDb {
    fn from(visibility: LeagueVisibility) -> Self {
        match visibility {
            LeagueVisibility::Public => LeagueVisibilityDb::Public,
            LeagueVisibility::Private => LeagueVisibilityDb::Private,
        }
    }
}

/// Database row mapping for the leagues table.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub visibility: LeagueVisibilityDb,
    pub logo_url: Option<String>,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeagueEntity {
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

impl From<LeagueEntity> for League {
    fn from(entity: LeagueEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            visibility: entity.visibility.into(),
            logo_url: entity.logo_url,
            archived_at: entity.archived_at,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// League row joined with the caller's membership and member count.
#[derive(Debug, Clone, FromRow)]
pub struct LeagueWithMembershipEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub visibility: LeagueVisibilityDb,
    pub logo_url: Option<String>,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub membership_id: Uuid,
    pub role: super::league_member::LeagueRoleDb,
    pub joined_at: DateTime<Utc>,
    pub member_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_entity(archived_at: Option<DateTime<Utc>>) -> LeagueEntity {
        LeagueEntity {
            id: Uuid::new_v4(),
            name: "Thursday Pinball".to_string(),
            slug: "thursday-pinball".to_string(),
            description: Some("Weekly pinball night".to_string()),
            visibility: LeagueVisibilityDb::Private,
            logo_url: None,
            archived_at,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_archived() {
        assert!(!test_entity(None).is_archived());
        assert!(test_entity(Some(Utc::now())).is_archived());
    }

    #[test]
    fn test_conversion_to_domain() {
        let entity = test_entity(None);
        let league: League = entity.clone().into();
        assert_eq!(league.id, entity.id);
        assert_eq!(league.visibility, LeagueVisibility::Private);
        assert!(!league.is_archived());
    }

    #[test]
    fn test_visibility_mapping_round_trip() {
        for v in [LeagueVisibility::Public, LeagueVisibility::Private] {
            let db: LeagueVisibilityDb = v.into();
            let back: LeagueVisibility = db.into();
            assert_eq!(back, v);
        }
    }
}
