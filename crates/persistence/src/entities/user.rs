//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::User;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            username: entity.username,
            display_name: entity.display_name,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_domain() {
        let entity = UserEntity {
            id: Uuid::new_v4(),
            email: "player@example.com".to_string(),
            username: "player-one".to_string(),
            display_name: "Player One".to_string(),
            created_at: Utc::now(),
        };
        let user: User = entity.clone().into();
        assert_eq!(user.id, entity.id);
        assert_eq!(user.username, "player-one");
    }
}
