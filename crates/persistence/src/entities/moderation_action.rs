//! Moderation action entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::moderation::{ModerationAction, ModerationActionType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for moderation_action_type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "moderation_action_type", rename_all = "lowercase")]
pub enum ModerationActionTypeDb {
    Dismissed,
    Warned,
    Suspended,
    Removed,
}

impl From<ModerationActionTypeDb> for ModerationActionType {
    fn from(db: ModerationActionTypeDb) -> Self {
        match db {
            ModerationActionTypeDb::Dismissed => ModerationActionType::Dismissed,
            ModerationActionTypeDb::Warned => ModerationActionType::Warned,
            ModerationActionTypeDb::Suspended => ModerationActionType::Suspended,
            ModerationActionTypeDb::Removed => ModerationActionType::Removed,
        }
    }
}

impl From<ModerationActionType> for ModerationActionTypeDb {
    fn from(action_type: ModerationActionType) -> Self {
        match action_type {
            ModerationActionType::Dismissed => ModerationActionTypeDb::Dismissed,
            ModerationActionType::Warned => ModerationActionTypeDb::Warned,
            ModerationActionType::Suspended => ModerationActionTypeDb::Suspended,
            ModerationActionType::Removed => ModerationActionTypeDb::Removed,
        }
    }
}

/// Database row mapping for the moderation_actions table.
#[derive(Debug, Clone, FromRow)]
pub struct ModerationActionEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub report_id: Option<Uuid>,
    pub actor_id: Uuid,
    pub target_user_id: Uuid,
    pub action_type: ModerationActionTypeDb,
    pub reason: String,
    pub suspension_days: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<ModerationActionEntity> for ModerationAction {
    fn from(entity: ModerationActionEntity) -> Self {
        Self {
            id: entity.id,
            league_id: entity.league_id,
            report_id: entity.report_id,
            actor_id: entity.actor_id,
            target_user_id: entity.target_user_id,
            action_type: entity.action_type.into(),
            reason: entity.reason,
            suspension_days: entity.suspension_days,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_action_type_mapping_round_trip() {
        for t in [
            ModerationActionType::Dismissed,
            ModerationActionType::Warned,
            ModerationActionType::Suspended,
            ModerationActionType::Removed,
        ] {
            let db: ModerationActionTypeDb = t.into();
            let back: ModerationActionType = db.into();
            assert_eq!(back, t);
        }
    }

    #[test]
    fn test_conversion_carries_suspension_window() {
        let created_at = Utc::now();
        let entity = ModerationActionEntity {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            report_id: Some(Uuid::new_v4()),
            actor_id: Uuid::new_v4(),
            target_user_id: Uuid::new_v4(),
            action_type: ModerationActionTypeDb::Suspended,
            reason: "cheating".to_string(),
            suspension_days: Some(7),
            created_at,
        };

        let action: ModerationAction = entity.into();
        assert_eq!(action.suspension_end(), Some(created_at + Duration::days(7)));
    }
}
