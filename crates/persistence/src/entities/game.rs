//! Game type and match entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::game::{GameType, Match, MatchParticipant};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the game_types table.
#[derive(Debug, Clone, FromRow)]
pub struct GameTypeEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<GameTypeEntity> for GameType {
    fn from(entity: GameTypeEntity) -> Self {
        Self {
            id: entity.id,
            league_id: entity.league_id,
            name: entity.name,
            description: entity.description,
            icon: entity.icon,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the matches table.
///
/// Participants are stored as a jsonb array; decoding failures surface as
/// conversion errors rather than silently dropping results.
#[derive(Debug, Clone, FromRow)]
pub struct MatchEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub game_type_id: Uuid,
    pub reported_by: Uuid,
    pub played_at: DateTime<Utc>,
    pub participants: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl MatchEntity {
    /// Decode the participants column.
    pub fn decode_participants(&self) -> Result<Vec<MatchParticipant>, serde_json::Error> {
        serde_json::from_value(self.participants.clone())
    }

    /// Convert into the domain model, decoding participants.
    pub fn into_domain(self) -> Result<Match, serde_json::Error> {
        let participants = self.decode_participants()?;
        Ok(Match {
            id: self.id,
            league_id: self.league_id,
            game_type_id: self.game_type_id,
            reported_by: self.reported_by,
            played_at: self.played_at,
            participants,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_match(participants: serde_json::Value) -> MatchEntity {
        MatchEntity {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            game_type_id: Uuid::new_v4(),
            reported_by: Uuid::new_v4(),
            played_at: Utc::now(),
            participants,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_decode_participants() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let entity = test_match(json!([
            {"member_id": a, "score": 21, "placement": 1},
            {"member_id": b, "score": 15, "placement": 2},
        ]));

        let participants = entity.decode_participants().unwrap();
        assert_eq!(participants.len(), 2);
        assert_eq!(participants[0].member_id, a);
        assert_eq!(participants[1].score, 15);
    }

    #[test]
    fn test_decode_participants_rejects_malformed_rows() {
        let entity = test_match(json!([{"member_id": "not-a-uuid"}]));
        assert!(entity.decode_participants().is_err());
    }

    #[test]
    fn test_into_domain() {
        let entity = test_match(json!([
            {"member_id": Uuid::new_v4(), "score": 3, "placement": 1},
            {"member_id": Uuid::new_v4(), "score": 1, "placement": 2},
        ]));
        let id = entity.id;
        let domain_match = entity.into_domain().unwrap();
        assert_eq!(domain_match.id, id);
        assert_eq!(domain_match.participants.len(), 2);
    }
}
