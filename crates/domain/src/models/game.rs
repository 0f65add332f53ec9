//! Game type and match domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A kind of game played in a league (darts, foosball, a video game...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GameType {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a game type.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGameTypeRequest {
    #[validate(length(
        min = 1,
        max = 60,
        message = "Name must be between 1 and 60 characters"
    ))]
    pub name: String,

    #[validate(length(max = 300, message = "Description must be at most 300 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 10, message = "Icon must be at most 10 characters"))]
    pub icon: Option<String>,
}

/// One participant's result in a reported match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct MatchParticipant {
    /// A league member id or a placeholder member id.
    pub member_id: Uuid,

    #[validate(custom(function = "shared::validation::validate_score"))]
    pub score: i32,

    /// 1-based finishing position.
    #[validate(range(min = 1, max = 64, message = "Placement must be between 1 and 64"))]
    pub placement: i32,
}

/// A reported match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Match {
    pub id: Uuid,
    pub league_id: Uuid,
    pub game_type_id: Uuid,
    pub reported_by: Uuid,
    pub played_at: DateTime<Utc>,
    pub participants: Vec<MatchParticipant>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for reporting a match.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ReportMatchRequest {
    pub game_type_id: Uuid,

    pub played_at: Option<DateTime<Utc>>,

    #[validate(length(min = 2, max = 64, message = "A match needs between 2 and 64 participants"))]
    #[validate(nested)]
    pub participants: Vec<MatchParticipant>,
}

impl ReportMatchRequest {
    /// A member cannot appear twice in one match.
    pub fn has_duplicate_participants(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.participants.iter().any(|p| !seen.insert(p.member_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(member_id: Uuid, score: i32, placement: i32) -> MatchParticipant {
        MatchParticipant {
            member_id,
            score,
            placement,
        }
    }

    #[test]
    fn test_report_match_request_validation() {
        let request = ReportMatchRequest {
            game_type_id: Uuid::new_v4(),
            played_at: None,
            participants: vec![
                participant(Uuid::new_v4(), 21, 1),
                participant(Uuid::new_v4(), 15, 2),
            ],
        };
        assert!(request.validate().is_ok());
        assert!(!request.has_duplicate_participants());
    }

    #[test]
    fn test_report_match_needs_two_participants() {
        let request = ReportMatchRequest {
            game_type_id: Uuid::new_v4(),
            played_at: None,
            participants: vec![participant(Uuid::new_v4(), 21, 1)],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_report_match_rejects_negative_score() {
        let request = ReportMatchRequest {
            game_type_id: Uuid::new_v4(),
            played_at: None,
            participants: vec![
                participant(Uuid::new_v4(), -1, 1),
                participant(Uuid::new_v4(), 15, 2),
            ],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_duplicate_participants_detected() {
        let repeat = Uuid::new_v4();
        let request = ReportMatchRequest {
            game_type_id: Uuid::new_v4(),
            played_at: None,
            participants: vec![participant(repeat, 21, 1), participant(repeat, 15, 2)],
        };
        assert!(request.has_duplicate_participants());
    }

    #[test]
    fn test_create_game_type_request_validation() {
        let valid = CreateGameTypeRequest {
            name: "Darts 501".to_string(),
            description: Some("Double out".to_string()),
            icon: Some("DART".to_string()),
        };
        assert!(valid.validate().is_ok());

        let empty = CreateGameTypeRequest {
            name: String::new(),
            description: None,
            icon: None,
        };
        assert!(empty.validate().is_err());
    }
}
