//! League membership domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::permission::{can_perform_action, LeagueAction};

/// Role within a league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeagueRole {
    Member,
    Manager,
    Executive,
}

impl LeagueRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueRole::Member => "member",
            LeagueRole::Manager => "manager",
            LeagueRole::Executive => "executive",
        }
    }

    /// Whether this role may perform the given league action.
    pub fn can_perform(&self, action: LeagueAction) -> bool {
        can_perform_action(*self, action)
    }
}

impl FromStr for LeagueRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(LeagueRole::Member),
            "manager" => Ok(LeagueRole::Manager),
            "executive" => Ok(LeagueRole::Executive),
            _ => Err(format!("Invalid league role: {}", s)),
        }
    }
}

impl fmt::Display for LeagueRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's membership in a league.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LeagueMember {
    pub id: Uuid,
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub role: LeagueRole,
    pub joined_at: DateTime<Utc>,
}

/// A league participant without a linked account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlaceholderMember {
    pub id: Uuid,
    pub league_id: Uuid,
    pub display_name: String,
    pub created_by: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retired_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PlaceholderMember {
    /// Retired placeholders are hidden from available listings and cannot
    /// rejoin rosters until restored.
    pub fn is_available(&self) -> bool {
        self.retired_at.is_none()
    }
}

/// Request payload for creating a placeholder member.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreatePlaceholderRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Display name must be between 1 and 50 characters"
    ))]
    pub display_name: String,
}

/// Request payload for changing a member's league role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChangeRoleRequest {
    pub role: LeagueRole,
}

/// Member listing entry with user info.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: LeagueRole,
    pub joined_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [LeagueRole::Member, LeagueRole::Manager, LeagueRole::Executive] {
            assert_eq!(role.as_str().parse::<LeagueRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_parse_case_insensitive() {
        assert_eq!("Executive".parse::<LeagueRole>().unwrap(), LeagueRole::Executive);
        assert_eq!("MANAGER".parse::<LeagueRole>().unwrap(), LeagueRole::Manager);
    }

    #[test]
    fn test_role_parse_invalid() {
        assert!("owner".parse::<LeagueRole>().is_err());
        assert!("".parse::<LeagueRole>().is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(LeagueRole::Member.to_string(), "member");
        assert_eq!(LeagueRole::Manager.to_string(), "manager");
        assert_eq!(LeagueRole::Executive.to_string(), "executive");
    }

    #[test]
    fn test_role_can_perform_delegates_to_table() {
        assert!(LeagueRole::Member.can_perform(LeagueAction::ViewMembers));
        assert!(!LeagueRole::Member.can_perform(LeagueAction::InviteMembers));
        assert!(LeagueRole::Executive.can_perform(LeagueAction::ArchiveLeague));
    }

    #[test]
    fn test_placeholder_availability() {
        let placeholder = PlaceholderMember {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            display_name: "Ringer".to_string(),
            created_by: Uuid::new_v4(),
            retired_at: None,
            created_at: Utc::now(),
        };
        assert!(placeholder.is_available());

        let retired = PlaceholderMember {
            retired_at: Some(Utc::now()),
            ..placeholder
        };
        assert!(!retired.is_available());
    }

    #[test]
    fn test_create_placeholder_request_validation() {
        let valid = CreatePlaceholderRequest {
            display_name: "Sub Goalie".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty = CreatePlaceholderRequest {
            display_name: String::new(),
        };
        assert!(empty.validate().is_err());

        let too_long = CreatePlaceholderRequest {
            display_name: "x".repeat(51),
        };
        assert!(too_long.validate().is_err());
    }
}
