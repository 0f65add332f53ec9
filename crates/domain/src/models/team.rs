//! Team domain models.
//!
//! Teams group league members for team-based game types. Team roles are a
//! separate axis from league roles: roster management always requires a
//! team-manager seat, whatever the caller's league role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::permission::{can_perform_team_action, TeamAction};

/// Role within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Manager,
    Member,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Manager => "manager",
            TeamRole::Member => "member",
        }
    }

    /// Whether this role may perform the given team action.
    pub fn can_perform(&self, action: TeamAction) -> bool {
        can_perform_team_action(*self, action)
    }
}

impl FromStr for TeamRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manager" => Ok(TeamRole::Manager),
            "member" => Ok(TeamRole::Member),
            _ => Err(format!("Invalid team role: {}", s)),
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A team within a league.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Team {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A league member's seat on a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TeamMember {
    pub id: Uuid,
    pub team_id: Uuid,
    pub league_member_id: Uuid,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

/// Request payload for creating a team.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTeamRequest {
    #[validate(length(
        min = 1,
        max = 60,
        message = "Team name must be between 1 and 60 characters"
    ))]
    pub name: String,
}

/// Request payload for renaming a team.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RenameTeamRequest {
    #[validate(length(
        min = 1,
        max = 60,
        message = "Team name must be between 1 and 60 characters"
    ))]
    pub name: String,
}

/// Request payload for adding a league member to a team.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AddTeamMemberRequest {
    pub league_member_id: Uuid,
    pub role: Option<TeamRole>,
}

/// Roster entry with member display info.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RosterEntry {
    pub id: Uuid,
    pub league_member_id: Uuid,
    pub display_name: String,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_role_round_trip() {
        for role in [TeamRole::Manager, TeamRole::Member] {
            assert_eq!(role.as_str().parse::<TeamRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_team_role_parse_invalid() {
        assert!("captain".parse::<TeamRole>().is_err());
    }

    #[test]
    fn test_team_role_can_perform() {
        assert!(TeamRole::Member.can_perform(TeamAction::ViewRoster));
        assert!(!TeamRole::Member.can_perform(TeamAction::AddTeamMembers));
        assert!(TeamRole::Manager.can_perform(TeamAction::RenameTeam));
    }

    #[test]
    fn test_create_team_request_validation() {
        let valid = CreateTeamRequest {
            name: "The Underdogs".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty = CreateTeamRequest { name: String::new() };
        assert!(empty.validate().is_err());
    }
}
