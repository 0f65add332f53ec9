//! Capability tables for league-level and team-level authorization.
//!
//! The tables are explicit (role, action) -> bool mappings so the whole rule
//! set is auditable in one place. Both functions are total over their enum
//! domains and have no side effects.

use serde::{Deserialize, Serialize};

use crate::models::member::LeagueRole;
use crate::models::team::TeamRole;

/// Actions gated by a member's league role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueAction {
    ViewMembers,
    UpdateLeague,
    InviteMembers,
    ManageInviteLinks,
    CreatePlaceholders,
    CreateTeams,
    ManageGameTypes,
    ViewReports,
    DismissReports,
    WarnMembers,
    SuspendMembers,
    RemoveMembers,
    ChangeRoles,
    ArchiveLeague,
}

impl LeagueAction {
    /// Every league action, for exhaustiveness checks and capability listings.
    pub const ALL: [LeagueAction; 14] = [
        LeagueAction::ViewMembers,
        LeagueAction::UpdateLeague,
        LeagueAction::InviteMembers,
        LeagueAction::ManageInviteLinks,
        LeagueAction::CreatePlaceholders,
        LeagueAction::CreateTeams,
        LeagueAction::ManageGameTypes,
        LeagueAction::ViewReports,
        LeagueAction::DismissReports,
        LeagueAction::WarnMembers,
        LeagueAction::SuspendMembers,
        LeagueAction::RemoveMembers,
        LeagueAction::ChangeRoles,
        LeagueAction::ArchiveLeague,
    ];
}

/// Actions gated by a member's team role.
///
/// Team roles are evaluated on their own: holding a league role, even
/// executive, grants none of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamAction {
    ViewRoster,
    AddTeamMembers,
    RemoveTeamMembers,
    RenameTeam,
}

impl TeamAction {
    pub const ALL: [TeamAction; 4] = [
        TeamAction::ViewRoster,
        TeamAction::AddTeamMembers,
        TeamAction::RemoveTeamMembers,
        TeamAction::RenameTeam,
    ];
}

/// Whether a league role may perform a league action.
pub fn can_perform_action(role: LeagueRole, action: LeagueAction) -> bool {
    match (role, action) {
        (_, LeagueAction::ViewMembers) => true,

        (LeagueRole::Manager | LeagueRole::Executive, LeagueAction::UpdateLeague)
        | (LeagueRole::Manager | LeagueRole::Executive, LeagueAction::InviteMembers)
        | (LeagueRole::Manager | LeagueRole::Executive, LeagueAction::ManageInviteLinks)
        | (LeagueRole::Manager | LeagueRole::Executive, LeagueAction::CreatePlaceholders)
        | (LeagueRole::Manager | LeagueRole::Executive, LeagueAction::CreateTeams)
        | (LeagueRole::Manager | LeagueRole::Executive, LeagueAction::ManageGameTypes)
        | (LeagueRole::Manager | LeagueRole::Executive, LeagueAction::ViewReports)
        | (LeagueRole::Manager | LeagueRole::Executive, LeagueAction::DismissReports)
        | (LeagueRole::Manager | LeagueRole::Executive, LeagueAction::WarnMembers) => true,

        (LeagueRole::Executive, LeagueAction::SuspendMembers)
        | (LeagueRole::Executive, LeagueAction::RemoveMembers)
        | (LeagueRole::Executive, LeagueAction::ChangeRoles)
        | (LeagueRole::Executive, LeagueAction::ArchiveLeague) => true,

        _ => false,
    }
}

/// Whether a team role may perform a team action.
pub fn can_perform_team_action(role: TeamRole, action: TeamAction) -> bool {
    match (role, action) {
        (_, TeamAction::ViewRoster) => true,
        (TeamRole::Manager, _) => true,
        (TeamRole::Member, _) => false,
    }
}

/// Whether an actor's league role allows moderating a target with the given
/// role. Self-moderation is rejected by the caller before this check.
///
/// Managers reach only plain members. Executives reach everyone, including
/// other executives.
pub fn can_moderate_target(actor: LeagueRole, target: LeagueRole) -> bool {
    match actor {
        LeagueRole::Executive => true,
        LeagueRole::Manager => target == LeagueRole::Member,
        LeagueRole::Member => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed_actions(role: LeagueRole) -> Vec<LeagueAction> {
        LeagueAction::ALL
            .into_iter()
            .filter(|a| can_perform_action(role, *a))
            .collect()
    }

    #[test]
    fn test_member_capabilities() {
        let actions = allowed_actions(LeagueRole::Member);
        assert_eq!(actions, vec![LeagueAction::ViewMembers]);
    }

    #[test]
    fn test_manager_capabilities() {
        assert!(can_perform_action(LeagueRole::Manager, LeagueAction::InviteMembers));
        assert!(can_perform_action(LeagueRole::Manager, LeagueAction::ManageInviteLinks));
        assert!(can_perform_action(LeagueRole::Manager, LeagueAction::CreatePlaceholders));
        assert!(can_perform_action(LeagueRole::Manager, LeagueAction::WarnMembers));
        assert!(can_perform_action(LeagueRole::Manager, LeagueAction::DismissReports));

        assert!(!can_perform_action(LeagueRole::Manager, LeagueAction::SuspendMembers));
        assert!(!can_perform_action(LeagueRole::Manager, LeagueAction::RemoveMembers));
        assert!(!can_perform_action(LeagueRole::Manager, LeagueAction::ChangeRoles));
        assert!(!can_perform_action(LeagueRole::Manager, LeagueAction::ArchiveLeague));
    }

    #[test]
    fn test_executive_capabilities() {
        for action in LeagueAction::ALL {
            assert!(
                can_perform_action(LeagueRole::Executive, action),
                "executive should be allowed {:?}",
                action
            );
        }
    }

    #[test]
    fn test_role_hierarchy_is_monotonic() {
        // Each step up the ladder keeps every capability of the step below.
        let member = allowed_actions(LeagueRole::Member);
        let manager = allowed_actions(LeagueRole::Manager);
        let executive = allowed_actions(LeagueRole::Executive);

        for action in &member {
            assert!(manager.contains(action));
        }
        for action in &manager {
            assert!(executive.contains(action));
        }
    }

    #[test]
    fn test_capability_table_is_deterministic() {
        for role in [LeagueRole::Member, LeagueRole::Manager, LeagueRole::Executive] {
            for action in LeagueAction::ALL {
                assert_eq!(
                    can_perform_action(role, action),
                    can_perform_action(role, action)
                );
            }
        }
    }

    #[test]
    fn test_team_member_can_only_view_roster() {
        assert!(can_perform_team_action(TeamRole::Member, TeamAction::ViewRoster));
        assert!(!can_perform_team_action(TeamRole::Member, TeamAction::AddTeamMembers));
        assert!(!can_perform_team_action(TeamRole::Member, TeamAction::RemoveTeamMembers));
        assert!(!can_perform_team_action(TeamRole::Member, TeamAction::RenameTeam));
    }

    #[test]
    fn test_team_manager_has_all_team_actions() {
        for action in TeamAction::ALL {
            assert!(can_perform_team_action(TeamRole::Manager, action));
        }
    }

    #[test]
    fn test_manager_moderates_only_plain_members() {
        assert!(can_moderate_target(LeagueRole::Manager, LeagueRole::Member));
        assert!(!can_moderate_target(LeagueRole::Manager, LeagueRole::Manager));
        assert!(!can_moderate_target(LeagueRole::Manager, LeagueRole::Executive));
    }

    #[test]
    fn test_executive_moderates_everyone() {
        assert!(can_moderate_target(LeagueRole::Executive, LeagueRole::Member));
        assert!(can_moderate_target(LeagueRole::Executive, LeagueRole::Manager));
        assert!(can_moderate_target(LeagueRole::Executive, LeagueRole::Executive));
    }

    #[test]
    fn test_plain_member_moderates_nobody() {
        for target in [LeagueRole::Member, LeagueRole::Manager, LeagueRole::Executive] {
            assert!(!can_moderate_target(LeagueRole::Member, target));
        }
    }
}
