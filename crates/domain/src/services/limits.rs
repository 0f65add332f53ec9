//! Plan-limit gates for membership growth.
//!
//! Over-limit is an expected outcome, not a fault: gates return a decision
//! with a human-readable denial message instead of an error.

use serde::Serialize;

/// Configured plan limits.
#[derive(Debug, Clone, Copy)]
pub struct PlanLimits {
    /// How many leagues one user may belong to.
    pub max_leagues_per_user: u32,
    /// How many members one league may hold.
    pub max_members_per_league: u32,
    /// How many unanswered direct invitations one league may have out.
    pub max_pending_invitations_per_league: u32,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            max_leagues_per_user: 10,
            max_members_per_league: 50,
            max_pending_invitations_per_league: 100,
        }
    }
}

/// Outcome of a limit check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GateDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            message: None,
        }
    }

    fn deny(message: String) -> Self {
        Self {
            allowed: false,
            message: Some(message),
        }
    }
}

/// Whether a user with `current_league_count` memberships may join another
/// league.
pub fn user_league_gate(current_league_count: i64, limits: &PlanLimits) -> GateDecision {
    if current_league_count < limits.max_leagues_per_user as i64 {
        GateDecision::allow()
    } else {
        GateDecision::deny(format!(
            "You are already in {} leagues, the most your plan allows",
            limits.max_leagues_per_user
        ))
    }
}

/// Whether a league with `current_member_count` members may accept another.
pub fn league_capacity_gate(current_member_count: i64, limits: &PlanLimits) -> GateDecision {
    if current_member_count < limits.max_members_per_league as i64 {
        GateDecision::allow()
    } else {
        GateDecision::deny(format!(
            "This league already has {} members, the most its plan allows",
            limits.max_members_per_league
        ))
    }
}

/// Whether a league with `pending_count` open invitations may send another.
pub fn pending_invitation_gate(pending_count: i64, limits: &PlanLimits) -> GateDecision {
    if pending_count < limits.max_pending_invitations_per_league as i64 {
        GateDecision::allow()
    } else {
        GateDecision::deny(format!(
            "This league already has {} pending invitations",
            limits.max_pending_invitations_per_league
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_gate_under_limit() {
        let decision = user_league_gate(3, &PlanLimits::default());
        assert!(decision.allowed);
        assert!(decision.message.is_none());
    }

    #[test]
    fn test_user_gate_at_limit_denies_with_message() {
        let limits = PlanLimits::default();
        let decision = user_league_gate(limits.max_leagues_per_user as i64, &limits);
        assert!(!decision.allowed);
        assert!(decision.message.unwrap().contains("10 leagues"));
    }

    #[test]
    fn test_user_gate_boundary() {
        let limits = PlanLimits {
            max_leagues_per_user: 5,
            ..PlanLimits::default()
        };
        assert!(user_league_gate(4, &limits).allowed);
        assert!(!user_league_gate(5, &limits).allowed);
        assert!(!user_league_gate(6, &limits).allowed);
    }

    #[test]
    fn test_league_gate_boundary() {
        let limits = PlanLimits {
            max_members_per_league: 8,
            ..PlanLimits::default()
        };
        assert!(league_capacity_gate(7, &limits).allowed);
        assert!(!league_capacity_gate(8, &limits).allowed);
    }

    #[test]
    fn test_league_gate_message_names_the_cap() {
        let limits = PlanLimits::default();
        let decision = league_capacity_gate(limits.max_members_per_league as i64, &limits);
        assert!(decision.message.unwrap().contains("50 members"));
    }

    #[test]
    fn test_pending_invitation_gate() {
        let limits = PlanLimits {
            max_pending_invitations_per_league: 2,
            ..PlanLimits::default()
        };
        assert!(pending_invitation_gate(1, &limits).allowed);
        assert!(!pending_invitation_gate(2, &limits).allowed);
    }

    #[test]
    fn test_gates_are_deterministic() {
        let limits = PlanLimits::default();
        assert_eq!(user_league_gate(9, &limits), user_league_gate(9, &limits));
        assert_eq!(
            league_capacity_gate(50, &limits),
            league_capacity_gate(50, &limits)
        );
    }
}
