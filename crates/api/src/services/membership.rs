//! Join orchestration.
//!
//! The single path that adds a user to a league. Every caller (invite-link
//! join, direct-invitation accept, public self-join) runs inside one
//! transaction so the membership insert commits together with whatever else
//! the caller must apply (link consumption, invitation acceptance).
//!
//! Callers are responsible for league-level preconditions (league exists,
//! is not archived, visibility permits the path) before calling in.

use domain::services::limits::{league_capacity_gate, user_league_gate, PlanLimits};
use persistence::entities::{LeagueMemberEntity, LeagueRoleDb};
use persistence::repositories::{InvitationRepository, LeagueMemberRepository};
use sqlx::{Postgres, Transaction};
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;

/// Why a join was refused.
#[derive(Debug, Error)]
pub enum JoinError {
    #[error("You are already a member of this league")]
    AlreadyMember,

    #[error("{0}")]
    LimitDenied(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        match err {
            JoinError::AlreadyMember => ApiError::Conflict(err.to_string()),
            JoinError::LimitDenied(message) => ApiError::Conflict(message),
            JoinError::Database(e) => e.into(),
        }
    }
}

/// Adds a user to a league inside the caller's transaction.
///
/// Short-circuiting preconditions, in order: existing membership, the
/// user-side limit gate, the league-side limit gate. The insert itself rides
/// on the unique (league, user) constraint, so a concurrent join that slips
/// past the read still resolves to exactly one membership; the loser sees
/// `AlreadyMember`. Finally, any other open direct invitation for this
/// (user, league) is marked accepted so no dangling invitation survives the
/// join.
pub async fn add_user_to_league(
    tx: &mut Transaction<'_, Postgres>,
    member_repo: &LeagueMemberRepository,
    invitation_repo: &InvitationRepository,
    limits: &PlanLimits,
    user_id: Uuid,
    email: &str,
    league_id: Uuid,
    role: LeagueRoleDb,
) -> Result<LeagueMemberEntity, JoinError> {
    if member_repo
        .find_by_league_and_user_tx(tx, league_id, user_id)
        .await?
        .is_some()
    {
        return Err(JoinError::AlreadyMember);
    }

    let user_league_count = member_repo.count_leagues_for_user_tx(tx, user_id).await?;
    let decision = user_league_gate(user_league_count, limits);
    if !decision.allowed {
        return Err(JoinError::LimitDenied(decision.message.unwrap_or_default()));
    }

    let league_member_count = member_repo.count_by_league_tx(tx, league_id).await?;
    let decision = league_capacity_gate(league_member_count, limits);
    if !decision.allowed {
        return Err(JoinError::LimitDenied(decision.message.unwrap_or_default()));
    }

    let member = member_repo
        .insert_tx(tx, league_id, user_id, role)
        .await?
        .ok_or(JoinError::AlreadyMember)?;

    let cleaned_up = invitation_repo
        .accept_all_open_for_user_tx(tx, league_id, user_id, email)
        .await?;

    if cleaned_up > 0 {
        tracing::info!(
            league_id = %league_id,
            user_id = %user_id,
            invitations = cleaned_up,
            "Closed open invitations on join"
        );
    }

    Ok(member)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_error_maps_to_conflict() {
        let error: ApiError = JoinError::AlreadyMember.into();
        assert!(matches!(error, ApiError::Conflict(_)));

        let error: ApiError = JoinError::LimitDenied("over the cap".to_string()).into();
        match error {
            ApiError::Conflict(message) => assert_eq!(message, "over the cap"),
            _ => panic!("Expected Conflict"),
        }
    }

    #[test]
    fn test_join_error_display() {
        assert_eq!(
            JoinError::AlreadyMember.to_string(),
            "You are already a member of this league"
        );
    }
}
