//! Route handlers for the Competiscore API.

pub mod game_types;
pub mod health;
pub mod invitations;
pub mod invite_links;
pub mod leagues;
pub mod matches;
pub mod members;
pub mod moderation;
pub mod placeholders;
pub mod reports;
pub mod teams;
pub mod users;

use domain::models::member::LeagueRole;
use persistence::entities::{LeagueEntity, LeagueMemberEntity};
use persistence::repositories::{LeagueMemberRepository, LeagueRepository};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Loads a league or answers not-found.
pub(crate) async fn require_league(
    state: &AppState,
    league_id: Uuid,
) -> Result<LeagueEntity, ApiError> {
    let repo = LeagueRepository::new(state.pool.clone());
    repo.find_by_id(league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("League not found".to_string()))
}

/// Loads the caller's membership in a league.
///
/// Non-members get the same not-found as a missing league, so probing
/// league IDs discloses nothing.
pub(crate) async fn require_membership(
    state: &AppState,
    league_id: Uuid,
    user_id: Uuid,
) -> Result<(LeagueMemberEntity, LeagueRole), ApiError> {
    let repo = LeagueMemberRepository::new(state.pool.clone());
    let membership = repo
        .find_by_league_and_user(league_id, user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("League not found or you are not a member".to_string())
        })?;

    let role: LeagueRole = membership.role.into();
    Ok((membership, role))
}
