//! League member routes.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::member::{ChangeRoleRequest, LeagueMember, MemberSummary};
use domain::models::permission::LeagueAction;
use domain::models::LeagueRole;
use persistence::repositories::LeagueMemberRepository;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::routes::require_membership;

/// GET /api/v1/leagues/:league_id/members
///
/// List league members. Every member may view the roster.
pub async fn list_members(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
) -> Result<Json<Vec<MemberSummary>>, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::ViewMembers) {
        return Err(ApiError::Forbidden(
            "You are not allowed to view members".to_string(),
        ));
    }

    let repo = LeagueMemberRepository::new(state.pool.clone());
    let members = repo.list_by_league(league_id).await?;

    let summaries = members
        .into_iter()
        .map(|m| MemberSummary {
            id: m.id,
            user_id: m.user_id,
            username: m.username,
            display_name: m.display_name,
            role: m.role.into(),
            joined_at: m.joined_at,
        })
        .collect();

    Ok(Json(summaries))
}

/// PUT /api/v1/leagues/:league_id/members/:user_id/role
///
/// Change a member's league role.
pub async fn change_member_role(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((league_id, user_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<ChangeRoleRequest>,
) -> Result<Json<LeagueMember>, ApiError> {
    let (_, actor_role) = require_membership(&state, league_id, current.user_id).await?;
    if !actor_role.can_perform(LeagueAction::ChangeRoles) {
        return Err(ApiError::Forbidden(
            "You are not allowed to change member roles".to_string(),
        ));
    }

    let repo = LeagueMemberRepository::new(state.pool.clone());
    let target = repo
        .find_by_league_and_user(league_id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found in this league".to_string()))?;

    let target_role: LeagueRole = target.role.into();

    // The league must keep at least one executive.
    if target_role == LeagueRole::Executive
        && request.role != LeagueRole::Executive
        && repo.count_executives(league_id).await? <= 1
    {
        return Err(ApiError::Conflict(
            "The last executive cannot be demoted".to_string(),
        ));
    }

    let updated = repo
        .update_role(target.id, request.role.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found in this league".to_string()))?;

    info!(
        league_id = %league_id,
        actor_id = %current.user_id,
        target_user_id = %user_id,
        new_role = %request.role,
        "Member role changed"
    );

    Ok(Json(updated.into()))
}
