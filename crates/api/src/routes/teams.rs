//! Team routes.
//!
//! Roster management is gated by team roles alone. A league executive with
//! no seat on a team, or a member seat, cannot manage that team.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::permission::{LeagueAction, TeamAction};
use domain::models::team::{
    AddTeamMemberRequest, CreateTeamRequest, RenameTeamRequest, RosterEntry, Team, TeamMember,
    TeamRole,
};
use persistence::entities::TeamMemberEntity;
use persistence::repositories::{LeagueMemberRepository, TeamRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::routes::require_membership;
use crate::services::users::ensure_user;

/// POST /api/v1/leagues/:league_id/teams
///
/// Create a team. The creator takes its manager seat.
pub async fn create_team(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    request.validate()?;
    ensure_user(&state, &current).await?;

    let (membership, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::CreateTeams) {
        return Err(ApiError::Forbidden(
            "You are not allowed to create teams".to_string(),
        ));
    }

    let repo = TeamRepository::new(state.pool.clone());
    let team = repo
        .create_with_manager(league_id, request.name.trim(), current.user_id, membership.id)
        .await?;

    info!(
        league_id = %league_id,
        team_id = %team.id,
        user_id = %current.user_id,
        "Team created"
    );

    Ok((StatusCode::CREATED, Json(team.into())))
}

/// GET /api/v1/leagues/:league_id/teams
///
/// List teams in a league.
pub async fn list_teams(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
) -> Result<Json<Vec<Team>>, ApiError> {
    require_membership(&state, league_id, current.user_id).await?;

    let repo = TeamRepository::new(state.pool.clone());
    let teams = repo.list_by_league(league_id).await?;

    Ok(Json(teams.into_iter().map(Into::into).collect()))
}

/// PUT /api/v1/leagues/:league_id/teams/:team_id
///
/// Rename a team. Team managers only.
pub async fn rename_team(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((league_id, team_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<RenameTeamRequest>,
) -> Result<Json<Team>, ApiError> {
    request.validate()?;

    let seat = require_team_seat(&state, league_id, team_id, current.user_id).await?;
    if !TeamRole::from(seat.role).can_perform(TeamAction::RenameTeam) {
        return Err(ApiError::Forbidden(
            "You are not allowed to rename this team".to_string(),
        ));
    }

    let repo = TeamRepository::new(state.pool.clone());
    repo.rename(team_id, request.name.trim()).await?;

    let team = repo
        .find_by_id(team_id, league_id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch renamed team".to_string()))?;

    info!(team_id = %team_id, user_id = %current.user_id, "Team renamed");

    Ok(Json(team.into()))
}

/// GET /api/v1/leagues/:league_id/teams/:team_id/roster
///
/// The team roster. Team members only; league roles grant nothing here.
pub async fn roster(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((league_id, team_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<RosterEntry>>, ApiError> {
    let seat = require_team_seat(&state, league_id, team_id, current.user_id).await?;
    if !TeamRole::from(seat.role).can_perform(TeamAction::ViewRoster) {
        return Err(ApiError::Forbidden(
            "You are not allowed to view this roster".to_string(),
        ));
    }

    let repo = TeamRepository::new(state.pool.clone());
    let entries = repo.roster(team_id).await?;

    Ok(Json(
        entries
            .into_iter()
            .map(|e| RosterEntry {
                id: e.id,
                league_member_id: e.league_member_id,
                display_name: e.display_name,
                role: e.role.into(),
                joined_at: e.joined_at,
            })
            .collect(),
    ))
}

/// POST /api/v1/leagues/:league_id/teams/:team_id/members
///
/// Add a league member to the team. Team managers only.
pub async fn add_team_member(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((league_id, team_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<AddTeamMemberRequest>,
) -> Result<(StatusCode, Json<TeamMember>), ApiError> {
    let seat = require_team_seat(&state, league_id, team_id, current.user_id).await?;
    if !TeamRole::from(seat.role).can_perform(TeamAction::AddTeamMembers) {
        return Err(ApiError::Forbidden(
            "You are not allowed to manage this team's roster".to_string(),
        ));
    }

    // The new member must hold a membership in this league.
    let member_repo = LeagueMemberRepository::new(state.pool.clone());
    let league_members = member_repo.list_by_league(league_id).await?;
    if !league_members
        .iter()
        .any(|m| m.id == request.league_member_id)
    {
        return Err(ApiError::NotFound(
            "Member not found in this league".to_string(),
        ));
    }

    let repo = TeamRepository::new(state.pool.clone());
    let added = repo
        .add_member(
            team_id,
            request.league_member_id,
            request.role.unwrap_or(TeamRole::Member).into(),
        )
        .await?
        .ok_or_else(|| ApiError::Conflict("Member is already on this team".to_string()))?;

    info!(
        team_id = %team_id,
        league_member_id = %request.league_member_id,
        user_id = %current.user_id,
        "Team member added"
    );

    Ok((StatusCode::CREATED, Json(added.into())))
}

/// DELETE /api/v1/leagues/:league_id/teams/:team_id/members/:league_member_id
///
/// Remove a member from the team. Team managers only.
pub async fn remove_team_member(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((league_id, team_id, league_member_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let seat = require_team_seat(&state, league_id, team_id, current.user_id).await?;
    if !TeamRole::from(seat.role).can_perform(TeamAction::RemoveTeamMembers) {
        return Err(ApiError::Forbidden(
            "You are not allowed to manage this team's roster".to_string(),
        ));
    }

    let repo = TeamRepository::new(state.pool.clone());
    let target_seat = repo
        .get_team_membership(team_id, league_member_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found on this team".to_string()))?;

    // A team keeps at least one manager.
    if target_seat.role == persistence::entities::TeamRoleDb::Manager
        && repo.count_managers(team_id).await? <= 1
    {
        return Err(ApiError::Conflict(
            "A team cannot lose its last manager".to_string(),
        ));
    }

    repo.remove_member(team_id, league_member_id).await?;

    info!(
        team_id = %team_id,
        league_member_id = %league_member_id,
        user_id = %current.user_id,
        "Team member removed"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Loads the caller's seat on a team, confirming the team belongs to the
/// league and the caller is a league member. Callers without a seat get the
/// same not-found a bad team ID gets.
async fn require_team_seat(
    state: &AppState,
    league_id: Uuid,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<TeamMemberEntity, ApiError> {
    let (membership, _) = require_membership(state, league_id, user_id).await?;

    let repo = TeamRepository::new(state.pool.clone());
    repo.find_by_id(team_id, league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    repo.get_team_membership(team_id, membership.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found or you are not on it".to_string()))
}
