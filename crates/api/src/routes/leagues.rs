//! League routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::league::{
    generate_slug, CreateLeagueRequest, LeagueDetail, LeagueSummary, LeagueVisibility,
    UpdateLeagueRequest,
};
use domain::models::member::LeagueMember;
use domain::models::permission::LeagueAction;
use persistence::entities::{LeagueRoleDb, LeagueVisibilityDb};
use persistence::repositories::{
    InvitationRepository, LeagueMemberRepository, LeagueRepository,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::middleware::metrics::record_member_joined;
use crate::routes::{require_league, require_membership};
use crate::services::membership::add_user_to_league;
use crate::services::users::ensure_user;

/// POST /api/v1/leagues
///
/// Create a league. The creator becomes its first executive.
pub async fn create_league(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<CreateLeagueRequest>,
) -> Result<(StatusCode, Json<LeagueDetail>), ApiError> {
    request.validate()?;
    ensure_user(&state, &current).await?;

    let repo = LeagueRepository::new(state.pool.clone());

    let base_slug = generate_slug(&request.name);
    let slug = repo.generate_unique_slug(&base_slug).await?;

    let visibility: LeagueVisibilityDb = request
        .visibility
        .unwrap_or(LeagueVisibility::Private)
        .into();

    let league = repo
        .create_with_executive(
            &request.name,
            &slug,
            request.description.as_deref(),
            visibility,
            request.logo_url.as_deref(),
            current.user_id,
        )
        .await?;

    info!(
        league_id = %league.id,
        user_id = %current.user_id,
        slug = %slug,
        "League created"
    );

    let detail = repo
        .find_with_membership(league.id, current.user_id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch created league".to_string()))?;

    Ok((StatusCode::CREATED, Json(to_detail(detail))))
}

/// GET /api/v1/leagues
///
/// List the caller's leagues.
pub async fn list_my_leagues(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<LeagueSummary>>, ApiError> {
    let repo = LeagueRepository::new(state.pool.clone());
    let leagues = repo.list_for_user(current.user_id).await?;

    let summaries = leagues
        .into_iter()
        .map(|l| LeagueSummary {
            id: l.id,
            name: l.name,
            slug: l.slug,
            visibility: l.visibility.into(),
            member_count: l.member_count,
            your_role: l.role.into(),
            joined_at: l.joined_at,
        })
        .collect();

    Ok(Json(summaries))
}

/// GET /api/v1/leagues/:league_id
///
/// League detail for members.
pub async fn get_league(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
) -> Result<Json<LeagueDetail>, ApiError> {
    let repo = LeagueRepository::new(state.pool.clone());
    let league = repo
        .find_with_membership(league_id, current.user_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("League not found or you are not a member".to_string())
        })?;

    Ok(Json(to_detail(league)))
}

/// PUT /api/v1/leagues/:league_id
///
/// Update league settings.
pub async fn update_league(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Json(request): Json<UpdateLeagueRequest>,
) -> Result<Json<LeagueDetail>, ApiError> {
    request.validate()?;

    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::UpdateLeague) {
        return Err(ApiError::Forbidden(
            "You are not allowed to update this league".to_string(),
        ));
    }

    let repo = LeagueRepository::new(state.pool.clone());

    let new_slug = if let Some(ref new_name) = request.name {
        let base_slug = generate_slug(new_name);
        Some(repo.generate_unique_slug(&base_slug).await?)
    } else {
        None
    };

    repo.update(
        league_id,
        request.name.as_deref(),
        new_slug.as_deref(),
        request.description.as_deref(),
        request.visibility.map(Into::into),
        request.logo_url.as_deref(),
    )
    .await?;

    info!(league_id = %league_id, user_id = %current.user_id, "League updated");

    let league = repo
        .find_with_membership(league_id, current.user_id)
        .await?
        .ok_or_else(|| ApiError::Internal("Failed to fetch updated league".to_string()))?;

    Ok(Json(to_detail(league)))
}

/// POST /api/v1/leagues/:league_id/archive
///
/// Archive a league. All data is preserved, but the league stops accepting
/// members, invitations, and link redemptions.
pub async fn archive_league(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::ArchiveLeague) {
        return Err(ApiError::Forbidden(
            "You are not allowed to archive this league".to_string(),
        ));
    }

    let repo = LeagueRepository::new(state.pool.clone());
    let archived = repo.archive(league_id).await?;

    if !archived {
        return Err(ApiError::Conflict(
            "This league is already archived".to_string(),
        ));
    }

    info!(league_id = %league_id, user_id = %current.user_id, "League archived");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/leagues/:league_id/join
///
/// Self-join a public league.
pub async fn join_public_league(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
) -> Result<Json<LeagueMember>, ApiError> {
    let user = ensure_user(&state, &current).await?;
    let league = require_league(&state, league_id).await?;

    if league.is_archived() {
        return Err(ApiError::Conflict(
            "This league has been archived".to_string(),
        ));
    }
    if league.visibility != LeagueVisibilityDb::Public {
        return Err(ApiError::Forbidden(
            "This league does not accept open joins".to_string(),
        ));
    }

    let member_repo = LeagueMemberRepository::new(state.pool.clone());
    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let limits = state.config.limits.plan_limits();

    let mut tx = state.pool.begin().await?;
    let member = add_user_to_league(
        &mut tx,
        &member_repo,
        &invitation_repo,
        &limits,
        current.user_id,
        &user.email,
        league_id,
        LeagueRoleDb::Member,
    )
    .await
    .map_err(ApiError::from)?;
    tx.commit().await?;

    record_member_joined("public");
    info!(league_id = %league_id, user_id = %current.user_id, "Joined public league");

    Ok(Json(member.into()))
}

/// POST /api/v1/leagues/:league_id/leave
///
/// Leave a league. The last executive must archive or hand over first.
pub async fn leave_league(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;

    let member_repo = LeagueMemberRepository::new(state.pool.clone());

    if role == domain::models::LeagueRole::Executive
        && member_repo.count_executives(league_id).await? <= 1
    {
        return Err(ApiError::Conflict(
            "The last executive cannot leave the league".to_string(),
        ));
    }

    member_repo
        .delete_by_league_and_user(league_id, current.user_id)
        .await?;

    info!(league_id = %league_id, user_id = %current.user_id, "Left league");

    Ok(StatusCode::NO_CONTENT)
}

/// Build the detail response from the joined row.
fn to_detail(l: persistence::entities::LeagueWithMembershipEntity) -> LeagueDetail {
    LeagueDetail {
        id: l.id,
        name: l.name,
        slug: l.slug,
        description: l.description,
        visibility: l.visibility.into(),
        logo_url: l.logo_url,
        archived_at: l.archived_at,
        member_count: l.member_count,
        created_by: l.created_by,
        created_at: l.created_at,
        updated_at: l.updated_at,
        your_role: l.role.into(),
    }
}
