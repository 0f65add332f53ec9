//! Direct invitation routes.
//!
//! Managers send invitations to an email address; the invitee accepts or
//! declines from their own account. Duplicate open invitations are rejected
//! outright, unlike link joins which quietly close any open invitation for
//! the joining user.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::invitation::{
    CreateInvitationRequest, InvitationResponse, InvitationStatus, InvitationSummary,
    ListInvitationsQuery,
};
use domain::models::member::{LeagueMember, LeagueRole};
use domain::models::permission::LeagueAction;
use domain::services::limits::pending_invitation_gate;
use persistence::entities::InvitationEntity;
use persistence::repositories::{
    calculate_invitation_expiration, default_invitation_expiration, InvitationRepository,
    LeagueMemberRepository, UserRepository,
};
use serde::Serialize;
use shared::pagination::{PageQuery, Pagination};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::middleware::metrics::{record_invitation_sent, record_member_joined};
use crate::routes::{require_league, require_membership};
use crate::services::membership::add_user_to_league;
use crate::services::users::ensure_user;

/// Response for invitation listings.
#[derive(Debug, Serialize)]
pub struct ListInvitationsResponse {
    pub invitations: Vec<InvitationResponse>,
    pub pagination: Pagination,
    pub summary: InvitationSummary,
}

/// POST /api/v1/leagues/:league_id/invitations
///
/// Send a direct invitation.
pub async fn create_invitation(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Json(request): Json<CreateInvitationRequest>,
) -> Result<(StatusCode, Json<InvitationResponse>), ApiError> {
    request.validate()?;
    ensure_user(&state, &current).await?;

    let league = require_league(&state, league_id).await?;
    if league.is_archived() {
        return Err(ApiError::Conflict(
            "This league has been archived".to_string(),
        ));
    }

    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::InviteMembers) {
        return Err(ApiError::Forbidden(
            "You are not allowed to invite members".to_string(),
        ));
    }

    let invited_role = request.role.unwrap_or(LeagueRole::Member);
    if invited_role == LeagueRole::Executive {
        return Err(ApiError::Validation(
            "Invitations cannot grant the executive role".to_string(),
        ));
    }

    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let member_repo = LeagueMemberRepository::new(state.pool.clone());
    let user_repo = UserRepository::new(state.pool.clone());

    // Invitee may already hold an account and a membership.
    let invitee = user_repo.find_by_email(&request.email).await?;
    if let Some(ref invitee) = invitee {
        if member_repo
            .find_by_league_and_user(league_id, invitee.id)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(
                "User is already a member of this league".to_string(),
            ));
        }
    }

    if invitation_repo
        .has_open_invitation(league_id, &request.email)
        .await?
    {
        return Err(ApiError::Conflict(
            "A pending invitation already exists for this email".to_string(),
        ));
    }

    let open_count = invitation_repo.count_open_by_league(league_id).await?;
    let decision = pending_invitation_gate(open_count, &state.config.limits.plan_limits());
    if !decision.allowed {
        return Err(ApiError::Conflict(decision.message.unwrap_or_default()));
    }

    let expires_at = match request.expires_in_days {
        Some(days) => calculate_invitation_expiration(days),
        None => default_invitation_expiration(),
    };

    let entity = invitation_repo
        .create(
            league_id,
            &request.email,
            invitee.map(|u| u.id),
            invited_role.into(),
            current.user_id,
            request.note.as_deref(),
            expires_at,
        )
        .await?;

    record_invitation_sent();
    info!(
        league_id = %league_id,
        invitation_id = %entity.id,
        invited_by = %current.user_id,
        role = %invited_role,
        "Invitation sent"
    );

    Ok((StatusCode::CREATED, Json(to_response(entity))))
}

/// GET /api/v1/leagues/:league_id/invitations
///
/// List invitations with status filter and summary counts.
pub async fn list_invitations(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Query(query): Query<ListInvitationsQuery>,
) -> Result<Json<ListInvitationsResponse>, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::InviteMembers) {
        return Err(ApiError::Forbidden(
            "You are not allowed to view invitations".to_string(),
        ));
    }

    let page_query = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };

    let repo = InvitationRepository::new(state.pool.clone());
    let entities = repo
        .list_by_league_with_status(
            league_id,
            query.status.as_deref(),
            page_query.per_page(),
            page_query.offset(),
        )
        .await?;
    let total = repo
        .count_by_league_with_status(league_id, query.status.as_deref())
        .await?;
    let counts = repo.summary_counts(league_id).await?;

    Ok(Json(ListInvitationsResponse {
        invitations: entities.into_iter().map(to_response).collect(),
        pagination: Pagination::new(page_query.page(), page_query.per_page(), total),
        summary: InvitationSummary {
            pending: counts.pending,
            accepted: counts.accepted,
            declined: counts.declined,
            expired: counts.expired,
        },
    }))
}

/// DELETE /api/v1/leagues/:league_id/invitations/:invitation_id
///
/// Revoke a pending invitation.
pub async fn revoke_invitation(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((league_id, invitation_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::InviteMembers) {
        return Err(ApiError::Forbidden(
            "You are not allowed to revoke invitations".to_string(),
        ));
    }

    let repo = InvitationRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(invitation_id)
        .await?
        .filter(|i| i.league_id == league_id)
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    if entity.status_now() == InvitationStatus::Accepted {
        return Err(ApiError::Conflict(
            "Cannot revoke an accepted invitation. Remove the member instead.".to_string(),
        ));
    }

    if !repo.delete_pending(invitation_id, league_id).await? {
        return Err(ApiError::NotFound("Invitation not found".to_string()));
    }

    info!(
        league_id = %league_id,
        invitation_id = %invitation_id,
        user_id = %current.user_id,
        "Invitation revoked"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/invitations
///
/// List open invitations addressed to the caller.
pub async fn list_my_invitations(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<InvitationResponse>>, ApiError> {
    let repo = InvitationRepository::new(state.pool.clone());
    let entities = repo
        .list_open_for_invitee(current.user_id, &current.email)
        .await?;

    Ok(Json(entities.into_iter().map(to_response).collect()))
}

/// POST /api/v1/invitations/:invitation_id/accept
///
/// Accept an invitation and join the league.
pub async fn accept_invitation(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(invitation_id): Path<Uuid>,
) -> Result<Json<LeagueMember>, ApiError> {
    let user = ensure_user(&state, &current).await?;

    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let entity = invitation_repo
        .find_by_id(invitation_id)
        .await?
        // Answer strangers with the same not-found a bad ID gets.
        .filter(|i| i.is_addressed_to(current.user_id, &current.email))
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    match entity.status_now() {
        InvitationStatus::Pending => {}
        InvitationStatus::Expired => {
            return Err(ApiError::Conflict("This invitation has expired".to_string()))
        }
        _ => {
            return Err(ApiError::Conflict(
                "This invitation is no longer pending".to_string(),
            ))
        }
    }

    let league = require_league(&state, entity.league_id).await?;
    if league.is_archived() {
        return Err(ApiError::Conflict(
            "This league has been archived".to_string(),
        ));
    }

    let member_repo = LeagueMemberRepository::new(state.pool.clone());
    let limits = state.config.limits.plan_limits();

    let mut tx = state.pool.begin().await?;

    if !invitation_repo
        .mark_accepted_tx(&mut tx, invitation_id, current.user_id)
        .await?
    {
        return Err(ApiError::Conflict(
            "This invitation is no longer pending".to_string(),
        ));
    }

    let member = add_user_to_league(
        &mut tx,
        &member_repo,
        &invitation_repo,
        &limits,
        current.user_id,
        &user.email,
        entity.league_id,
        entity.role,
    )
    .await
    .map_err(ApiError::from)?;

    tx.commit().await?;

    record_member_joined("invitation");
    info!(
        league_id = %entity.league_id,
        invitation_id = %invitation_id,
        user_id = %current.user_id,
        "Invitation accepted"
    );

    Ok(Json(member.into()))
}

/// POST /api/v1/invitations/:invitation_id/decline
///
/// Decline an invitation. Membership is never touched.
pub async fn decline_invitation(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(invitation_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ensure_user(&state, &current).await?;

    let repo = InvitationRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(invitation_id)
        .await?
        .filter(|i| i.is_addressed_to(current.user_id, &current.email))
        .ok_or_else(|| ApiError::NotFound("Invitation not found".to_string()))?;

    match entity.status_now() {
        InvitationStatus::Pending => {}
        InvitationStatus::Expired => {
            return Err(ApiError::Conflict("This invitation has expired".to_string()))
        }
        _ => {
            return Err(ApiError::Conflict(
                "This invitation is no longer pending".to_string(),
            ))
        }
    }

    if !repo.mark_declined(invitation_id, current.user_id).await? {
        return Err(ApiError::Conflict(
            "This invitation is no longer pending".to_string(),
        ));
    }

    info!(
        league_id = %entity.league_id,
        invitation_id = %invitation_id,
        user_id = %current.user_id,
        "Invitation declined"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Convert an entity to the response shape, deriving the presented status.
fn to_response(entity: InvitationEntity) -> InvitationResponse {
    let status = entity.status_now();
    InvitationResponse {
        id: entity.id,
        league_id: entity.league_id,
        email: entity.email,
        role: entity.role.into(),
        status,
        note: entity.note,
        invited_by: entity.invited_by,
        expires_at: entity.expires_at,
        responded_at: entity.responded_at,
        created_at: entity.created_at,
    }
}
