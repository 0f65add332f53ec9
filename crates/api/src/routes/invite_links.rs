//! Invite link routes.
//!
//! Links are shareable tokens with optional expiry and use caps. Lookup is
//! public; redemption requires authentication and consumes one use
//! atomically with the membership insert.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use domain::models::invite_link::{
    CreateInviteLinkRequest, InviteLinkDetails, InviteLinkInvalidReason, InviteLinkResponse,
    PublicLeagueInfo,
};
use domain::models::member::{LeagueMember, LeagueRole};
use domain::models::permission::LeagueAction;
use persistence::entities::InviteLinkEntity;
use persistence::repositories::{
    generate_invite_link_token, InvitationRepository, InviteLinkRepository,
    LeagueMemberRepository,
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

/// POST /api/v1/leagues/:league_id/links
///
/// Create a shareable invite link.
pub async fn create_invite_link(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Json(request): Json<CreateInviteLinkRequest>,
) -> Result<(StatusCode, Json<InviteLinkResponse>), ApiError> {
    request.validate()?;
    ensure_user(&state, &current).await?;

    let league = require_league(&state, league_id).await?;
    if league.is_archived() {
        return Err(ApiError::Conflict(
            "This league has been archived".to_string(),
        ));
    }

    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::ManageInviteLinks) {
        return Err(ApiError::Forbidden(
            "You are not allowed to manage invite links".to_string(),
        ));
    }

    let preset_role = request.role.unwrap_or(LeagueRole::Member);
    if preset_role == LeagueRole::Executive {
        return Err(ApiError::Validation(
            "Invite links cannot grant the executive role".to_string(),
        ));
    }

    let expires_at = request
        .expires_in_hours
        .map(|hours| Utc::now() + Duration::hours(hours as i64));

    let token = generate_invite_link_token();
    let repo = InviteLinkRepository::new(state.pool.clone());
    let link = repo
        .create(
            league_id,
            &token,
            preset_role.into(),
            expires_at,
            request.max_uses,
            current.user_id,
        )
        .await?;

    info!(
        league_id = %league_id,
        link_id = %link.id,
        user_id = %current.user_id,
        role = %preset_role,
        "Invite link created"
    );

    Ok((StatusCode::CREATED, Json(to_response(&state, link))))
}

/// GET /api/v1/leagues/:league_id/links
///
/// List redeemable invite links.
pub async fn list_invite_links(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
) -> Result<Json<Vec<InviteLinkResponse>>, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::ManageInviteLinks) {
        return Err(ApiError::Forbidden(
            "You are not allowed to view invite links".to_string(),
        ));
    }

    let repo = InviteLinkRepository::new(state.pool.clone());
    let links = repo.list_active_by_league(league_id).await?;

    Ok(Json(
        links.into_iter().map(|l| to_response(&state, l)).collect(),
    ))
}

/// DELETE /api/v1/leagues/:league_id/links/:link_id
///
/// Revoke an invite link.
pub async fn revoke_invite_link(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((league_id, link_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::ManageInviteLinks) {
        return Err(ApiError::Forbidden(
            "You are not allowed to manage invite links".to_string(),
        ));
    }

    let repo = InviteLinkRepository::new(state.pool.clone());
    if !repo.revoke(link_id, league_id).await? {
        return Err(ApiError::NotFound("Invite link not found".to_string()));
    }

    info!(
        league_id = %league_id,
        link_id = %link_id,
        user_id = %current.user_id,
        "Invite link revoked"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/links/:token
///
/// Public invite link details: league preview, preset role, validity, and
/// the reason when invalid.
pub async fn get_invite_link_details(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InviteLinkDetails>, ApiError> {
    let repo = InviteLinkRepository::new(state.pool.clone());
    let row = repo
        .find_by_token_with_league(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invite link not found".to_string()))?;

    let link = row.link();
    let reason = if row.league_archived_at.is_some() {
        Some(InviteLinkInvalidReason::LeagueArchived)
    } else {
        link.invalid_reason(Utc::now())
    };

    Ok(Json(InviteLinkDetails {
        league: PublicLeagueInfo {
            name: row.league_name,
            logo_url: row.league_logo_url,
            member_count: row.member_count,
        },
        role: link.role,
        is_valid: reason.is_none(),
        reason,
        expires_at: link.expires_at,
    }))
}

/// POST /api/v1/links/:token/join
///
/// Redeem an invite link and join its league.
///
/// The consume and the membership insert share one transaction: a failed
/// join burns no use, and two redeemers racing at the use cap resolve to
/// exactly one success.
pub async fn join_via_invite_link(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(token): Path<String>,
) -> Result<Json<LeagueMember>, ApiError> {
    let user = ensure_user(&state, &current).await?;

    let link_repo = InviteLinkRepository::new(state.pool.clone());
    let row = link_repo
        .find_by_token_with_league(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invite link not found".to_string()))?;

    if row.league_archived_at.is_some() {
        return Err(ApiError::Conflict(
            "This league has been archived".to_string(),
        ));
    }

    let member_repo = LeagueMemberRepository::new(state.pool.clone());
    let invitation_repo = InvitationRepository::new(state.pool.clone());
    let limits = state.config.limits.plan_limits();

    let mut tx = state.pool.begin().await?;

    let link = match link_repo.consume_tx(&mut tx, &token).await? {
        Some(link) => link,
        None => {
            // The conditional update refused; report why from the row we
            // already hold.
            let reason = row
                .link()
                .invalid_reason(Utc::now())
                .unwrap_or(InviteLinkInvalidReason::UsageLimitReached);
            return Err(ApiError::Conflict(invalid_message(reason).to_string()));
        }
    };

    let member = add_user_to_league(
        &mut tx,
        &member_repo,
        &invitation_repo,
        &limits,
        current.user_id,
        &user.email,
        link.league_id,
        link.role,
    )
    .await
    .map_err(ApiError::from)?;

    tx.commit().await?;

    record_member_joined("invite_link");
    info!(
        league_id = %link.league_id,
        link_id = %link.id,
        user_id = %current.user_id,
        "Joined via invite link"
    );

    Ok(Json(member.into()))
}

fn invalid_message(reason: InviteLinkInvalidReason) -> &'static str {
    match reason {
        InviteLinkInvalidReason::Expired => "This invite link has expired",
        InviteLinkInvalidReason::UsageLimitReached => {
            "This invite link has reached its usage limit"
        }
        InviteLinkInvalidReason::Revoked => "This invite link has been revoked",
        InviteLinkInvalidReason::LeagueArchived => "This league has been archived",
    }
}

/// Build the management response, including the join URL.
fn to_response(state: &AppState, link: InviteLinkEntity) -> InviteLinkResponse {
    let url = format!("{}/join/{}", state.config.server.app_base_url, link.token);
    let domain_link: domain::models::invite_link::InviteLink = link.into();

    InviteLinkResponse {
        id: domain_link.id,
        league_id: domain_link.league_id,
        token: domain_link.token.clone(),
        url,
        role: domain_link.role,
        expires_at: domain_link.expires_at,
        max_uses: domain_link.max_uses,
        current_uses: domain_link.current_uses,
        remaining_uses: domain_link.remaining_uses(),
        created_by: domain_link.created_by,
        created_at: domain_link.created_at,
    }
}
