//! Moderation action routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::moderation::{
    suspended_until, ModerationAction, ModerationActionType, ModerationHistory, TakeActionRequest,
};
use domain::models::permission::{can_moderate_target, LeagueAction};
use persistence::repositories::{
    LeagueMemberRepository, ModerationActionRepository, ReportRepository,
};
use serde::Deserialize;
use shared::pagination::PageQuery;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::middleware::metrics::record_moderation_action;
use crate::routes::require_membership;
use crate::services::users::ensure_user;

/// Query parameters for the action log.
#[derive(Debug, Default, Deserialize)]
pub struct ListActionsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// POST /api/v1/leagues/:league_id/moderation/actions
///
/// Take a moderation action, optionally resolving a report.
///
/// The action insert, the report resolution, and (for removals) the
/// membership delete commit in one transaction; there is no state where the
/// action exists but the report is still pending.
pub async fn take_action(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Json(request): Json<TakeActionRequest>,
) -> Result<(StatusCode, Json<ModerationAction>), ApiError> {
    request.validate()?;
    ensure_user(&state, &current).await?;

    let (_, actor_role) = require_membership(&state, league_id, current.user_id).await?;

    if request.target_user_id == current.user_id {
        return Err(ApiError::Validation(
            "You cannot moderate yourself".to_string(),
        ));
    }

    if !actor_role.can_perform(request.action_type.required_capability()) {
        return Err(ApiError::Forbidden(
            "You are not allowed to take this action".to_string(),
        ));
    }

    let member_repo = LeagueMemberRepository::new(state.pool.clone());
    let target = member_repo
        .find_by_league_and_user(league_id, request.target_user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found in this league".to_string()))?;

    if !can_moderate_target(actor_role, target.role.into()) {
        return Err(ApiError::Forbidden(
            "You are not allowed to moderate this member".to_string(),
        ));
    }

    // Presence of the window length is tied to the action type; the range
    // was already validated.
    match (request.action_type, request.suspension_days) {
        (ModerationActionType::Suspended, None) => {
            return Err(ApiError::Validation(
                "suspension_days is required when suspending".to_string(),
            ));
        }
        (ModerationActionType::Suspended, Some(_)) => {}
        (_, Some(_)) => {
            return Err(ApiError::Validation(
                "suspension_days only applies to suspensions".to_string(),
            ));
        }
        (_, None) => {}
    }

    let report_repo = ReportRepository::new(state.pool.clone());
    if let Some(report_id) = request.report_id {
        let report = report_repo
            .find_by_id(report_id)
            .await?
            .filter(|r| r.league_id == league_id)
            .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))?;

        if report.reported_user_id != request.target_user_id {
            return Err(ApiError::Validation(
                "Report does not reference this member".to_string(),
            ));
        }
        if !report.is_pending() {
            return Err(ApiError::Conflict(
                "Report has already been resolved".to_string(),
            ));
        }
    }

    let action_repo = ModerationActionRepository::new(state.pool.clone());
    let mut tx = state.pool.begin().await?;

    let action = action_repo
        .create_tx(
            &mut tx,
            league_id,
            request.report_id,
            current.user_id,
            request.target_user_id,
            request.action_type.into(),
            &request.reason,
            request.suspension_days,
        )
        .await?;

    if let Some(report_id) = request.report_id {
        if !report_repo.resolve_tx(&mut tx, report_id).await? {
            // Another moderator got there first; nothing is committed.
            return Err(ApiError::Conflict(
                "Report has already been resolved".to_string(),
            ));
        }
    }

    if request.action_type == ModerationActionType::Removed {
        member_repo
            .delete_by_league_and_user_tx(&mut tx, league_id, request.target_user_id)
            .await?;
    }

    tx.commit().await?;

    record_moderation_action(request.action_type.as_str());
    info!(
        league_id = %league_id,
        action_id = %action.id,
        actor_id = %current.user_id,
        target_user_id = %request.target_user_id,
        action_type = %request.action_type,
        "Moderation action taken"
    );

    Ok((StatusCode::CREATED, Json(action.into())))
}

/// GET /api/v1/leagues/:league_id/moderation/me
///
/// The caller's own moderation history: warnings newest first, plus the end
/// of any active suspension window.
pub async fn my_moderation_history(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
) -> Result<Json<ModerationHistory>, ApiError> {
    require_membership(&state, league_id, current.user_id).await?;

    let repo = ModerationActionRepository::new(state.pool.clone());

    let warnings: Vec<ModerationAction> = repo
        .list_warnings_for_target(league_id, current.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let suspensions: Vec<ModerationAction> = repo
        .list_suspensions_for_target(league_id, current.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ModerationHistory {
        warnings,
        suspended_until: suspended_until(&suspensions, Utc::now()),
    }))
}

/// GET /api/v1/leagues/:league_id/moderation/actions
///
/// The league's action log for moderators.
pub async fn list_actions(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Query(query): Query<ListActionsQuery>,
) -> Result<Json<Vec<ModerationAction>>, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::ViewReports) {
        return Err(ApiError::Forbidden(
            "You are not allowed to view the action log".to_string(),
        ));
    }

    let page_query = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };

    let actions = ModerationActionRepository::new(state.pool.clone())
        .list_by_league(league_id, page_query.per_page(), page_query.offset())
        .await?;

    Ok(Json(actions.into_iter().map(Into::into).collect()))
}
