//! Placeholder member routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::member::{CreatePlaceholderRequest, PlaceholderMember};
use domain::models::permission::LeagueAction;
use persistence::repositories::PlaceholderMemberRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::routes::require_membership;
use crate::services::users::ensure_user;

/// POST /api/v1/leagues/:league_id/placeholders
///
/// Create a placeholder member.
pub async fn create_placeholder(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Json(request): Json<CreatePlaceholderRequest>,
) -> Result<(StatusCode, Json<PlaceholderMember>), ApiError> {
    request.validate()?;
    ensure_user(&state, &current).await?;

    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::CreatePlaceholders) {
        return Err(ApiError::Forbidden(
            "You are not allowed to create placeholder members".to_string(),
        ));
    }

    let repo = PlaceholderMemberRepository::new(state.pool.clone());
    let placeholder = repo
        .create(league_id, request.display_name.trim(), current.user_id)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => ApiError::Conflict(
                "A placeholder with this name already exists in this league".to_string(),
            ),
            other => other,
        })?;

    info!(
        league_id = %league_id,
        placeholder_id = %placeholder.id,
        user_id = %current.user_id,
        "Placeholder member created"
    );

    Ok((StatusCode::CREATED, Json(placeholder.into())))
}

/// GET /api/v1/leagues/:league_id/placeholders
///
/// List available placeholder members. Retired ones are excluded.
pub async fn list_placeholders(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
) -> Result<Json<Vec<PlaceholderMember>>, ApiError> {
    require_membership(&state, league_id, current.user_id).await?;

    let repo = PlaceholderMemberRepository::new(state.pool.clone());
    let placeholders = repo.list_available(league_id).await?;

    Ok(Json(placeholders.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/leagues/:league_id/placeholders/:placeholder_id/retire
///
/// Retire a placeholder member.
pub async fn retire_placeholder(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((league_id, placeholder_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::CreatePlaceholders) {
        return Err(ApiError::Forbidden(
            "You are not allowed to manage placeholder members".to_string(),
        ));
    }

    let repo = PlaceholderMemberRepository::new(state.pool.clone());
    repo.find_by_id(placeholder_id, league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Placeholder member not found".to_string()))?;

    if !repo.retire(placeholder_id, league_id).await? {
        return Err(ApiError::Conflict(
            "This placeholder member is already retired".to_string(),
        ));
    }

    info!(
        league_id = %league_id,
        placeholder_id = %placeholder_id,
        user_id = %current.user_id,
        "Placeholder member retired"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/leagues/:league_id/placeholders/:placeholder_id/restore
///
/// Restore a retired placeholder member.
pub async fn restore_placeholder(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((league_id, placeholder_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::CreatePlaceholders) {
        return Err(ApiError::Forbidden(
            "You are not allowed to manage placeholder members".to_string(),
        ));
    }

    let repo = PlaceholderMemberRepository::new(state.pool.clone());
    repo.find_by_id(placeholder_id, league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Placeholder member not found".to_string()))?;

    if !repo.restore(placeholder_id, league_id).await? {
        return Err(ApiError::Conflict(
            "This placeholder member is not retired".to_string(),
        ));
    }

    info!(
        league_id = %league_id,
        placeholder_id = %placeholder_id,
        user_id = %current.user_id,
        "Placeholder member restored"
    );

    Ok(StatusCode::NO_CONTENT)
}
