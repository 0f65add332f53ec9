//! Game type routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::game::{CreateGameTypeRequest, GameType};
use domain::models::permission::LeagueAction;
use persistence::repositories::GameTypeRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::routes::require_membership;
use crate::services::users::ensure_user;

/// POST /api/v1/leagues/:league_id/game-types
///
/// Define a game type.
pub async fn create_game_type(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Json(request): Json<CreateGameTypeRequest>,
) -> Result<(StatusCode, Json<GameType>), ApiError> {
    request.validate()?;
    ensure_user(&state, &current).await?;

    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::ManageGameTypes) {
        return Err(ApiError::Forbidden(
            "You are not allowed to manage game types".to_string(),
        ));
    }

    let repo = GameTypeRepository::new(state.pool.clone());
    let game_type = repo
        .create(
            league_id,
            request.name.trim(),
            request.description.as_deref(),
            request.icon.as_deref(),
            current.user_id,
        )
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => ApiError::Conflict(
                "A game type with this name already exists in this league".to_string(),
            ),
            other => other,
        })?;

    info!(
        league_id = %league_id,
        game_type_id = %game_type.id,
        user_id = %current.user_id,
        "Game type created"
    );

    Ok((StatusCode::CREATED, Json(game_type.into())))
}

/// GET /api/v1/leagues/:league_id/game-types
///
/// List a league's game types.
pub async fn list_game_types(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
) -> Result<Json<Vec<GameType>>, ApiError> {
    require_membership(&state, league_id, current.user_id).await?;

    let repo = GameTypeRepository::new(state.pool.clone());
    let game_types = repo.list_by_league(league_id).await?;

    Ok(Json(game_types.into_iter().map(Into::into).collect()))
}

/// DELETE /api/v1/leagues/:league_id/game-types/:game_type_id
///
/// Delete a game type and its matches.
pub async fn delete_game_type(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((league_id, game_type_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::ManageGameTypes) {
        return Err(ApiError::Forbidden(
            "You are not allowed to manage game types".to_string(),
        ));
    }

    let repo = GameTypeRepository::new(state.pool.clone());
    if !repo.delete(game_type_id, league_id).await? {
        return Err(ApiError::NotFound("Game type not found".to_string()));
    }

    info!(
        league_id = %league_id,
        game_type_id = %game_type_id,
        user_id = %current.user_id,
        "Game type deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
