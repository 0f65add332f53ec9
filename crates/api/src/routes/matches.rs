//! Match reporting routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::game::{Match, ReportMatchRequest};
use domain::models::moderation::{suspended_until, ModerationAction};
use persistence::repositories::{
    GameTypeRepository, MatchRepository, ModerationActionRepository,
};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageQuery, Pagination};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::routes::require_membership;
use crate::services::users::ensure_user;

/// Query parameters for listing matches.
#[derive(Debug, Default, Deserialize)]
pub struct ListMatchesQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Response for match listings.
#[derive(Debug, Serialize)]
pub struct ListMatchesResponse {
    pub matches: Vec<Match>,
    pub pagination: Pagination,
}

/// POST /api/v1/leagues/:league_id/matches
///
/// Report a played match.
pub async fn report_match(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Json(request): Json<ReportMatchRequest>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    request.validate()?;
    ensure_user(&state, &current).await?;

    require_membership(&state, league_id, current.user_id).await?;

    if request.has_duplicate_participants() {
        return Err(ApiError::Validation(
            "A member cannot appear twice in one match".to_string(),
        ));
    }

    // A suspended member is barred from participation, reporting included.
    let action_repo = ModerationActionRepository::new(state.pool.clone());
    let suspensions: Vec<ModerationAction> = action_repo
        .list_suspensions_for_target(league_id, current.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    if suspended_until(&suspensions, Utc::now()).is_some() {
        return Err(ApiError::Forbidden(
            "You cannot report matches while suspended".to_string(),
        ));
    }

    let game_type_repo = GameTypeRepository::new(state.pool.clone());
    game_type_repo
        .find_by_id(request.game_type_id, league_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Game type not found".to_string()))?;

    let match_repo = MatchRepository::new(state.pool.clone());

    let participant_ids: Vec<Uuid> = request.participants.iter().map(|p| p.member_id).collect();
    let valid = match_repo
        .count_valid_participants(league_id, &participant_ids)
        .await?;
    if valid != participant_ids.len() as i64 {
        return Err(ApiError::Validation(
            "One or more participants are not available members of this league".to_string(),
        ));
    }

    let participants_json = serde_json::to_value(&request.participants)
        .map_err(|e| ApiError::Internal(format!("Failed to encode participants: {}", e)))?;

    let entity = match_repo
        .create(
            league_id,
            request.game_type_id,
            current.user_id,
            request.played_at.unwrap_or_else(Utc::now),
            &participants_json,
        )
        .await?;

    info!(
        league_id = %league_id,
        match_id = %entity.id,
        game_type_id = %request.game_type_id,
        reported_by = %current.user_id,
        participants = request.participants.len(),
        "Match reported"
    );

    let domain_match = entity
        .into_domain()
        .map_err(|e| ApiError::Internal(format!("Failed to decode participants: {}", e)))?;

    Ok((StatusCode::CREATED, Json(domain_match)))
}

/// GET /api/v1/leagues/:league_id/matches
///
/// List recent matches, newest first.
pub async fn list_matches(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Query(query): Query<ListMatchesQuery>,
) -> Result<Json<ListMatchesResponse>, ApiError> {
    require_membership(&state, league_id, current.user_id).await?;

    let page_query = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };

    let repo = MatchRepository::new(state.pool.clone());
    let entities = repo
        .list_recent(league_id, page_query.per_page(), page_query.offset())
        .await?;
    let total = repo.count_by_league(league_id).await?;

    let mut matches = Vec::with_capacity(entities.len());
    for entity in entities {
        let domain_match = entity
            .into_domain()
            .map_err(|e| ApiError::Internal(format!("Failed to decode participants: {}", e)))?;
        matches.push(domain_match);
    }

    Ok(Json(ListMatchesResponse {
        matches,
        pagination: Pagination::new(page_query.page(), page_query.per_page(), total),
    }))
}
