//! Conduct report routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::moderation::{suspended_until, ModerationAction, Report, SubmitReportRequest};
use domain::models::permission::LeagueAction;
use persistence::repositories::{
    LeagueMemberRepository, ModerationActionRepository, ReportRepository,
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

/// Query parameters for listing reports.
#[derive(Debug, Default, Deserialize)]
pub struct ListReportsQuery {
    /// pending | resolved | all
    pub status: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Response for report listings.
#[derive(Debug, Serialize)]
pub struct ListReportsResponse {
    pub reports: Vec<Report>,
    pub pagination: Pagination,
}

/// POST /api/v1/leagues/:league_id/reports
///
/// Report a member's conduct.
pub async fn submit_report(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Json(request): Json<SubmitReportRequest>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    request.validate()?;
    ensure_user(&state, &current).await?;

    require_membership(&state, league_id, current.user_id).await?;

    if request.reported_user_id == current.user_id {
        return Err(ApiError::Validation(
            "You cannot report yourself".to_string(),
        ));
    }

    let member_repo = LeagueMemberRepository::new(state.pool.clone());
    member_repo
        .find_by_league_and_user(league_id, request.reported_user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found in this league".to_string()))?;

    // A reporter sitting out a suspension cannot open new reports.
    let action_repo = ModerationActionRepository::new(state.pool.clone());
    let suspensions: Vec<ModerationAction> = action_repo
        .list_suspensions_for_target(league_id, current.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    if suspended_until(&suspensions, Utc::now()).is_some() {
        return Err(ApiError::Forbidden(
            "You cannot submit reports while suspended".to_string(),
        ));
    }

    let report_repo = ReportRepository::new(state.pool.clone());
    if report_repo
        .has_pending_duplicate(league_id, current.user_id, request.reported_user_id)
        .await?
    {
        return Err(ApiError::Conflict(
            "You already have a pending report against this member".to_string(),
        ));
    }

    let report = report_repo
        .create(
            league_id,
            current.user_id,
            request.reported_user_id,
            request.reason.into(),
            &request.description,
            request.evidence_url.as_deref(),
        )
        .await?;

    info!(
        league_id = %league_id,
        report_id = %report.id,
        reporter_id = %current.user_id,
        reported_user_id = %request.reported_user_id,
        reason = %request.reason,
        "Report submitted"
    );

    Ok((StatusCode::CREATED, Json(report.into())))
}

/// GET /api/v1/leagues/:league_id/reports
///
/// List reports for moderators.
pub async fn list_reports(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(league_id): Path<Uuid>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ListReportsResponse>, ApiError> {
    let (_, role) = require_membership(&state, league_id, current.user_id).await?;
    if !role.can_perform(LeagueAction::ViewReports) {
        return Err(ApiError::Forbidden(
            "You are not allowed to view reports".to_string(),
        ));
    }

    let page_query = PageQuery {
        page: query.page,
        per_page: query.per_page,
    };

    let repo = ReportRepository::new(state.pool.clone());
    let reports = repo
        .list_by_league(
            league_id,
            query.status.as_deref(),
            page_query.per_page(),
            page_query.offset(),
        )
        .await?;
    let total = repo
        .count_by_league(league_id, query.status.as_deref())
        .await?;

    Ok(Json(ListReportsResponse {
        reports: reports.into_iter().map(Into::into).collect(),
        pagination: Pagination::new(page_query.page(), page_query.per_page(), total),
    }))
}
