//! User profile routes.

use axum::{extract::State, Json};
use domain::models::User;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::services::users::ensure_user;

/// GET /api/v1/users/me
///
/// Returns the caller's profile, provisioning it on first sight.
pub async fn me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<User>, ApiError> {
    let user = ensure_user(&state, &current).await?;
    Ok(Json(user.into()))
}
