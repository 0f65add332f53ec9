//! User provisioning.

use domain::models::user::username_base;
use persistence::entities::UserEntity;
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Ensures a mirror row exists for the authenticated caller.
///
/// First sight of a subject mints a unique username from their display
/// name; later calls return the stored row untouched.
pub async fn ensure_user(state: &AppState, current: &CurrentUser) -> Result<UserEntity, ApiError> {
    let repo = UserRepository::new(state.pool.clone());

    if let Some(user) = repo.find_by_id(current.user_id).await? {
        return Ok(user);
    }

    let base = username_base(&current.display_name);
    let username = repo.generate_unique_username(&base).await?;

    let user = repo
        .upsert_from_identity(current.user_id, &current.email, &username, &current.display_name)
        .await?;

    tracing::info!(
        user_id = %user.id,
        username = %user.username,
        "Provisioned user from identity provider"
    );

    Ok(user)
}
