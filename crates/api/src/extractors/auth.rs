//! Authenticated-caller extractor.
//!
//! Validates the Bearer access token issued by the external identity
//! provider and hands handlers the caller's identity. The caller is always
//! passed on explicitly from here; nothing downstream reads ambient state.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID from the token's subject claim.
    pub user_id: Uuid,
    /// Verified email address.
    pub email: String,
    /// Display name, falling back to the email's local part.
    pub display_name: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                ApiError::Unauthorized("Invalid Authorization header format".to_string())
            })?;

        let claims = state
            .token_validator
            .validate(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid subject in token".to_string()))?;

        if let Some(ref rate_limiter) = state.rate_limiter {
            if rate_limiter.check(user_id).is_err() {
                return Err(ApiError::RateLimited);
            }
        }

        let display_name = claims
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| {
                claims
                    .email
                    .split('@')
                    .next()
                    .unwrap_or("player")
                    .to_string()
            });

        Ok(CurrentUser {
            user_id,
            email: claims.email,
            display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_clone() {
        let user = CurrentUser {
            user_id: Uuid::new_v4(),
            email: "player@example.com".to_string(),
            display_name: "Player".to_string(),
        };
        let cloned = user.clone();
        assert_eq!(cloned.user_id, user.user_id);
        assert_eq!(cloned.email, user.email);
    }
}
