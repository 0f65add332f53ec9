//! User domain model.
//!
//! Users are owned by the external identity subsystem; this service keeps a
//! mirror row per authenticated subject for display names and foreign keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::league::generate_slug;

/// Mirror of an identity-provider subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Derive the base username for a new user from their display name.
///
/// The repository resolves collisions by appending a numeric suffix.
pub fn username_base(display_name: &str) -> String {
    let base = generate_slug(display_name);
    if base == "league" && !display_name.to_lowercase().contains("league") {
        // generate_slug's fallback word makes no sense for people.
        "player".to_string()
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_base_from_display_name() {
        assert_eq!(username_base("Player One"), "player-one");
        assert_eq!(username_base("J. R. \"Bob\" Dobbs"), "j-r-bob-dobbs");
    }

    #[test]
    fn test_username_base_fallback() {
        assert_eq!(username_base("!!!"), "player");
        assert_eq!(username_base(""), "player");
    }

    #[test]
    fn test_username_base_keeps_league_word() {
        assert_eq!(username_base("League Fan"), "league-fan");
    }
}
