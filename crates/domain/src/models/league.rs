//! League domain models.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::member::LeagueRole;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Who can find and join a league without an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeagueVisibility {
    Public,
    Private,
}

impl LeagueVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueVisibility::Public => "public",
            LeagueVisibility::Private => "private",
        }
    }
}

impl FromStr for LeagueVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(LeagueVisibility::Public),
            "private" => Ok(LeagueVisibility::Private),
            _ => Err(format!("Invalid league visibility: {}", s)),
        }
    }
}

impl fmt::Display for LeagueVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A competition community with members, teams, game types, and matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct League {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub visibility: LeagueVisibility,
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl League {
    /// An archived league accepts no new members, invitations, or links.
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Whether a user may join through the public self-join path.
    pub fn accepts_public_joins(&self) -> bool {
        self.visibility == LeagueVisibility::Public && !self.is_archived()
    }
}

/// Request payload for creating a league.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateLeagueRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub visibility: Option<LeagueVisibility>,

    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo_url: Option<String>,
}

/// Request payload for updating a league.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateLeagueRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub visibility: Option<LeagueVisibility>,

    #[validate(url(message = "Logo must be a valid URL"))]
    pub logo_url: Option<String>,
}

/// League listing entry for the caller's own leagues.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LeagueSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub visibility: LeagueVisibility,
    pub member_count: i64,
    pub your_role: LeagueRole,
    pub joined_at: DateTime<Utc>,
}

/// Full league detail with the caller's membership.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LeagueDetail {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub visibility: LeagueVisibility,
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    pub member_count: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub your_role: LeagueRole,
}

/// Derive a URL slug from a league name. Uniqueness is resolved by the
/// repository with a numeric suffix.
pub fn generate_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "league".to_string()
    } else {
        slug.chars().take(60).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_league(visibility: LeagueVisibility, archived_at: Option<DateTime<Utc>>) -> League {
        League {
            id: Uuid::new_v4(),
            name: "Thursday Pinball".to_string(),
            slug: "thursday-pinball".to_string(),
            description: None,
            visibility,
            logo_url: None,
            archived_at,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_archived() {
        assert!(!test_league(LeagueVisibility::Private, None).is_archived());
        assert!(test_league(LeagueVisibility::Private, Some(Utc::now())).is_archived());
    }

    #[test]
    fn test_accepts_public_joins() {
        assert!(test_league(LeagueVisibility::Public, None).accepts_public_joins());
        assert!(!test_league(LeagueVisibility::Private, None).accepts_public_joins());
        // Archiving closes the public-join path too.
        assert!(!test_league(LeagueVisibility::Public, Some(Utc::now())).accepts_public_joins());
    }

    #[test]
    fn test_visibility_round_trip() {
        for v in [LeagueVisibility::Public, LeagueVisibility::Private] {
            assert_eq!(v.as_str().parse::<LeagueVisibility>().unwrap(), v);
        }
        assert!("secret".parse::<LeagueVisibility>().is_err());
    }

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("Thursday Pinball"), "thursday-pinball");
        assert_eq!(generate_slug("  FIFA '26 Night!  "), "fifa-26-night");
        assert_eq!(generate_slug("---"), "league");
        assert_eq!(generate_slug(""), "league");
    }

    #[test]
    fn test_generate_slug_truncates() {
        let long = "a".repeat(100);
        assert_eq!(generate_slug(&long).len(), 60);
    }

    #[test]
    fn test_create_league_request_validation() {
        let valid = CreateLeagueRequest {
            name: "Office Foosball".to_string(),
            description: Some("Best of three, every lunch break".to_string()),
            visibility: Some(LeagueVisibility::Private),
            logo_url: Some("https://example.com/logo.png".to_string()),
        };
        assert!(valid.validate().is_ok());

        let bad_url = CreateLeagueRequest {
            name: "Office Foosball".to_string(),
            description: None,
            visibility: None,
            logo_url: Some("not a url".to_string()),
        };
        assert!(bad_url.validate().is_err());

        let empty_name = CreateLeagueRequest {
            name: String::new(),
            description: None,
            visibility: None,
            logo_url: None,
        };
        assert!(empty_name.validate().is_err());
    }
}
