//! Moderation domain models: reports, actions, and derived suspension state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::permission::LeagueAction;

/// Why a member was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Unsportsmanlike,
    Cheating,
    Harassment,
    NoShow,
    Other,
}

impl ReportReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Unsportsmanlike => "unsportsmanlike",
            ReportReason::Cheating => "cheating",
            ReportReason::Harassment => "harassment",
            ReportReason::NoShow => "no_show",
            ReportReason::Other => "other",
        }
    }
}

impl FromStr for ReportReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unsportsmanlike" => Ok(ReportReason::Unsportsmanlike),
            "cheating" => Ok(ReportReason::Cheating),
            "harassment" => Ok(ReportReason::Harassment),
            "no_show" => Ok(ReportReason::NoShow),
            "other" => Ok(ReportReason::Other),
            _ => Err(format!("Invalid report reason: {}", s)),
        }
    }
}

impl fmt::Display for ReportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReportStatus::Pending),
            "resolved" => Ok(ReportStatus::Resolved),
            _ => Err(format!("Invalid report status: {}", s)),
        }
    }
}

/// A member-conduct report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Report {
    pub id: Uuid,
    pub league_id: Uuid,
    pub reporter_id: Uuid,
    pub reported_user_id: Uuid,
    pub reason: ReportReason,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Disciplinary decision applied to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationActionType {
    Dismissed,
    Warned,
    Suspended,
    Removed,
}

impl ModerationActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationActionType::Dismissed => "dismissed",
            ModerationActionType::Warned => "warned",
            ModerationActionType::Suspended => "suspended",
            ModerationActionType::Removed => "removed",
        }
    }

    /// The league capability required to take this action.
    pub fn required_capability(&self) -> LeagueAction {
        match self {
            ModerationActionType::Dismissed => LeagueAction::DismissReports,
            ModerationActionType::Warned => LeagueAction::WarnMembers,
            ModerationActionType::Suspended => LeagueAction::SuspendMembers,
            ModerationActionType::Removed => LeagueAction::RemoveMembers,
        }
    }
}

impl FromStr for ModerationActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dismissed" => Ok(ModerationActionType::Dismissed),
            "warned" => Ok(ModerationActionType::Warned),
            "suspended" => Ok(ModerationActionType::Suspended),
            "removed" => Ok(ModerationActionType::Removed),
            _ => Err(format!("Invalid moderation action type: {}", s)),
        }
    }
}

impl fmt::Display for ModerationActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded moderation action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModerationAction {
    pub id: Uuid,
    pub league_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<Uuid>,
    pub actor_id: Uuid,
    pub target_user_id: Uuid,
    pub action_type: ModerationActionType,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspension_days: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl ModerationAction {
    /// End of the suspension window this action imposes, if any.
    pub fn suspension_end(&self) -> Option<DateTime<Utc>> {
        if self.action_type != ModerationActionType::Suspended {
            return None;
        }
        self.suspension_days
            .map(|days| self.created_at + Duration::days(days as i64))
    }
}

/// The member's current suspension end: the latest still-future end over all
/// of their suspension actions, or None when no window is active.
///
/// Computed from the immutable action log on every read; there is no stored
/// "currently suspended" flag to drift out of sync.
pub fn suspended_until(
    actions: &[ModerationAction],
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    actions
        .iter()
        .filter_map(|a| a.suspension_end())
        .filter(|end| *end > now)
        .max()
}

/// Request payload for submitting a report.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SubmitReportRequest {
    pub reported_user_id: Uuid,

    pub reason: ReportReason,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description must be between 1 and 2000 characters"
    ))]
    pub description: String,

    #[validate(url(message = "Evidence must be a valid URL"))]
    pub evidence_url: Option<String>,
}

/// Request payload for taking a moderation action.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct TakeActionRequest {
    pub target_user_id: Uuid,

    pub action_type: ModerationActionType,

    #[validate(length(
        min = 1,
        max = 1000,
        message = "Reason must be between 1 and 1000 characters"
    ))]
    pub reason: String,

    /// Required iff action_type is suspended. Presence is checked by the
    /// handler; the range is checked here.
    #[validate(custom(function = "shared::validation::validate_suspension_days"))]
    pub suspension_days: Option<i32>,

    pub report_id: Option<Uuid>,
}

/// A member's own view of their moderation history in a league.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ModerationHistory {
    /// Warnings against the member, newest first.
    pub warnings: Vec<ModerationAction>,
    /// End of the active suspension window, or None.
    pub suspended_until: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suspension(days: i32, created_at: DateTime<Utc>) -> ModerationAction {
        ModerationAction {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            report_id: None,
            actor_id: Uuid::new_v4(),
            target_user_id: Uuid::new_v4(),
            action_type: ModerationActionType::Suspended,
            reason: "repeated no-shows".to_string(),
            suspension_days: Some(days),
            created_at,
        }
    }

    fn warning(created_at: DateTime<Utc>) -> ModerationAction {
        ModerationAction {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            report_id: None,
            actor_id: Uuid::new_v4(),
            target_user_id: Uuid::new_v4(),
            action_type: ModerationActionType::Warned,
            reason: "language".to_string(),
            suspension_days: None,
            created_at,
        }
    }

    #[test]
    fn test_action_type_round_trip() {
        for t in [
            ModerationActionType::Dismissed,
            ModerationActionType::Warned,
            ModerationActionType::Suspended,
            ModerationActionType::Removed,
        ] {
            assert_eq!(t.as_str().parse::<ModerationActionType>().unwrap(), t);
        }
        assert!("banned".parse::<ModerationActionType>().is_err());
    }

    #[test]
    fn test_report_reason_round_trip() {
        for r in [
            ReportReason::Unsportsmanlike,
            ReportReason::Cheating,
            ReportReason::Harassment,
            ReportReason::NoShow,
            ReportReason::Other,
        ] {
            assert_eq!(r.as_str().parse::<ReportReason>().unwrap(), r);
        }
    }

    #[test]
    fn test_required_capability_mapping() {
        assert_eq!(
            ModerationActionType::Dismissed.required_capability(),
            LeagueAction::DismissReports
        );
        assert_eq!(
            ModerationActionType::Warned.required_capability(),
            LeagueAction::WarnMembers
        );
        assert_eq!(
            ModerationActionType::Suspended.required_capability(),
            LeagueAction::SuspendMembers
        );
        assert_eq!(
            ModerationActionType::Removed.required_capability(),
            LeagueAction::RemoveMembers
        );
    }

    #[test]
    fn test_suspension_end() {
        let now = Utc::now();
        let action = suspension(7, now);
        assert_eq!(action.suspension_end(), Some(now + Duration::days(7)));

        // Only suspensions carry a window.
        assert_eq!(warning(now).suspension_end(), None);
    }

    #[test]
    fn test_suspended_until_none_without_actions() {
        assert_eq!(suspended_until(&[], Utc::now()), None);
    }

    #[test]
    fn test_suspended_until_takes_latest_future_window() {
        let now = Utc::now();
        let actions = vec![
            suspension(3, now - Duration::days(1)),
            suspension(14, now - Duration::days(2)),
            warning(now),
        ];
        assert_eq!(
            suspended_until(&actions, now),
            Some(now - Duration::days(2) + Duration::days(14))
        );
    }

    #[test]
    fn test_elapsed_suspension_no_longer_blocks() {
        let now = Utc::now();
        let actions = vec![suspension(7, now - Duration::days(30))];
        assert_eq!(suspended_until(&actions, now), None);
    }

    #[test]
    fn test_take_action_request_suspension_days_range() {
        let valid = TakeActionRequest {
            target_user_id: Uuid::new_v4(),
            action_type: ModerationActionType::Suspended,
            reason: "cheating in ranked matches".to_string(),
            suspension_days: Some(7),
            report_id: None,
        };
        assert!(valid.validate().is_ok());

        let out_of_range = TakeActionRequest {
            suspension_days: Some(0),
            ..valid.clone()
        };
        assert!(out_of_range.validate().is_err());

        let too_long = TakeActionRequest {
            suspension_days: Some(366),
            ..valid
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_submit_report_request_validation() {
        let valid = SubmitReportRequest {
            reported_user_id: Uuid::new_v4(),
            reason: ReportReason::Cheating,
            description: "Score tampering in last night's match".to_string(),
            evidence_url: Some("https://example.com/clip.mp4".to_string()),
        };
        assert!(valid.validate().is_ok());

        let empty_description = SubmitReportRequest {
            description: String::new(),
            ..valid.clone()
        };
        assert!(empty_description.validate().is_err());

        let bad_evidence = SubmitReportRequest {
            evidence_url: Some("clip.mp4".to_string()),
            ..valid
        };
        assert!(bad_evidence.validate().is_err());
    }
}
