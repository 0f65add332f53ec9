//! Report entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::moderation::{Report, ReportReason, ReportStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for report_reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "report_reason", rename_all = "snake_case")]
pub enum ReportReasonDb {
    Unsportsmanlike,
    Cheating,
    Harassment,
    NoShow,
    Other,
}

impl From<ReportReasonDb> for ReportReason {
    fn from(db: ReportReasonDb) -> Self {
        match db {
            ReportReasonDb::Unsportsmanlike => ReportReason::Unsportsmanlike,
            ReportReasonDb::Cheating => ReportReason::Cheating,
            ReportReasonDb::Harassment => ReportReason::Harassment,
            ReportReasonDb::NoShow => ReportReason::NoShow,
            ReportReasonDb::Other => ReportReason::Other,
        }
    }
}

impl From<ReportReason> for ReportReasonDb {
    fn from(reason: ReportReason) -> Self {
        match reason {
            ReportReason::Unsportsmanlike => ReportReasonDb::Unsportsmanlike,
            ReportReason::Cheating => ReportReasonDb::Cheating,
            ReportReason::Harassment => ReportReasonDb::Harassment,
            ReportReason::NoShow => ReportReasonDb::NoShow,
            ReportReason::Other => ReportReasonDb::Other,
        }
    }
}

/// Database enum for report_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
pub enum ReportStatusDb {
    Pending,
    Resolved,
}

impl From<ReportStatusDb> for ReportStatus {
    fn from(db: ReportStatusDb) -> Self {
        match db {
            ReportStatusDb::Pending => ReportStatus::Pending,
            ReportStatusDb::Resolved => ReportStatus::Resolved,
        }
    }
}

/// Database row mapping for the reports table.
#[derive(Debug, Clone, FromRow)]
pub struct ReportEntity {
    pub id: Uuid,
    pub league_id: Uuid,
    pub reporter_id: Uuid,
    pub reported_user_id: Uuid,
    pub reason: ReportReasonDb,
    pub description: String,
    pub evidence_url: Option<String>,
    pub status: ReportStatusDb,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ReportEntity {
    pub fn is_pending(&self) -> bool {
        self.status == ReportStatusDb::Pending
    }
}

impl From<ReportEntity> for Report {
    fn from(entity: ReportEntity) -> Self {
        Self {
            id: entity.id,
            league_id: entity.league_id,
            reporter_id: entity.reporter_id,
            reported_user_id: entity.reported_user_id,
            reason: entity.reason.into(),
            description: entity.description,
            evidence_url: entity.evidence_url,
            status: entity.status.into(),
            created_at: entity.created_at,
            resolved_at: entity.resolved_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_mapping_round_trip() {
        for reason in [
            ReportReason::Unsportsmanlike,
            ReportReason::Cheating,
            ReportReason::Harassment,
            ReportReason::NoShow,
            ReportReason::Other,
        ] {
            let db: ReportReasonDb = reason.into();
            let back: ReportReason = db.into();
            assert_eq!(back, reason);
        }
    }

    #[test]
    fn test_is_pending() {
        let entity = ReportEntity {
            id: Uuid::new_v4(),
            league_id: Uuid::new_v4(),
            reporter_id: Uuid::new_v4(),
            reported_user_id: Uuid::new_v4(),
            reason: ReportReasonDb::NoShow,
            description: "Skipped the final without a word".to_string(),
            evidence_url: None,
            status: ReportStatusDb::Pending,
            created_at: Utc::now(),
            resolved_at: None,
        };
        assert!(entity.is_pending());

        let resolved = ReportEntity {
            status: ReportStatusDb::Resolved,
            resolved_at: Some(Utc::now()),
            ..entity
        };
        assert!(!resolved.is_pending());
    }
}
