//! Common validation utilities.

use validator::ValidationError;

/// Longest suspension a moderation action may impose, in days.
pub const MAX_SUSPENSION_DAYS: i32 = 365;

/// Longest lifetime of a direct invitation, in days.
pub const MAX_INVITATION_LIFETIME_DAYS: i32 = 90;

/// Longest lifetime of a shareable invite link, in hours.
pub const MAX_INVITE_LINK_LIFETIME_HOURS: i32 = 24 * 90;

/// Upper bound on the use cap of a shareable invite link.
pub const MAX_INVITE_LINK_USES: i32 = 500;

/// Validates that a suspension length is within [1, MAX_SUSPENSION_DAYS].
pub fn validate_suspension_days(days: i32) -> Result<(), ValidationError> {
    if (1..=MAX_SUSPENSION_DAYS).contains(&days) {
        Ok(())
    } else {
        let mut err = ValidationError::new("suspension_days_range");
        err.message = Some("Suspension must be between 1 and 365 days".into());
        Err(err)
    }
}

/// Validates a direct invitation lifetime in days.
pub fn validate_invitation_lifetime(days: i32) -> Result<(), ValidationError> {
    if (1..=MAX_INVITATION_LIFETIME_DAYS).contains(&days) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invitation_lifetime_range");
        err.message = Some("Invitation lifetime must be between 1 and 90 days".into());
        Err(err)
    }
}

/// Validates an invite link lifetime in hours.
pub fn validate_invite_link_lifetime(hours: i32) -> Result<(), ValidationError> {
    if (1..=MAX_INVITE_LINK_LIFETIME_HOURS).contains(&hours) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invite_link_lifetime_range");
        err.message = Some("Invite link lifetime must be between 1 hour and 90 days".into());
        Err(err)
    }
}

/// Validates an invite link use cap.
pub fn validate_invite_link_max_uses(max_uses: i32) -> Result<(), ValidationError> {
    if (1..=MAX_INVITE_LINK_USES).contains(&max_uses) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invite_link_max_uses_range");
        err.message = Some("Use cap must be between 1 and 500".into());
        Err(err)
    }
}

/// Validates a score reported for a match participant.
pub fn validate_score(score: i32) -> Result<(), ValidationError> {
    if score >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("score_range");
        err.message = Some("Scores must be non-negative".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_suspension_days() {
        assert!(validate_suspension_days(1).is_ok());
        assert!(validate_suspension_days(7).is_ok());
        assert!(validate_suspension_days(365).is_ok());
        assert!(validate_suspension_days(0).is_err());
        assert!(validate_suspension_days(-1).is_err());
        assert!(validate_suspension_days(366).is_err());
    }

    #[test]
    fn test_validate_suspension_days_error_message() {
        let err = validate_suspension_days(0).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Suspension must be between 1 and 365 days"
        );
    }

    #[test]
    fn test_validate_invitation_lifetime() {
        assert!(validate_invitation_lifetime(1).is_ok());
        assert!(validate_invitation_lifetime(90).is_ok());
        assert!(validate_invitation_lifetime(0).is_err());
        assert!(validate_invitation_lifetime(91).is_err());
    }

    #[test]
    fn test_validate_invite_link_lifetime() {
        assert!(validate_invite_link_lifetime(1).is_ok());
        assert!(validate_invite_link_lifetime(24).is_ok());
        assert!(validate_invite_link_lifetime(24 * 90).is_ok());
        assert!(validate_invite_link_lifetime(0).is_err());
        assert!(validate_invite_link_lifetime(24 * 90 + 1).is_err());
    }

    #[test]
    fn test_validate_invite_link_max_uses() {
        assert!(validate_invite_link_max_uses(1).is_ok());
        assert!(validate_invite_link_max_uses(500).is_ok());
        assert!(validate_invite_link_max_uses(0).is_err());
        assert!(validate_invite_link_max_uses(501).is_err());
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(0).is_ok());
        assert!(validate_score(21).is_ok());
        assert!(validate_score(-1).is_err());
    }

    #[test]
    fn test_validate_score_error_message() {
        let err = validate_score(-3).unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Scores must be non-negative");
    }
}
