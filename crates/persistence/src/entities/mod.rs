//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod game;
pub mod invitation;
pub mod invite_link;
pub mod league;
pub mod league_member;
pub mod moderation_action;
pub mod report;
pub mod team;
pub mod user;

pub use game::{GameTypeEntity, MatchEntity};
pub use invitation::{InvitationEntity, InvitationStatusDb};
pub use invite_link::{InviteLinkEntity, InviteLinkWithLeagueEntity};
pub use league::{LeagueEntity, LeagueVisibilityDb, LeagueWithMembershipEntity};
pub use league_member::{
    LeagueMemberEntity, LeagueRoleDb, MemberWithUserEntity, PlaceholderMemberEntity,
};
pub use moderation_action::{ModerationActionEntity, ModerationActionTypeDb};
pub use report::{ReportEntity, ReportReasonDb, ReportStatusDb};
pub use team::{TeamEntity, TeamMemberEntity, TeamMemberWithNameEntity, TeamRoleDb};
pub use user::UserEntity;
