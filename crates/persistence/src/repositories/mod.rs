//! Repository implementations for database operations.

pub mod game;
pub mod invitation;
pub mod invite_link;
pub mod league;
pub mod league_member;
pub mod moderation_action;
pub mod placeholder_member;
pub mod report;
pub mod team;
pub mod user;

pub use game::{GameTypeRepository, MatchRepository};
pub use invitation::{
    calculate_invitation_expiration, default_invitation_expiration, InvitationRepository,
    InvitationSummaryCounts,
};
pub use invite_link::{generate_invite_link_token, InviteLinkRepository};
pub use league::LeagueRepository;
pub use league_member::LeagueMemberRepository;
pub use moderation_action::ModerationActionRepository;
pub use placeholder_member::PlaceholderMemberRepository;
pub use report::ReportRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
