use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    game_types, health, invitations, invite_links, leagues, matches, members, moderation,
    placeholders, reports, teams, users,
};
use shared::jwt::TokenValidator;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub token_validator: Arc<TokenValidator>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> anyhow::Result<Router> {
    let config = Arc::new(config);

    // PEM keys come from the identity provider; anything else is treated as
    // a symmetric test secret so harnesses can mint their own tokens.
    let token_validator = if config.auth.public_key.contains("BEGIN") {
        TokenValidator::with_leeway(&config.auth.public_key, config.auth.leeway_secs)
            .map_err(|e| anyhow::anyhow!("Invalid auth public key: {}", e))?
    } else {
        tracing::warn!("auth.public_key is not a PEM key; using symmetric test validation");
        TokenValidator::new_for_testing(&config.auth.public_key)
    };

    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        token_validator: Arc::new(token_validator),
        rate_limiter,
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Authenticated routes; the CurrentUser extractor enforces the token
    // and the per-user rate limit.
    let api_routes = Router::new()
        // Users
        .route("/api/v1/users/me", get(users::me))
        // Leagues
        .route(
            "/api/v1/leagues",
            post(leagues::create_league).get(leagues::list_my_leagues),
        )
        .route(
            "/api/v1/leagues/:league_id",
            get(leagues::get_league).put(leagues::update_league),
        )
        .route(
            "/api/v1/leagues/:league_id/archive",
            post(leagues::archive_league),
        )
        .route("/api/v1/leagues/:league_id/join", post(leagues::join_public_league))
        .route("/api/v1/leagues/:league_id/leave", post(leagues::leave_league))
        // Members
        .route(
            "/api/v1/leagues/:league_id/members",
            get(members::list_members),
        )
        .route(
            "/api/v1/leagues/:league_id/members/:user_id/role",
            put(members::change_member_role),
        )
        // Placeholder members
        .route(
            "/api/v1/leagues/:league_id/placeholders",
            post(placeholders::create_placeholder).get(placeholders::list_placeholders),
        )
        .route(
            "/api/v1/leagues/:league_id/placeholders/:placeholder_id/retire",
            post(placeholders::retire_placeholder),
        )
        .route(
            "/api/v1/leagues/:league_id/placeholders/:placeholder_id/restore",
            post(placeholders::restore_placeholder),
        )
        // Direct invitations
        .route(
            "/api/v1/leagues/:league_id/invitations",
            post(invitations::create_invitation).get(invitations::list_invitations),
        )
        .route(
            "/api/v1/leagues/:league_id/invitations/:invitation_id",
            delete(invitations::revoke_invitation),
        )
        .route("/api/v1/invitations", get(invitations::list_my_invitations))
        .route(
            "/api/v1/invitations/:invitation_id/accept",
            post(invitations::accept_invitation),
        )
        .route(
            "/api/v1/invitations/:invitation_id/decline",
            post(invitations::decline_invitation),
        )
        // Invite links
        .route(
            "/api/v1/leagues/:league_id/links",
            post(invite_links::create_invite_link).get(invite_links::list_invite_links),
        )
        .route(
            "/api/v1/leagues/:league_id/links/:link_id",
            delete(invite_links::revoke_invite_link),
        )
        .route("/api/v1/links/:token/join", post(invite_links::join_via_invite_link))
        // Teams
        .route(
            "/api/v1/leagues/:league_id/teams",
            post(teams::create_team).get(teams::list_teams),
        )
        .route("/api/v1/leagues/:league_id/teams/:team_id", put(teams::rename_team))
        .route(
            "/api/v1/leagues/:league_id/teams/:team_id/roster",
            get(teams::roster),
        )
        .route(
            "/api/v1/leagues/:league_id/teams/:team_id/members",
            post(teams::add_team_member),
        )
        .route(
            "/api/v1/leagues/:league_id/teams/:team_id/members/:league_member_id",
            delete(teams::remove_team_member),
        )
        // Reports & moderation
        .route(
            "/api/v1/leagues/:league_id/reports",
            post(reports::submit_report).get(reports::list_reports),
        )
        .route(
            "/api/v1/leagues/:league_id/moderation/actions",
            post(moderation::take_action).get(moderation::list_actions),
        )
        .route(
            "/api/v1/leagues/:league_id/moderation/me",
            get(moderation::my_moderation_history),
        )
        // Game types & matches
        .route(
            "/api/v1/leagues/:league_id/game-types",
            post(game_types::create_game_type).get(game_types::list_game_types),
        )
        .route(
            "/api/v1/leagues/:league_id/game-types/:game_type_id",
            delete(game_types::delete_game_type),
        )
        .route(
            "/api/v1/leagues/:league_id/matches",
            post(matches::report_match).get(matches::list_matches),
        );

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/api/v1/links/:token", get(invite_links::get_invite_link_details))
        .route("/metrics", get(metrics_handler));

    Ok(Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state))
}
