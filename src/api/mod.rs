// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, patch, post},
    Router,
};

use handlers::{health, members, schedule, teams};
use state::AppState;

/// Builds the API route table
///
/// Middleware and static file serving are layered on by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health::health_check))
        // Team routes
        .route("/api/teams", post(teams::create_team))
        .route(
            "/api/teams/:id",
            get(teams::get_team)
                .patch(teams::update_team)
                .delete(teams::delete_team),
        )
        // Member routes
        .route(
            "/api/teams/:id/members",
            get(members::list_members).post(members::add_members),
        )
        .route("/api/teams/:id/members/swap", post(members::swap_members))
        .route(
            "/api/teams/:id/members/positions",
            patch(members::reposition_members),
        )
        .route(
            "/api/teams/:id/members/:member_id",
            patch(members::update_member_position).delete(members::remove_member),
        )
        // Rotation
        .route("/api/teams/:id/schedule", get(schedule::get_schedule))
        // Shared state
        .with_state(state)
}
