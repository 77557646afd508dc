// HTTP handlers
// Thin adapters: load from the store, run domain logic, persist, respond

pub mod health;
pub mod members;
pub mod schedule;
pub mod teams;

use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::errors::RosterError;
use crate::domain::member::Member;
use crate::domain::team::Team;

/// Loads a team or fails with 404
async fn require_team(state: &AppState, team_id: Uuid) -> Result<Team, ApiError> {
    state
        .roster
        .find_team(team_id)
        .await?
        .ok_or_else(|| RosterError::team_not_found(team_id).into())
}

/// Loads a team together with its members in position order
async fn load_roster(state: &AppState, team_id: Uuid) -> Result<(Team, Vec<Member>), ApiError> {
    let team = require_team(state, team_id).await?;
    let members = state.roster.list_members(team_id).await?;
    Ok((team, members))
}
