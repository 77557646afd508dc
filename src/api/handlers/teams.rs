use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::members::{MemberResponse, NewMemberRequest};
use super::require_team;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::team::{PresentationDay, Team};

/// Request body for creating a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub presentation_day: i64,
    pub members: Vec<NewMemberRequest>,
}

/// Request body for changing the presentation day
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    pub presentation_day: i64,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub presentation_day: PresentationDay,
    pub presentation_day_name: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            presentation_day: team.presentation_day(),
            presentation_day_name: team.presentation_day().name(),
            created_at: team.created_at(),
        }
    }
}

/// Response from team creation
#[derive(Debug, Serialize)]
pub struct CreateTeamResponse {
    #[serde(flatten)]
    pub team: TeamResponse,
    pub members: Vec<MemberResponse>,
}

/// Create a new team with its initial members
///
/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    payload: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateTeamResponse>), ApiError> {
    let Json(req) = payload?;
    let day = PresentationDay::try_from(req.presentation_day)?;
    let names: Vec<&str> = req.members.iter().map(|m| m.name.as_str()).collect();

    let (team, members, events) = Team::new(day, names.as_slice())?;

    state.roster.create_team(&team, &members).await?;
    for event in &events {
        tracing::info!(team_id = %event.team_id(), ?event, "Team created");
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateTeamResponse {
            team: TeamResponse::from(&team),
            members: members.iter().map(MemberResponse::from).collect(),
        }),
    ))
}

/// Get a team by ID
///
/// GET /api/teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TeamResponse>, ApiError> {
    let Path(id) = path?;
    let team = require_team(&state, id).await?;
    Ok(Json(TeamResponse::from(&team)))
}

/// Change a team's presentation day
///
/// PATCH /api/teams/:id
pub async fn update_team(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateTeamRequest>, JsonRejection>,
) -> Result<Json<TeamResponse>, ApiError> {
    let Path(id) = path?;
    let Json(req) = payload?;
    let day = PresentationDay::try_from(req.presentation_day)?;

    let mut team = require_team(&state, id).await?;
    if let Some(event) = team.change_presentation_day(day) {
        state.roster.update_presentation_day(id, day).await?;
        tracing::info!(team_id = %id, ?event, "Presentation day changed");
    }

    Ok(Json(TeamResponse::from(&team)))
}

/// Delete a team and its members
///
/// DELETE /api/teams/:id
pub async fn delete_team(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    state.roster.delete_team(id).await?;
    tracing::info!(team_id = %id, "Team deleted");

    Ok(StatusCode::NO_CONTENT)
}
