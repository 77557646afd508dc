use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::load_roster;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::member::{Member, PositionAssignment};
use crate::domain::ordering;

/// A member to add; any client-sent position is ignored
#[derive(Debug, Deserialize)]
pub struct NewMemberRequest {
    pub name: String,
}

/// Either a single member or a list of members
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NewMembers {
    Many(Vec<NewMemberRequest>),
    One(NewMemberRequest),
}

#[derive(Debug, Deserialize)]
pub struct AddMembersRequest {
    pub members: NewMembers,
}

#[derive(Debug, Deserialize)]
pub struct SwapMembersRequest {
    pub first: Uuid,
    pub second: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub id: Uuid,
    pub position: i64,
}

#[derive(Debug, Deserialize)]
pub struct RepositionMembersRequest {
    pub members: Vec<PositionRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePositionRequest {
    pub position: i64,
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: Uuid,
    pub name: String,
    pub position: u32,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id(),
            name: member.name().to_string(),
            position: member.position(),
        }
    }
}

fn respond(members: &[Member]) -> Json<Vec<MemberResponse>> {
    Json(members.iter().map(MemberResponse::from).collect())
}

/// List a team's members in presentation order
///
/// GET /api/teams/:id/members
pub async fn list_members(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let Path(team_id) = path?;
    let (_, members) = load_roster(&state, team_id).await?;
    Ok(respond(&members))
}

/// Append one or more members to the end of the rotation
///
/// POST /api/teams/:id/members
pub async fn add_members(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AddMembersRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<MemberResponse>>), ApiError> {
    let Path(team_id) = path?;
    let Json(req) = payload?;
    let (_, members) = load_roster(&state, team_id).await?;
    let existing = members.len();

    let names: Vec<NewMemberRequest> = match req.members {
        NewMembers::Many(many) => many,
        NewMembers::One(one) => vec![one],
    };
    let mut updated = members;
    for new_member in &names {
        updated = ordering::append(&updated, &new_member.name)?;
    }

    let added = &updated[existing..];
    match added {
        [] => {}
        [single] => state.roster.create_member(team_id, single).await?,
        many => state.roster.create_members(team_id, many).await?,
    }
    tracing::info!(team_id = %team_id, added = added.len(), "Members added");

    Ok((StatusCode::CREATED, respond(&updated)))
}

/// Remove a member and close the gap it leaves
///
/// DELETE /api/teams/:id/members/:member_id
pub async fn remove_member(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let Path((team_id, member_id)) = path?;
    let (_, members) = load_roster(&state, team_id).await?;
    let updated = ordering::remove(&members, member_id)?;

    state
        .roster
        .remove_member(member_id, &ordering::positions(&updated))
        .await?;
    tracing::info!(team_id = %team_id, member_id = %member_id, "Member removed");

    Ok(respond(&updated))
}

/// Swap two members' turns
///
/// POST /api/teams/:id/members/swap
pub async fn swap_members(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<SwapMembersRequest>, JsonRejection>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let Path(team_id) = path?;
    let Json(req) = payload?;
    let (_, members) = load_roster(&state, team_id).await?;
    let updated = ordering::swap(&members, req.first, req.second)?;

    state
        .roster
        .bulk_update_positions(&ordering::positions(&updated))
        .await?;
    tracing::info!(
        team_id = %team_id,
        first = %req.first,
        second = %req.second,
        "Members swapped"
    );

    Ok(respond(&updated))
}

/// Apply a batch of explicit positions, all or nothing
///
/// The caller is responsible for keeping positions dense.
///
/// PATCH /api/teams/:id/members/positions
pub async fn reposition_members(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RepositionMembersRequest>, JsonRejection>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let Path(team_id) = path?;
    let Json(req) = payload?;
    let assignments = req
        .members
        .iter()
        .map(|m| PositionAssignment::checked(m.id, m.position))
        .collect::<Result<Vec<_>, _>>()?;

    let (_, members) = load_roster(&state, team_id).await?;
    let updated = ordering::bulk_reposition(&members, &assignments)?;

    state.roster.bulk_update_positions(&assignments).await?;
    if !ordering::is_contiguous(&updated) {
        tracing::warn!(team_id = %team_id, "Positions are no longer contiguous");
    }
    tracing::info!(team_id = %team_id, count = assignments.len(), "Members repositioned");

    Ok(respond(&updated))
}

/// Move a single member to an explicit position
///
/// PATCH /api/teams/:id/members/:member_id
pub async fn update_member_position(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    payload: Result<Json<UpdatePositionRequest>, JsonRejection>,
) -> Result<Json<MemberResponse>, ApiError> {
    let Path((team_id, member_id)) = path?;
    let Json(req) = payload?;
    let assignment = PositionAssignment::checked(member_id, req.position)?;

    let (_, members) = load_roster(&state, team_id).await?;
    let updated = ordering::bulk_reposition(&members, &[assignment])?;

    state
        .roster
        .update_member_position(member_id, assignment.position)
        .await?;

    let member = updated
        .iter()
        .find(|m| m.id() == member_id)
        .map(MemberResponse::from)
        .ok_or_else(|| ApiError::not_found(format!("Member not found: {}", member_id)))?;

    Ok(Json(member))
}
