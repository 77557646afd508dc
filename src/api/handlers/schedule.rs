use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::load_roster;
use super::members::MemberResponse;
use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::errors::RosterError;
use crate::domain::rotation::{self, ScheduledPresentation};
use crate::domain::team::PresentationDay;

const DEFAULT_UPCOMING_WEEKS: usize = 5;
const MAX_UPCOMING_WEEKS: usize = 52;
// Keeps every derived date well inside chrono's calendar range
const MAX_WEEK_MAGNITUDE: i64 = 1_000_000;

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    /// Number of weeks to list after the current one
    pub weeks: Option<usize>,
    /// Week to treat as current; defaults to this week
    pub from_week: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub week: i64,
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub presenter: MemberResponse,
}

impl WeekResponse {
    fn new(entry: &ScheduledPresentation<'_>, day: PresentationDay) -> Self {
        Self {
            week: entry.week,
            date: entry.date,
            weekday: day.name(),
            presenter: MemberResponse::from(entry.presenter),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub team_id: Uuid,
    pub presentation_day: PresentationDay,
    pub current: WeekResponse,
    pub upcoming: Vec<WeekResponse>,
}

/// Who presents this week and in the following weeks
///
/// GET /api/teams/:id/schedule?weeks=5&from_week=2900
pub async fn get_schedule(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let Path(team_id) = path?;
    let Query(query) = query?;
    let upcoming = query.weeks.unwrap_or(DEFAULT_UPCOMING_WEEKS);
    if upcoming > MAX_UPCOMING_WEEKS {
        return Err(RosterError::validation(format!(
            "weeks must be at most {}",
            MAX_UPCOMING_WEEKS
        ))
        .into());
    }
    let from_week = query.from_week.unwrap_or_else(rotation::current_week_number);
    if !(-MAX_WEEK_MAGNITUDE..=MAX_WEEK_MAGNITUDE).contains(&from_week) {
        return Err(RosterError::validation(format!("from_week out of range: {}", from_week)).into());
    }

    let (team, members) = load_roster(&state, team_id).await?;
    let day = team.presentation_day();
    let entries = rotation::schedule(&members, day, from_week, upcoming + 1)?;

    let mut weeks = entries.iter().map(|entry| WeekResponse::new(entry, day));
    let current = weeks.next().ok_or(RosterError::EmptyList)?;

    Ok(Json(ScheduleResponse {
        team_id,
        presentation_day: day,
        current,
        upcoming: weeks.collect(),
    }))
}
