//! Weekly presenter rotation
//!
//! Week numbers count 7-day spans from 1970-01-01. That date is a Thursday,
//! so each span runs Thursday through Wednesday. The presenter of a week is
//! the member at index `week mod N` of the position-ordered list.

use chrono::{Datelike, Days, NaiveDate, Utc};

use super::errors::{RosterError, RosterResult};
use super::member::Member;
use super::team::PresentationDay;

const DAYS_PER_WEEK: i64 = 7;

fn epoch() -> NaiveDate {
    NaiveDate::default()
}

/// Returns the week number for today's date (UTC)
pub fn current_week_number() -> i64 {
    week_number_for(Utc::now().date_naive())
}

/// Returns the week number containing `date`
///
/// Dates before the epoch give negative week numbers.
pub fn week_number_for(date: NaiveDate) -> i64 {
    (date - epoch()).num_days().div_euclid(DAYS_PER_WEEK)
}

/// Returns the date inside `week` that falls on `day`
///
/// # Returns
/// * `Err(RosterError::Validation)` - If the week lies outside chrono's calendar
///
/// # Example
/// ```
/// use chrono::{Datelike, Weekday};
/// use presenter_rotation_api::domain::rotation::{week_number_for, week_start_date};
/// use presenter_rotation_api::domain::team::PresentationDay;
///
/// let monday = PresentationDay::new(1).unwrap();
/// let date = week_start_date(0, monday).unwrap();
///
/// assert_eq!(date.weekday(), Weekday::Mon);
/// assert_eq!(week_number_for(date), 0);
/// ```
pub fn week_start_date(week: i64, day: PresentationDay) -> RosterResult<NaiveDate> {
    let out_of_range = || RosterError::validation(format!("Week out of range: {}", week));

    let span_start = week
        .checked_mul(DAYS_PER_WEEK)
        .and_then(|days| shift(epoch(), days))
        .ok_or_else(out_of_range)?;
    let target = i64::from(day.weekday().num_days_from_sunday());
    let current = i64::from(span_start.weekday().num_days_from_sunday());

    shift(span_start, (target - current).rem_euclid(DAYS_PER_WEEK)).ok_or_else(out_of_range)
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

/// Picks the presenter for `week` from a position-ordered member list
///
/// # Returns
/// * `Err(RosterError::EmptyList)` - If `members` is empty
pub fn presenter_for_week(members: &[Member], week: i64) -> RosterResult<&Member> {
    if members.is_empty() {
        return Err(RosterError::EmptyList);
    }

    let len = members.len() as i64;
    let index = week.rem_euclid(len) as usize;
    Ok(&members[index])
}

/// One week of the rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledPresentation<'a> {
    pub week: i64,
    pub date: NaiveDate,
    pub presenter: &'a Member,
}

/// Builds the rotation for `count` consecutive weeks starting at `from_week`
pub fn schedule(
    members: &[Member],
    day: PresentationDay,
    from_week: i64,
    count: usize,
) -> RosterResult<Vec<ScheduledPresentation<'_>>> {
    if members.is_empty() {
        return Err(RosterError::EmptyList);
    }

    (0..count)
        .map(|offset| {
            let week = i64::try_from(offset)
                .ok()
                .and_then(|offset| from_week.checked_add(offset))
                .ok_or_else(|| RosterError::validation("Week out of range"))?;
            Ok(ScheduledPresentation {
                week,
                date: week_start_date(week, day)?,
                presenter: presenter_for_week(members, week)?,
            })
        })
        .collect()
}
