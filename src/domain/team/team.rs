use super::events::TeamEvent;
use super::value_objects::PresentationDay;
use crate::domain::errors::{RosterError, RosterResult, MINIMUM_MEMBERS};
use crate::domain::member::Member;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Team aggregate root
///
/// A team presents once a week on its presentation day. Members take turns
/// in position order.
///
/// # Invariants
/// - Created with at least two members
/// - Initial member positions are `0..N` in the order given
///
/// # Example
/// ```
/// use presenter_rotation_api::domain::team::{PresentationDay, Team};
///
/// let (team, members, events) = Team::new(
///     PresentationDay::new(1).unwrap(),
///     &["Alice", "Bob"],
/// ).expect("valid team");
///
/// assert_eq!(team.presentation_day().name(), "Monday");
/// assert_eq!(members[1].position(), 1);
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: Uuid,
    presentation_day: PresentationDay,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new Team aggregate together with its initial members
    ///
    /// # Returns
    /// * `Ok((Team, Vec<Member>, Vec<TeamEvent>))` - New team, its members and events
    /// * `Err(RosterError)` - If fewer than two names are given or a name is blank
    pub fn new<S: AsRef<str>>(
        presentation_day: PresentationDay,
        member_names: &[S],
    ) -> RosterResult<(Self, Vec<Member>, Vec<TeamEvent>)> {
        if member_names.len() < MINIMUM_MEMBERS {
            return Err(RosterError::MinimumMembers {
                minimum: MINIMUM_MEMBERS,
            });
        }

        let members = member_names
            .iter()
            .zip(0u32..)
            .map(|(name, position)| Member::new(name, position))
            .collect::<RosterResult<Vec<_>>>()?;

        let team = Self {
            id: Uuid::new_v4(),
            presentation_day,
            created_at: Utc::now(),
        };

        let events = vec![TeamEvent::Created {
            team_id: team.id,
            presentation_day,
            member_count: members.len(),
        }];

        Ok((team, members, events))
    }

    /// Moves the presentation to another weekday
    ///
    /// Returns `None` when `day` is already the presentation day.
    pub fn change_presentation_day(&mut self, day: PresentationDay) -> Option<TeamEvent> {
        if self.presentation_day == day {
            return None;
        }

        let from = self.presentation_day;
        self.presentation_day = day;

        Some(TeamEvent::PresentationDayChanged {
            team_id: self.id,
            from,
            to: day,
        })
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn presentation_day(&self) -> PresentationDay {
        self.presentation_day
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: Uuid,
        presentation_day: PresentationDay,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            presentation_day,
            created_at,
        }
    }
}
