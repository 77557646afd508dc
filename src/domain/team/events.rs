use uuid::Uuid;

use super::value_objects::PresentationDay;

/// Domain events that occur within the Team aggregate
///
/// The API layer logs them as they are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamEvent {
    /// Fired when a team is created with its initial members
    Created {
        team_id: Uuid,
        presentation_day: PresentationDay,
        member_count: usize,
    },
    /// Fired when the team moves its presentation to another weekday
    PresentationDayChanged {
        team_id: Uuid,
        from: PresentationDay,
        to: PresentationDay,
    },
}

impl TeamEvent {
    /// Returns the team_id for this event
    pub fn team_id(&self) -> Uuid {
        match self {
            TeamEvent::Created { team_id, .. } => *team_id,
            TeamEvent::PresentationDayChanged { team_id, .. } => *team_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_id_is_exposed_for_every_event() {
        let team_id = Uuid::new_v4();
        let monday = PresentationDay::new(1).unwrap();
        let friday = PresentationDay::new(5).unwrap();

        let created = TeamEvent::Created {
            team_id,
            presentation_day: monday,
            member_count: 2,
        };
        let changed = TeamEvent::PresentationDayChanged {
            team_id,
            from: monday,
            to: friday,
        };

        assert_eq!(created.team_id(), team_id);
        assert_eq!(changed.team_id(), team_id);
    }
}
