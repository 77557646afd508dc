use uuid::Uuid;

use super::errors::{RosterError, RosterResult};

/// A team member taking part in the presentation rotation
///
/// `position` is the only ordering key. Within a team positions form the
/// dense sequence `0..N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: Uuid,
    name: String,
    position: u32,
}

impl Member {
    /// Creates a member with a fresh id
    ///
    /// # Returns
    /// * `Err(RosterError::Validation)` - If the name is blank
    ///
    /// # Example
    /// ```
    /// use presenter_rotation_api::domain::member::Member;
    ///
    /// let member = Member::new("  Alice ", 0).expect("valid member");
    /// assert_eq!(member.name(), "Alice");
    /// assert_eq!(member.position(), 0);
    /// ```
    pub fn new(name: impl AsRef<str>, position: u32) -> RosterResult<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(RosterError::validation("Member name cannot be empty"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            position,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    /// Returns a copy of this member placed at `position`
    pub fn at_position(&self, position: u32) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Reconstructs a Member from persistence layer data
    ///
    /// Only to be used by repository implementations.
    pub fn from_persistence(id: Uuid, name: String, position: u32) -> Self {
        Self { id, name, position }
    }
}

/// A single `(member, new position)` pair of a bulk reposition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionAssignment {
    pub member_id: Uuid,
    pub position: u32,
}

impl PositionAssignment {
    pub fn new(member_id: Uuid, position: u32) -> Self {
        Self {
            member_id,
            position,
        }
    }

    /// Validates a raw position coming from outside the domain
    pub fn checked(member_id: Uuid, position: i64) -> RosterResult<Self> {
        u32::try_from(position)
            .map(|position| Self::new(member_id, position))
            .map_err(|_| RosterError::validation(format!("Invalid position: {}", position)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let result = Member::new("   ", 0);

        assert!(matches!(result, Err(RosterError::Validation(_))));
    }

    #[test]
    fn at_position_keeps_identity() {
        let member = Member::new("Alice", 0).unwrap();
        let moved = member.at_position(3);

        assert_eq!(moved.id(), member.id());
        assert_eq!(moved.name(), "Alice");
        assert_eq!(moved.position(), 3);
    }

    #[test]
    fn negative_position_is_rejected() {
        let result = PositionAssignment::checked(Uuid::new_v4(), -1);

        assert!(matches!(result, Err(RosterError::Validation(_))));
    }

    #[test]
    fn oversized_position_is_rejected() {
        let result = PositionAssignment::checked(Uuid::new_v4(), i64::from(u32::MAX) + 1);

        assert!(result.is_err());
    }
}
