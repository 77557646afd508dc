use thiserror::Error;
use uuid::Uuid;

/// Smallest roster a team may shrink to
pub const MINIMUM_MEMBERS: usize = 2;

/// Errors raised by the rotation and ordering rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("A team needs at least {minimum} members")]
    MinimumMembers { minimum: usize },

    #[error("Cannot pick a presenter from an empty member list")]
    EmptyList,
}

impl RosterError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn member_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "Member",
            id,
        }
    }

    pub fn team_not_found(id: Uuid) -> Self {
        Self::NotFound { entity: "Team", id }
    }
}

pub type RosterResult<T> = Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let id = Uuid::new_v4();
        let err = RosterError::member_not_found(id);

        assert_eq!(err.to_string(), format!("Member not found: {}", id));
    }

    #[test]
    fn minimum_members_message() {
        let err = RosterError::MinimumMembers {
            minimum: MINIMUM_MEMBERS,
        };

        assert_eq!(err.to_string(), "A team needs at least 2 members");
    }
}
