use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::member::{Member, PositionAssignment};
use crate::domain::team::{PresentationDay, Team};

/// Errors surfaced by roster storage backends
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
}

impl RepositoryError {
    pub fn team_not_found(id: Uuid) -> Self {
        Self::NotFound { entity: "Team", id }
    }

    pub fn member_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity: "Member",
            id,
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository trait for teams and their ordered members
///
/// The one storage seam of the service. Rotation and ordering logic never
/// touch a backend directly; handlers load members through this trait, run
/// the pure operations, and write the canonical order back.
///
/// Multi-row writes (`create_team`, `create_members`, `remove_member`,
/// `bulk_update_positions`) must be atomic.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Persist a new team with its initial members
    async fn create_team(&self, team: &Team, members: &[Member]) -> RepositoryResult<()>;

    /// Find a team by its ID
    async fn find_team(&self, id: Uuid) -> RepositoryResult<Option<Team>>;

    /// Change a team's presentation day
    async fn update_presentation_day(&self, id: Uuid, day: PresentationDay)
        -> RepositoryResult<()>;

    /// Delete a team and, with it, all of its members
    async fn delete_team(&self, id: Uuid) -> RepositoryResult<()>;

    /// Add one member to a team
    async fn create_member(&self, team_id: Uuid, member: &Member) -> RepositoryResult<()>;

    /// Add several members to a team
    async fn create_members(&self, team_id: Uuid, members: &[Member]) -> RepositoryResult<()>;

    /// List a team's members ordered by position
    async fn list_members(&self, team_id: Uuid) -> RepositoryResult<Vec<Member>>;

    /// Move a single member to `position`
    async fn update_member_position(&self, id: Uuid, position: u32) -> RepositoryResult<()>;

    /// Delete a single member
    async fn delete_member(&self, id: Uuid) -> RepositoryResult<()>;

    /// Delete a member and write the compacted positions of the survivors
    ///
    /// Either both the deletion and every assignment are applied, or nothing is.
    async fn remove_member(
        &self,
        id: Uuid,
        compacted: &[PositionAssignment],
    ) -> RepositoryResult<()>;

    /// Apply every assignment or none of them
    async fn bulk_update_positions(
        &self,
        assignments: &[PositionAssignment],
    ) -> RepositoryResult<()>;
}
