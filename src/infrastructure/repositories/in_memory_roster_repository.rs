use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::member::{Member, PositionAssignment};
use crate::domain::repositories::{RepositoryError, RepositoryResult, RosterRepository};
use crate::domain::team::{PresentationDay, Team};

struct StoredMember {
    team_id: Uuid,
    member: Member,
    // Insertion counter, breaks position ties the way created_at does in SQL
    sequence: u64,
}

#[derive(Default)]
struct RosterState {
    teams: HashMap<Uuid, Team>,
    members: HashMap<Uuid, StoredMember>,
    next_sequence: u64,
}

impl RosterState {
    fn insert_member(&mut self, team_id: Uuid, member: &Member) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.members.insert(
            member.id(),
            StoredMember {
                team_id,
                member: member.clone(),
                sequence,
            },
        );
    }

    fn require_members<'a>(
        &self,
        mut ids: impl Iterator<Item = &'a Uuid>,
    ) -> RepositoryResult<()> {
        match ids.find(|id| !self.members.contains_key(id)) {
            Some(missing) => Err(RepositoryError::member_not_found(*missing)),
            None => Ok(()),
        }
    }

    fn apply_positions(&mut self, assignments: &[PositionAssignment]) {
        for assignment in assignments {
            if let Some(stored) = self.members.get_mut(&assignment.member_id) {
                stored.member = stored.member.at_position(assignment.position);
            }
        }
    }

    fn require_team(&self, id: Uuid) -> RepositoryResult<()> {
        if self.teams.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::team_not_found(id))
        }
    }
}

/// In-process implementation of RosterRepository
///
/// Each operation holds the lock for its whole duration, which makes every
/// batch atomic. Used by the API tests and for running without a database.
#[derive(Default)]
pub struct InMemoryRosterRepository {
    state: RwLock<RosterState>,
}

impl InMemoryRosterRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn create_team(&self, team: &Team, members: &[Member]) -> RepositoryResult<()> {
        let mut state = self.state.write().await;
        state.teams.insert(team.id(), team.clone());
        for member in members {
            state.insert_member(team.id(), member);
        }
        Ok(())
    }

    async fn find_team(&self, id: Uuid) -> RepositoryResult<Option<Team>> {
        Ok(self.state.read().await.teams.get(&id).cloned())
    }

    async fn update_presentation_day(
        &self,
        id: Uuid,
        day: PresentationDay,
    ) -> RepositoryResult<()> {
        let mut state = self.state.write().await;
        let team = state
            .teams
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::team_not_found(id))?;
        team.change_presentation_day(day);
        Ok(())
    }

    async fn delete_team(&self, id: Uuid) -> RepositoryResult<()> {
        let mut state = self.state.write().await;
        if state.teams.remove(&id).is_none() {
            return Err(RepositoryError::team_not_found(id));
        }
        state.members.retain(|_, stored| stored.team_id != id);
        Ok(())
    }

    async fn create_member(&self, team_id: Uuid, member: &Member) -> RepositoryResult<()> {
        let mut state = self.state.write().await;
        state.require_team(team_id)?;
        state.insert_member(team_id, member);
        Ok(())
    }

    async fn create_members(&self, team_id: Uuid, members: &[Member]) -> RepositoryResult<()> {
        let mut state = self.state.write().await;
        state.require_team(team_id)?;
        for member in members {
            state.insert_member(team_id, member);
        }
        Ok(())
    }

    async fn list_members(&self, team_id: Uuid) -> RepositoryResult<Vec<Member>> {
        let state = self.state.read().await;
        let mut stored: Vec<&StoredMember> = state
            .members
            .values()
            .filter(|stored| stored.team_id == team_id)
            .collect();
        stored.sort_by_key(|stored| (stored.member.position(), stored.sequence));

        Ok(stored.into_iter().map(|s| s.member.clone()).collect())
    }

    async fn update_member_position(&self, id: Uuid, position: u32) -> RepositoryResult<()> {
        let mut state = self.state.write().await;
        let stored = state
            .members
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::member_not_found(id))?;
        stored.member = stored.member.at_position(position);
        Ok(())
    }

    async fn delete_member(&self, id: Uuid) -> RepositoryResult<()> {
        let mut state = self.state.write().await;
        state
            .members
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::member_not_found(id))
    }

    async fn remove_member(
        &self,
        id: Uuid,
        compacted: &[PositionAssignment],
    ) -> RepositoryResult<()> {
        let mut state = self.state.write().await;

        state.require_members(std::iter::once(&id))?;
        // The removed member cannot also be repositioned
        if let Some(stale) = compacted
            .iter()
            .find(|a| a.member_id == id || !state.members.contains_key(&a.member_id))
        {
            return Err(RepositoryError::member_not_found(stale.member_id));
        }

        state.members.remove(&id);
        state.apply_positions(compacted);
        Ok(())
    }

    async fn bulk_update_positions(
        &self,
        assignments: &[PositionAssignment],
    ) -> RepositoryResult<()> {
        let mut state = self.state.write().await;

        state.require_members(assignments.iter().map(|a| &a.member_id))?;
        state.apply_positions(assignments);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> (InMemoryRosterRepository, Team, Vec<Member>) {
        let repo = InMemoryRosterRepository::new();
        let (team, members, _) =
            Team::new(PresentationDay::new(2).unwrap(), &["Alice", "Bob", "Carol"]).unwrap();
        repo.create_team(&team, &members).await.unwrap();
        (repo, team, members)
    }

    #[tokio::test]
    async fn lists_members_in_position_order() {
        let (repo, team, members) = seeded().await;

        repo.update_member_position(members[0].id(), 5).await.unwrap();

        let listed = repo.list_members(team.id()).await.unwrap();
        let names: Vec<&str> = listed.iter().map(Member::name).collect();
        assert_eq!(names, vec!["Bob", "Carol", "Alice"]);
    }

    #[tokio::test]
    async fn bulk_update_with_unknown_member_changes_nothing() {
        let (repo, team, members) = seeded().await;

        let result = repo
            .bulk_update_positions(&[
                PositionAssignment::new(members[0].id(), 2),
                PositionAssignment::new(Uuid::new_v4(), 0),
            ])
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert_eq!(repo.list_members(team.id()).await.unwrap(), members);
    }

    #[tokio::test]
    async fn remove_member_compacts_survivors() {
        let (repo, team, members) = seeded().await;
        let compacted = [
            PositionAssignment::new(members[0].id(), 0),
            PositionAssignment::new(members[2].id(), 1),
        ];

        repo.remove_member(members[1].id(), &compacted).await.unwrap();

        let listed = repo.list_members(team.id()).await.unwrap();
        let summary: Vec<(&str, u32)> = listed.iter().map(|m| (m.name(), m.position())).collect();
        assert_eq!(summary, vec![("Alice", 0), ("Carol", 1)]);
    }

    #[tokio::test]
    async fn remove_member_with_failing_compaction_changes_nothing() {
        let (repo, team, members) = seeded().await;
        let unknown = Uuid::new_v4();

        let result = repo
            .remove_member(
                members[1].id(),
                &[
                    PositionAssignment::new(members[0].id(), 0),
                    PositionAssignment::new(unknown, 1),
                ],
            )
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::NotFound { id, .. }) if id == unknown
        ));
        assert_eq!(repo.list_members(team.id()).await.unwrap(), members);
    }

    #[tokio::test]
    async fn delete_team_cascades_to_members() {
        let (repo, team, _) = seeded().await;

        repo.delete_team(team.id()).await.unwrap();

        assert!(repo.find_team(team.id()).await.unwrap().is_none());
        assert!(repo.list_members(team.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_member_for_unknown_team_fails() {
        let repo = InMemoryRosterRepository::new();
        let member = Member::new("Alice", 0).unwrap();

        let result = repo.create_member(Uuid::new_v4(), &member).await;

        assert!(matches!(
            result,
            Err(RepositoryError::NotFound { entity: "Team", .. })
        ));
    }
}
