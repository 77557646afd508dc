use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::domain::member::{Member, PositionAssignment};
use crate::domain::repositories::{RepositoryError, RepositoryResult, RosterRepository};
use crate::domain::team::{PresentationDay, Team};

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    presentation_day: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<TeamRow> for Team {
    type Error = RepositoryError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        let day = PresentationDay::try_from(row.presentation_day)
            .map_err(|e| RepositoryError::CorruptRecord(format!("team {}: {}", row.id, e)))?;

        Ok(Team::from_persistence(row.id, day, row.created_at))
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    name: String,
    position: i64,
}

impl TryFrom<MemberRow> for Member {
    type Error = RepositoryError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let position = u32::try_from(row.position).map_err(|_| {
            RepositoryError::CorruptRecord(format!(
                "member {} has position {}",
                row.id, row.position
            ))
        })?;

        Ok(Member::from_persistence(row.id, row.name, position))
    }
}

/// SQLite implementation of RosterRepository
///
/// Multi-row writes run inside a single transaction so a failed batch
/// leaves no partial update behind.
pub struct SqliteRosterRepository {
    pool: SqlitePool,
}

impl SqliteRosterRepository {
    /// Creates a new SqliteRosterRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool with migrations already applied
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn insert_member(
        conn: &mut SqliteConnection,
        team_id: Uuid,
        member: &Member,
    ) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO team_members (id, team_id, name, position, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(member.id())
        .bind(team_id)
        .bind(member.name())
        .bind(i64::from(member.position()))
        .bind(Utc::now())
        .execute(conn)
        .await?;

        Ok(())
    }

    async fn apply_positions(
        conn: &mut SqliteConnection,
        assignments: &[PositionAssignment],
    ) -> RepositoryResult<()> {
        for assignment in assignments {
            let result = sqlx::query("UPDATE team_members SET position = ? WHERE id = ?")
                .bind(i64::from(assignment.position))
                .bind(assignment.member_id)
                .execute(&mut *conn)
                .await?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::member_not_found(assignment.member_id));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl RosterRepository for SqliteRosterRepository {
    async fn create_team(&self, team: &Team, members: &[Member]) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO teams (id, presentation_day, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(team.id())
        .bind(i64::from(team.presentation_day().value()))
        .bind(team.created_at())
        .execute(&mut *tx)
        .await?;

        for member in members {
            Self::insert_member(&mut tx, team.id(), member).await?;
        }

        tx.commit().await?;
        tracing::debug!(team_id = %team.id(), members = members.len(), "Team stored");
        Ok(())
    }

    async fn find_team(&self, id: Uuid) -> RepositoryResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, presentation_day, created_at
            FROM teams
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Team::try_from).transpose()
    }

    async fn update_presentation_day(
        &self,
        id: Uuid,
        day: PresentationDay,
    ) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE teams SET presentation_day = ? WHERE id = ?")
            .bind(i64::from(day.value()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::team_not_found(id));
        }

        Ok(())
    }

    async fn delete_team(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::team_not_found(id));
        }

        Ok(())
    }

    async fn create_member(&self, team_id: Uuid, member: &Member) -> RepositoryResult<()> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_member(&mut conn, team_id, member).await
    }

    async fn create_members(&self, team_id: Uuid, members: &[Member]) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        for member in members {
            Self::insert_member(&mut tx, team_id, member).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_members(&self, team_id: Uuid) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT id, name, position
            FROM team_members
            WHERE team_id = ?
            ORDER BY position, created_at
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Member::try_from).collect()
    }

    async fn update_member_position(&self, id: Uuid, position: u32) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE team_members SET position = ? WHERE id = ?")
            .bind(i64::from(position))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::member_not_found(id));
        }

        Ok(())
    }

    async fn delete_member(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::member_not_found(id));
        }

        Ok(())
    }

    async fn remove_member(
        &self,
        id: Uuid,
        compacted: &[PositionAssignment],
    ) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM team_members WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(RepositoryError::member_not_found(id));
        }

        if let Err(err) = Self::apply_positions(&mut tx, compacted).await {
            tx.rollback().await?;
            return Err(err);
        }

        tx.commit().await?;
        tracing::debug!(member_id = %id, remaining = compacted.len(), "Member removed");
        Ok(())
    }

    async fn bulk_update_positions(
        &self,
        assignments: &[PositionAssignment],
    ) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        if let Err(err) = Self::apply_positions(&mut tx, assignments).await {
            tx.rollback().await?;
            return Err(err);
        }

        tx.commit().await?;
        Ok(())
    }
}
