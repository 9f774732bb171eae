//! PostgreSQL implementation of TrackerStore.
//!
//! Each `begin` opens a database transaction; both repositories run their
//! queries on it. Title and version uniqueness is enforced by the partial
//! unique indexes in `migrations/`, and violations are reported back as
//! `DuplicateTitle` / `DuplicateVersion`.
//!
//! Lookups by id take `FOR UPDATE` row locks, so a load-check-write sequence
//! holds its rows until commit and concurrent writers to the same milestone
//! or release queue behind it. Serialization failures and deadlocks come
//! back as `ConcurrentModification`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Postgres, Row, Transaction};

use crate::domain::foundation::{
    DomainError, ErrorCode, GroupId, MilestoneId, ProjectId, ReleaseId, Scope, Timestamp,
};
use crate::domain::milestone::{Milestone, MilestoneState};
use crate::domain::release::Release;
use crate::ports::{
    MilestoneFilter, MilestoneRepository, ReleaseFilter, ReleaseRepository, TrackerStore,
    TrackerTransaction,
};

/// SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATEs for serialization_failure and deadlock_detected.
const CONFLICT_STATES: [&str; 2] = ["40001", "40P01"];

const MILESTONE_COLUMNS: &str = "id, title, description, start_date, due_date, state, \
     project_id, group_id, created_at, updated_at";

const RELEASE_COLUMNS: &str = "id, version, description, release_date, project_id, group_id, \
     milestone_id, created_at, updated_at";

/// PostgreSQL implementation of TrackerStore.
#[derive(Clone)]
pub struct PostgresTrackerStore {
    pool: PgPool,
}

impl PostgresTrackerStore {
    /// Creates a new PostgresTrackerStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackerStore for PostgresTrackerStore {
    async fn begin(&self) -> Result<Box<dyn TrackerTransaction>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("Failed to begin transaction", e))?;
        Ok(Box::new(PostgresTransaction { tx: Some(tx) }))
    }
}

/// An open database transaction. Dropping it uncommitted rolls back.
pub struct PostgresTransaction {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PostgresTransaction {
    fn conn(&mut self) -> Result<&mut PgConnection, DomainError> {
        self.tx.as_deref_mut().ok_or_else(|| {
            DomainError::new(ErrorCode::DatabaseError, "Transaction already committed")
        })
    }
}

#[async_trait]
impl MilestoneRepository for PostgresTransaction {
    async fn find_milestone(&mut self, id: &MilestoneId) -> Result<Option<Milestone>, DomainError> {
        let sql = format!("SELECT {} FROM milestones WHERE id = $1 FOR UPDATE", MILESTONE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(self.conn()?)
            .await
            .map_err(|e| query_error("Failed to fetch milestone", e))?;

        row.map(row_to_milestone).transpose()
    }

    async fn find_milestone_by_title(
        &mut self,
        title: &str,
        scope: &Scope,
    ) -> Result<Option<Milestone>, DomainError> {
        let sql = format!(
            "SELECT {} FROM milestones \
             WHERE title = $1 \
               AND project_id IS NOT DISTINCT FROM $2 \
               AND group_id IS NOT DISTINCT FROM $3",
            MILESTONE_COLUMNS
        );
        let (project_id, group_id) = scope_columns(scope);
        let row = sqlx::query(&sql)
            .bind(title)
            .bind(project_id)
            .bind(group_id)
            .fetch_optional(self.conn()?)
            .await
            .map_err(|e| query_error("Failed to fetch milestone by title", e))?;

        row.map(row_to_milestone).transpose()
    }

    async fn save_milestone(&mut self, milestone: &Milestone) -> Result<(), DomainError> {
        let (project_id, group_id) = scope_columns(&milestone.scope());
        sqlx::query(
            r#"
            INSERT INTO milestones (
                id, title, description, start_date, due_date, state,
                project_id, group_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                start_date = EXCLUDED.start_date,
                due_date = EXCLUDED.due_date,
                state = EXCLUDED.state,
                project_id = EXCLUDED.project_id,
                group_id = EXCLUDED.group_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(milestone.id().as_uuid())
        .bind(milestone.title())
        .bind(milestone.description())
        .bind(milestone.start_date())
        .bind(milestone.due_date())
        .bind(milestone.state().as_str())
        .bind(project_id)
        .bind(group_id)
        .bind(milestone.created_at().as_datetime())
        .bind(milestone.updated_at().as_datetime())
        .execute(self.conn()?)
        .await
        .map_err(|e| {
            write_error(e, "save milestone", || {
                DomainError::new(
                    ErrorCode::DuplicateTitle,
                    "Milestone title must be unique within its scope",
                )
                .with_detail("title", milestone.title())
                .with_detail("scope", milestone.scope().to_string())
            })
        })?;

        Ok(())
    }

    async fn delete_milestone(&mut self, id: &MilestoneId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.conn()?)
            .await
            .map_err(|e| query_error("Failed to delete milestone", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_milestones(
        &mut self,
        filter: &MilestoneFilter,
    ) -> Result<Vec<Milestone>, DomainError> {
        let sql = format!(
            "SELECT {} FROM milestones \
             WHERE (NOT $1 OR (project_id IS NOT DISTINCT FROM $2 AND group_id IS NOT DISTINCT FROM $3)) \
               AND ($4::VARCHAR IS NULL OR state = $4) \
             ORDER BY created_at ASC, id ASC",
            MILESTONE_COLUMNS
        );
        let (project_id, group_id) = filter.scope.as_ref().map(scope_columns).unwrap_or_default();
        let rows = sqlx::query(&sql)
            .bind(filter.scope.is_some())
            .bind(project_id)
            .bind(group_id)
            .bind(filter.state.map(|s| s.as_str()))
            .fetch_all(self.conn()?)
            .await
            .map_err(|e| query_error("Failed to list milestones", e))?;

        rows.into_iter().map(row_to_milestone).collect()
    }
}

#[async_trait]
impl ReleaseRepository for PostgresTransaction {
    async fn find_release(&mut self, id: &ReleaseId) -> Result<Option<Release>, DomainError> {
        let sql = format!("SELECT {} FROM releases WHERE id = $1 FOR UPDATE", RELEASE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(self.conn()?)
            .await
            .map_err(|e| query_error("Failed to fetch release", e))?;

        row.map(row_to_release).transpose()
    }

    async fn find_release_by_version(
        &mut self,
        version: &str,
        scope: &Scope,
    ) -> Result<Option<Release>, DomainError> {
        let sql = format!(
            "SELECT {} FROM releases \
             WHERE version = $1 \
               AND project_id IS NOT DISTINCT FROM $2 \
               AND group_id IS NOT DISTINCT FROM $3",
            RELEASE_COLUMNS
        );
        let (project_id, group_id) = scope_columns(scope);
        let row = sqlx::query(&sql)
            .bind(version)
            .bind(project_id)
            .bind(group_id)
            .fetch_optional(self.conn()?)
            .await
            .map_err(|e| query_error("Failed to fetch release by version", e))?;

        row.map(row_to_release).transpose()
    }

    async fn save_release(&mut self, release: &Release) -> Result<(), DomainError> {
        let (project_id, group_id) = scope_columns(&release.scope());
        sqlx::query(
            r#"
            INSERT INTO releases (
                id, version, description, release_date,
                project_id, group_id, milestone_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                version = EXCLUDED.version,
                description = EXCLUDED.description,
                release_date = EXCLUDED.release_date,
                project_id = EXCLUDED.project_id,
                group_id = EXCLUDED.group_id,
                milestone_id = EXCLUDED.milestone_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(release.id().as_uuid())
        .bind(release.version())
        .bind(release.description())
        .bind(release.release_date())
        .bind(project_id)
        .bind(group_id)
        .bind(release.milestone_id().map(|m| *m.as_uuid()))
        .bind(release.created_at().as_datetime())
        .bind(release.updated_at().as_datetime())
        .execute(self.conn()?)
        .await
        .map_err(|e| {
            write_error(e, "save release", || {
                DomainError::new(
                    ErrorCode::DuplicateVersion,
                    "Release version must be unique within its scope",
                )
                .with_detail("version", release.version())
                .with_detail("scope", release.scope().to_string())
            })
        })?;

        Ok(())
    }

    async fn delete_release(&mut self, id: &ReleaseId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM releases WHERE id = $1")
            .bind(id.as_uuid())
            .execute(self.conn()?)
            .await
            .map_err(|e| query_error("Failed to delete release", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_releases(&mut self, filter: &ReleaseFilter) -> Result<Vec<Release>, DomainError> {
        let sql = format!(
            "SELECT {} FROM releases \
             WHERE (NOT $1 OR (project_id IS NOT DISTINCT FROM $2 AND group_id IS NOT DISTINCT FROM $3)) \
               AND ($4::UUID IS NULL OR milestone_id = $4) \
             ORDER BY created_at ASC, id ASC",
            RELEASE_COLUMNS
        );
        let (project_id, group_id) = filter.scope.as_ref().map(scope_columns).unwrap_or_default();
        let rows = sqlx::query(&sql)
            .bind(filter.scope.is_some())
            .bind(project_id)
            .bind(group_id)
            .bind(filter.milestone_id.map(|m| *m.as_uuid()))
            .fetch_all(self.conn()?)
            .await
            .map_err(|e| query_error("Failed to list releases", e))?;

        rows.into_iter().map(row_to_release).collect()
    }

    async fn detach_releases(&mut self, milestone_id: &MilestoneId) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE releases SET milestone_id = NULL, updated_at = GREATEST(updated_at, $2) \
             WHERE milestone_id = $1",
        )
        .bind(milestone_id.as_uuid())
        .bind(Timestamp::now().as_datetime())
        .execute(self.conn()?)
        .await
        .map_err(|e| query_error("Failed to detach releases", e))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TrackerTransaction for PostgresTransaction {
    async fn commit(&mut self) -> Result<(), DomainError> {
        let tx = self.tx.take().ok_or_else(|| {
            DomainError::new(ErrorCode::DatabaseError, "Transaction already committed")
        })?;
        tx.commit()
            .await
            .map_err(|e| query_error("Failed to commit transaction", e))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

/// Maps a query failure, reporting lock conflicts as `ConcurrentModification`.
fn query_error(context: &str, err: sqlx::Error) -> DomainError {
    match sqlstate(&err) {
        Some(code) if CONFLICT_STATES.contains(&code.as_str()) => DomainError::new(
            ErrorCode::ConcurrentModification,
            format!("{}: {}", context, err),
        )
        .with_detail("sqlstate", code),
        _ => DomainError::database(context, err),
    }
}

/// Maps a write failure, turning unique violations into `on_unique()`.
fn write_error(
    err: sqlx::Error,
    operation: &str,
    on_unique: impl FnOnce() -> DomainError,
) -> DomainError {
    if sqlstate(&err).as_deref() == Some(UNIQUE_VIOLATION) {
        return on_unique();
    }
    query_error(&format!("Failed to {}", operation), err)
}

fn scope_columns(scope: &Scope) -> (Option<i64>, Option<i64>) {
    (
        scope.project_id().map(|p| p.value()),
        scope.group_id().map(|g| g.value()),
    )
}

fn scope_from_columns(project_id: Option<i64>, group_id: Option<i64>) -> Result<Scope, DomainError> {
    Scope::from_parts(project_id.map(ProjectId::new), group_id.map(GroupId::new)).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            "Row carries both project_id and group_id",
        )
    })
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}

fn row_to_milestone(row: PgRow) -> Result<Milestone, DomainError> {
    let state_str: String = column(&row, "state")?;
    let state: MilestoneState = state_str
        .parse()
        .map_err(|e| DomainError::database("Invalid milestone state", e))?;

    Ok(Milestone::reconstitute(
        MilestoneId::from_uuid(column(&row, "id")?),
        column(&row, "title")?,
        column(&row, "description")?,
        column(&row, "start_date")?,
        column(&row, "due_date")?,
        state,
        scope_from_columns(column(&row, "project_id")?, column(&row, "group_id")?)?,
        Timestamp::from_datetime(column(&row, "created_at")?),
        Timestamp::from_datetime(column(&row, "updated_at")?),
    ))
}

fn row_to_release(row: PgRow) -> Result<Release, DomainError> {
    let milestone_id: Option<uuid::Uuid> = column(&row, "milestone_id")?;

    Ok(Release::reconstitute(
        ReleaseId::from_uuid(column(&row, "id")?),
        column(&row, "version")?,
        column(&row, "description")?,
        column(&row, "release_date")?,
        scope_from_columns(column(&row, "project_id")?, column(&row, "group_id")?)?,
        milestone_id.map(MilestoneId::from_uuid),
        Timestamp::from_datetime(column(&row, "created_at")?),
        Timestamp::from_datetime(column(&row, "updated_at")?),
    ))
}
