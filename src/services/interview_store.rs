use chrono::Utc;
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::interview::{InterviewPatch, InterviewRecord, InterviewRow, NewInterview};

/// Durable home of interview records. The service only ever loads everything,
/// creates one record, or merges fields into one record.
pub trait InterviewStore: Send + Sync + 'static {
    /// Every record, deleted or not, newest interview date first.
    fn load_all(&self) -> impl Future<Output = Result<Vec<InterviewRecord>>> + Send;

    /// Stores a new record and returns its id. Unset timestamps become now.
    fn create(&self, interview: NewInterview) -> impl Future<Output = Result<Uuid>> + Send;

    /// Merges `patch` into the record. The caller owns `updated_at`.
    fn update_by_id(&self, id: Uuid, patch: InterviewPatch) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Clone)]
pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl InterviewStore for PgInterviewStore {
    async fn load_all(&self) -> Result<Vec<InterviewRecord>> {
        let rows = sqlx::query_as::<_, InterviewRow>(
            r#"
            SELECT id, candidate_name, position_applied, interview_date, status, notes,
                   created_at, updated_at, deleted, deleted_at, restored_at
            FROM interviews
            ORDER BY interview_date DESC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(InterviewRecord::from).collect())
    }

    async fn create(&self, interview: NewInterview) -> Result<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO interviews (
                id, candidate_name, position_applied, interview_date, status, notes,
                created_at, updated_at, deleted
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                COALESCE($7, NOW()), COALESCE($8, NOW()), FALSE
            )
            "#,
        )
        .bind(id)
        .bind(&interview.candidate_name)
        .bind(&interview.position_applied)
        .bind(interview.interview_date)
        .bind(interview.status.map(|status| status.label()))
        .bind(&interview.notes)
        .bind(interview.created_at)
        .bind(interview.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_by_id(&self, id: Uuid, patch: InterviewPatch) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE interviews
            SET
                candidate_name = COALESCE($2, candidate_name),
                position_applied = COALESCE($3, position_applied),
                interview_date = COALESCE($4, interview_date),
                status = COALESCE($5, status),
                notes = COALESCE($6, notes),
                updated_at = COALESCE($7, updated_at),
                deleted = COALESCE($8, deleted),
                deleted_at = COALESCE($9, deleted_at),
                restored_at = COALESCE($10, restored_at)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&patch.candidate_name)
        .bind(&patch.position_applied)
        .bind(patch.interview_date)
        .bind(patch.status.map(|status| status.label()))
        .bind(&patch.notes)
        .bind(patch.updated_at)
        .bind(patch.deleted)
        .bind(patch.deleted_at)
        .bind(patch.restored_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Interview {} not found", id)));
        }
        Ok(())
    }
}

/// Process-local store used when no database is configured, and by tests.
#[derive(Clone, Default)]
pub struct MemoryInterviewStore {
    records: Arc<RwLock<Vec<InterviewRecord>>>,
}

impl MemoryInterviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with records as they would come back from storage,
    /// partial fields included.
    pub fn with_records(records: Vec<InterviewRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl InterviewStore for MemoryInterviewStore {
    async fn load_all(&self) -> Result<Vec<InterviewRecord>> {
        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.interview_date.cmp(&a.interview_date));
        Ok(records)
    }

    async fn create(&self, interview: NewInterview) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let record = interview.into_record(id, Utc::now());
        self.records.write().await.push(record);
        Ok(id)
    }

    async fn update_by_id(&self, id: Uuid, patch: InterviewPatch) -> Result<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| Error::NotFound(format!("Interview {} not found", id)))?;
        patch.apply_to(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::InterviewStatus;
    use chrono::NaiveDate;

    fn new_interview(name: &str, date: Option<NaiveDate>) -> NewInterview {
        NewInterview {
            candidate_name: name.to_string(),
            position_applied: Some("Manager".into()),
            interview_date: date,
            status: Some(InterviewStatus::Scheduled),
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn memory_store_stamps_missing_timestamps() {
        let store = MemoryInterviewStore::new();
        let id = store.create(new_interview("Ira", None)).await.unwrap();
        let records = store.load_all().await.unwrap();
        let stored = records.iter().find(|r| r.id == id).unwrap();
        assert!(stored.created_at.is_some());
        assert_eq!(stored.created_at, stored.updated_at);
        assert!(!stored.deleted);
    }

    #[tokio::test]
    async fn memory_store_loads_newest_interview_first() {
        let store = MemoryInterviewStore::new();
        store.create(new_interview("Old", NaiveDate::from_ymd_opt(2026, 1, 1))).await.unwrap();
        store.create(new_interview("New", NaiveDate::from_ymd_opt(2026, 6, 1))).await.unwrap();
        let names: Vec<String> = store
            .load_all()
            .await
            .unwrap()
            .iter()
            .map(|r| r.name_text().to_string())
            .collect();
        assert_eq!(names, ["New", "Old"]);
    }

    #[tokio::test]
    async fn memory_store_rejects_unknown_ids() {
        let store = MemoryInterviewStore::new();
        let err = store
            .update_by_id(Uuid::new_v4(), InterviewPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
