use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::interview::{InterviewPatch, InterviewRecord, InterviewStatus, NewInterview};
use crate::services::export_service::ExportService;
use crate::services::interview_store::InterviewStore;
use crate::services::view_service::{analytics, derive_view, Analytics, ViewMode, ViewParams};
use crate::utils::time::Clock;

/// Answer to the "move this interview to deleted?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SoftDeleteOutcome {
    Deleted,
    Declined,
}

/// Derived table contents plus the counters shown above it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InterviewView {
    pub records: Vec<InterviewRecord>,
    pub analytics: Analytics,
    pub loading: bool,
}

/// Owns the in-memory interview set. Every read derives from the last
/// completed load; every successful mutation is followed by a full reload.
#[derive(Clone)]
pub struct InterviewService<S> {
    store: S,
    records: Arc<RwLock<Vec<InterviewRecord>>>,
    loads_in_flight: Arc<AtomicUsize>,
    clock: Arc<dyn Clock>,
}

struct LoadGuard<'a>(&'a AtomicUsize);

impl<'a> LoadGuard<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S: InterviewStore> InterviewService<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            records: Arc::new(RwLock::new(Vec::new())),
            loads_in_flight: Arc::new(AtomicUsize::new(0)),
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    pub fn is_loading(&self) -> bool {
        self.loads_in_flight.load(Ordering::SeqCst) > 0
    }

    /// Replaces the in-memory set with whatever storage holds now. On failure
    /// the previous set stays in place.
    pub async fn reload(&self) -> Result<usize> {
        let _guard = LoadGuard::start(&self.loads_in_flight);
        match self.store.load_all().await {
            Ok(records) => {
                let count = records.len();
                *self.records.write().await = records;
                tracing::info!(count, "Interviews loaded");
                Ok(count)
            }
            Err(e) => {
                tracing::error!(error = ?e, "Error loading interviews");
                Err(e)
            }
        }
    }

    pub async fn records(&self) -> Vec<InterviewRecord> {
        self.records.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Result<InterviewRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Interview {} not found", id)))
    }

    pub async fn view(&self, params: &ViewParams) -> InterviewView {
        let records = self.records.read().await;
        InterviewView {
            records: derive_view(&records, params).into_iter().cloned().collect(),
            analytics: analytics(&records, params.view_mode, self.clock.now().date_naive()),
            loading: self.is_loading(),
        }
    }

    pub async fn analytics(&self, view_mode: ViewMode) -> Analytics {
        let records = self.records.read().await;
        analytics(&records, view_mode, self.clock.now().date_naive())
    }

    pub async fn export_csv(&self, params: &ViewParams) -> Result<String> {
        let records = self.records.read().await;
        ExportService::generate_interviews_csv(&derive_view(&records, params), self.clock.now())
    }

    pub async fn export_xlsx(&self, params: &ViewParams) -> Result<Vec<u8>> {
        let records = self.records.read().await;
        ExportService::generate_interviews_xlsx(&derive_view(&records, params), self.clock.now())
    }

    pub async fn create(&self, mut interview: NewInterview) -> Result<Uuid> {
        let now = self.clock.now();
        interview.created_at = Some(now);
        interview.updated_at = Some(now);

        let id = self.store.create(interview).await.map_err(|e| {
            tracing::error!(error = ?e, "Error adding interview");
            e
        })?;
        tracing::info!(interview_id = %id, "Interview created");
        self.reload_after_mutation().await;
        Ok(id)
    }

    pub async fn update(&self, id: Uuid, mut patch: InterviewPatch) -> Result<()> {
        patch.updated_at = Some(self.clock.now());
        self.persist(id, patch, "update").await
    }

    pub async fn set_status(&self, id: Uuid, status: InterviewStatus) -> Result<()> {
        let patch = InterviewPatch {
            status: Some(status),
            updated_at: Some(self.clock.now()),
            ..Default::default()
        };
        self.persist(id, patch, "status change").await
    }

    pub async fn soft_delete(&self, id: Uuid, confirmation: Confirmation) -> Result<SoftDeleteOutcome> {
        if confirmation == Confirmation::Declined {
            tracing::debug!(interview_id = %id, "Soft delete declined");
            return Ok(SoftDeleteOutcome::Declined);
        }

        let now = self.clock.now();
        let patch = InterviewPatch {
            deleted: Some(true),
            deleted_at: Some(now),
            updated_at: Some(now),
            ..Default::default()
        };
        self.persist(id, patch, "soft delete").await?;
        Ok(SoftDeleteOutcome::Deleted)
    }

    pub async fn restore(&self, id: Uuid) -> Result<()> {
        let now = self.clock.now();
        let patch = InterviewPatch {
            deleted: Some(false),
            restored_at: Some(now),
            updated_at: Some(now),
            ..Default::default()
        };
        self.persist(id, patch, "restore").await
    }

    pub async fn duplicate(&self, id: Uuid) -> Result<Uuid> {
        let original = self.get(id).await?;
        let copy = original.duplicate_at(self.clock.now());

        let new_id = self.store.create(copy).await.map_err(|e| {
            tracing::error!(error = ?e, interview_id = %id, "Error duplicating interview");
            e
        })?;
        tracing::info!(interview_id = %id, copy_id = %new_id, "Interview duplicated");
        self.reload_after_mutation().await;
        Ok(new_id)
    }

    async fn persist(&self, id: Uuid, patch: InterviewPatch, action: &'static str) -> Result<()> {
        self.store.update_by_id(id, patch).await.map_err(|e| {
            tracing::error!(error = ?e, interview_id = %id, action, "Error saving interview");
            e
        })?;
        tracing::info!(interview_id = %id, action, "Interview saved");
        self.reload_after_mutation().await;
        Ok(())
    }

    /// The mutation already landed, so a failed reload only leaves the view
    /// stale until the next one.
    async fn reload_after_mutation(&self) {
        if let Err(e) = self.reload().await {
            tracing::warn!(error = ?e, "Interview list is stale after a failed reload");
        }
    }
}
