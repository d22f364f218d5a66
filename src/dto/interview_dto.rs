use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::interview::{InterviewPatch, InterviewRecord, InterviewStatus, NewInterview};
use crate::services::interview_service::{Confirmation, InterviewView, SoftDeleteOutcome};
use crate::services::view_service::{Analytics, SortKey, SortOrder, StatusFilter, ViewMode, ViewParams};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInterviewPayload {
    pub candidate_name: String,
    pub position_applied: Option<String>,
    pub interview_date: Option<NaiveDate>,
    pub status: Option<InterviewStatus>,
    pub notes: Option<String>,
}

impl CreateInterviewPayload {
    /// Fills the blanks the way the "Add New Interview" form does: today's
    /// date, Scheduled, empty notes.
    pub fn into_new_interview(self, today: NaiveDate) -> NewInterview {
        NewInterview {
            candidate_name: self.candidate_name,
            position_applied: Some(self.position_applied.unwrap_or_default()),
            interview_date: Some(self.interview_date.unwrap_or(today)),
            status: Some(self.status.unwrap_or(InterviewStatus::Scheduled)),
            notes: Some(self.notes.unwrap_or_default()),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateInterviewPayload {
    pub candidate_name: Option<String>,
    pub position_applied: Option<String>,
    pub interview_date: Option<NaiveDate>,
    pub status: Option<InterviewStatus>,
    pub notes: Option<String>,
}

impl From<UpdateInterviewPayload> for InterviewPatch {
    fn from(value: UpdateInterviewPayload) -> Self {
        Self {
            candidate_name: value.candidate_name,
            position_applied: value.position_applied,
            interview_date: value.interview_date,
            status: value.status,
            notes: value.notes,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdatePayload {
    pub status: InterviewStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct InterviewListQuery {
    /// "All" or a status label
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<SortKey>,
    pub order: Option<SortOrder>,
    pub view: Option<ViewMode>,
}

impl InterviewListQuery {
    pub fn into_params(self) -> Result<ViewParams> {
        let status_filter = match self.status.as_deref() {
            None | Some("") => StatusFilter::All,
            Some(raw) => StatusFilter::parse(raw)
                .ok_or_else(|| Error::BadRequest(format!("Unknown status filter: {}", raw)))?,
        };
        let sort_key = self.sort_by.unwrap_or_default();

        Ok(ViewParams {
            status_filter,
            search_term: self.search.unwrap_or_default(),
            sort_key,
            sort_order: self.order.unwrap_or_else(|| sort_key.default_order()),
            view_mode: self.view.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct DeleteInterviewQuery {
    pub confirm: Option<bool>,
}

impl DeleteInterviewQuery {
    pub fn confirmation(&self) -> Confirmation {
        if self.confirm.unwrap_or(false) {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoftDeleteResponse {
    pub outcome: SoftDeleteOutcome,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub loaded: usize,
    pub refresh_locked: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InterviewListResponse {
    pub items: Vec<InterviewRecord>,
    pub analytics: Analytics,
    pub loading: bool,
    pub refresh_locked: bool,
}

impl InterviewListResponse {
    pub fn new(view: InterviewView, refresh_locked: bool) -> Self {
        Self {
            items: view.records,
            analytics: view.analytics,
            loading: view.loading,
            refresh_locked,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct PositionQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PositionSuggestionsResponse {
    pub suggestions: Vec<String>,
    pub open: bool,
}
