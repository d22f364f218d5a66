use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::interview_dto::{
    CreateInterviewPayload, CreatedResponse, InterviewListResponse, PositionSuggestionsResponse,
    RefreshResponse, SoftDeleteResponse, StatusUpdatePayload, UpdateInterviewPayload,
};
use crate::models::interview::{InterviewRecord, InterviewStatus};
use crate::services::interview_service::SoftDeleteOutcome;
use crate::services::view_service::{Analytics, QuickFilterCount, SortKey, SortOrder, ViewMode};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::health,
        super::interview::list_interviews,
        super::interview::get_analytics,
        super::interview::create_interview,
        super::interview::get_interview,
        super::interview::update_interview,
        super::interview::update_interview_status,
        super::interview::delete_interview,
        super::interview::restore_interview,
        super::interview::duplicate_interview,
        super::interview::refresh_interviews,
        super::export::export_interviews_csv,
        super::export::export_interviews_xlsx,
        super::position::suggest_positions,
    ),
    components(schemas(
        InterviewRecord,
        InterviewStatus,
        CreateInterviewPayload,
        UpdateInterviewPayload,
        StatusUpdatePayload,
        CreatedResponse,
        SoftDeleteResponse,
        SoftDeleteOutcome,
        RefreshResponse,
        InterviewListResponse,
        PositionSuggestionsResponse,
        Analytics,
        QuickFilterCount,
        SortKey,
        SortOrder,
        ViewMode,
    )),
    tags((name = "interviews", description = "Interview tracking panel"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
