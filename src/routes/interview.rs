use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::interview_dto::{
        CreateInterviewPayload, CreatedResponse, DeleteInterviewQuery, InterviewListQuery,
        InterviewListResponse, RefreshResponse, SoftDeleteResponse, StatusUpdatePayload,
        UpdateInterviewPayload,
    },
    error::Result,
    models::interview::InterviewRecord,
    services::{interview_store::InterviewStore, view_service::Analytics},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/interviews",
    params(InterviewListQuery),
    responses(
        (status = 200, description = "Filtered and sorted interviews with counters", body = InterviewListResponse),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_interviews<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Query(query): Query<InterviewListQuery>,
) -> Result<impl IntoResponse> {
    let params = query.into_params()?;
    let view = state.interview_service.view(&params).await;
    Ok(Json(InterviewListResponse::new(view, state.refresh_throttle.is_locked())))
}

#[utoipa::path(
    get,
    path = "/api/interviews/analytics",
    params(InterviewListQuery),
    responses(
        (status = 200, description = "Counters for the selected partition", body = Analytics)
    )
)]
pub async fn get_analytics<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Query(query): Query<InterviewListQuery>,
) -> Result<impl IntoResponse> {
    let params = query.into_params()?;
    Ok(Json(state.interview_service.analytics(params.view_mode).await))
}

#[utoipa::path(
    post,
    path = "/api/interviews",
    request_body = CreateInterviewPayload,
    responses(
        (status = 201, description = "Interview created", body = CreatedResponse),
        (status = 400, description = "Invalid payload"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn create_interview<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateInterviewPayload>,
) -> Result<impl IntoResponse> {
    let service = &state.interview_service;
    let id = service.create(payload.into_new_interview(service.today())).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[utoipa::path(
    get,
    path = "/api/interviews/{id}",
    params(
        ("id" = Uuid, Path, description = "Interview ID")
    ),
    responses(
        (status = 200, description = "Interview found", body = InterviewRecord),
        (status = 404, description = "Interview not found")
    )
)]
pub async fn get_interview<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.interview_service.get(id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/interviews/{id}",
    params(
        ("id" = Uuid, Path, description = "Interview ID")
    ),
    request_body = UpdateInterviewPayload,
    responses(
        (status = 200, description = "Interview updated", body = InterviewRecord),
        (status = 404, description = "Interview not found"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn update_interview<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInterviewPayload>,
) -> Result<impl IntoResponse> {
    state.interview_service.update(id, payload.into()).await?;
    Ok(Json(state.interview_service.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/interviews/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Interview ID")
    ),
    request_body = StatusUpdatePayload,
    responses(
        (status = 200, description = "Status changed", body = InterviewRecord),
        (status = 404, description = "Interview not found"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn update_interview_status<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdatePayload>,
) -> Result<impl IntoResponse> {
    state.interview_service.set_status(id, payload.status).await?;
    Ok(Json(state.interview_service.get(id).await?))
}

/// Moves the interview to the deleted partition. Nothing happens unless the
/// caller passes `confirm=true`.
#[utoipa::path(
    delete,
    path = "/api/interviews/{id}",
    params(
        ("id" = Uuid, Path, description = "Interview ID"),
        DeleteInterviewQuery
    ),
    responses(
        (status = 200, description = "Deleted, or declined without changes", body = SoftDeleteResponse),
        (status = 404, description = "Interview not found"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn delete_interview<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteInterviewQuery>,
) -> Result<impl IntoResponse> {
    let outcome = state
        .interview_service
        .soft_delete(id, query.confirmation())
        .await?;
    Ok(Json(SoftDeleteResponse { outcome }))
}

#[utoipa::path(
    post,
    path = "/api/interviews/{id}/restore",
    params(
        ("id" = Uuid, Path, description = "Interview ID")
    ),
    responses(
        (status = 200, description = "Interview restored", body = InterviewRecord),
        (status = 404, description = "Interview not found"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn restore_interview<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.interview_service.restore(id).await?;
    Ok(Json(state.interview_service.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/interviews/{id}/duplicate",
    params(
        ("id" = Uuid, Path, description = "Interview ID")
    ),
    responses(
        (status = 201, description = "Copy created", body = CreatedResponse),
        (status = 404, description = "Interview not found"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn duplicate_interview<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let id = state.interview_service.duplicate(id).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Manual reload. Guarded by the refresh throttle layer.
#[utoipa::path(
    post,
    path = "/api/interviews/refresh",
    responses(
        (status = 200, description = "Interviews reloaded", body = RefreshResponse),
        (status = 429, description = "Refresh is locked"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn refresh_interviews<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse> {
    let loaded = state.interview_service.reload().await?;
    Ok(Json(RefreshResponse {
        loaded,
        refresh_locked: state.refresh_throttle.is_locked(),
    }))
}
