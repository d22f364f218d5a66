use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{
    dto::interview_dto::InterviewListQuery,
    error::Result,
    services::{
        export_service::{CSV_CONTENT_TYPE, CSV_FILENAME, XLSX_CONTENT_TYPE, XLSX_FILENAME},
        interview_store::InterviewStore,
    },
    AppState,
};

fn attachment(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", filename)
}

/// Export the current view as CSV, in the same order as the table.
#[utoipa::path(
    get,
    path = "/api/interviews/export.csv",
    params(InterviewListQuery),
    responses(
        (status = 200, description = "CSV download", content_type = "text/csv", body = String),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn export_interviews_csv<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Query(query): Query<InterviewListQuery>,
) -> Result<impl IntoResponse> {
    let params = query.into_params()?;
    let body = state.interview_service.export_csv(&params).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, attachment(CSV_FILENAME)),
        ],
        body,
    ))
}

/// Export the current view as a styled XLSX workbook
#[utoipa::path(
    get,
    path = "/api/interviews/export.xlsx",
    params(InterviewListQuery),
    responses(
        (status = 200, description = "XLSX download"),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn export_interviews_xlsx<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Query(query): Query<InterviewListQuery>,
) -> Result<impl IntoResponse> {
    let params = query.into_params()?;
    let buffer = state.interview_service.export_xlsx(&params).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, attachment(XLSX_FILENAME)),
        ],
        buffer,
    ))
}
