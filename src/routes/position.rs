use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::interview_dto::{PositionQuery, PositionSuggestionsResponse},
    services::interview_store::InterviewStore,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/positions",
    params(PositionQuery),
    responses(
        (status = 200, description = "Matching position titles", body = PositionSuggestionsResponse)
    )
)]
pub async fn suggest_positions<S: InterviewStore + Clone>(
    State(state): State<AppState<S>>,
    Query(query): Query<PositionQuery>,
) -> impl IntoResponse {
    let suggestions: Vec<String> = state
        .positions
        .suggest(query.q.as_deref().unwrap_or_default())
        .into_iter()
        .map(str::to_string)
        .collect();
    let open = !suggestions.is_empty();
    Json(PositionSuggestionsResponse { suggestions, open })
}
