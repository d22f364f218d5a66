pub mod docs;
pub mod export;
pub mod health;
pub mod interview;
pub mod position;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::middleware::refresh_throttle::refresh_throttle_middleware;
use crate::services::interview_store::InterviewStore;
use crate::AppState;

/// All panel routes, with state applied. Cross-cutting layers (CORS, tracing)
/// are added by the caller.
pub fn router<S: InterviewStore + Clone>(state: AppState<S>) -> Router {
    let refresh_api = Router::new()
        .route("/api/interviews/refresh", post(interview::refresh_interviews::<S>))
        .route_layer(from_fn_with_state(
            state.refresh_throttle.clone(),
            refresh_throttle_middleware,
        ));

    let interview_api = Router::new()
        .route(
            "/api/interviews",
            get(interview::list_interviews::<S>).post(interview::create_interview::<S>),
        )
        .route("/api/interviews/analytics", get(interview::get_analytics::<S>))
        .route("/api/interviews/export.csv", get(export::export_interviews_csv::<S>))
        .route("/api/interviews/export.xlsx", get(export::export_interviews_xlsx::<S>))
        .route(
            "/api/interviews/:id",
            get(interview::get_interview::<S>)
                .patch(interview::update_interview::<S>)
                .delete(interview::delete_interview::<S>),
        )
        .route("/api/interviews/:id/status", post(interview::update_interview_status::<S>))
        .route("/api/interviews/:id/restore", post(interview::restore_interview::<S>))
        .route("/api/interviews/:id/duplicate", post(interview::duplicate_interview::<S>))
        .route("/api/positions", get(position::suggest_positions::<S>));

    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .merge(interview_api)
        .merge(refresh_api)
        .with_state(state)
}
