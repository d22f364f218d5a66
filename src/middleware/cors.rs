use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Cross-origin access for the panel front end. Export file names and the
/// refresh lockout are read from response headers.
pub fn panel_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION, header::RETRY_AFTER])
        .allow_origin(Any)
}
