use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// The quiz frontend is served from its own origin and only issues GET and POST.
pub fn frontend_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any)
}
