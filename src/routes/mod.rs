use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode, Uri, header},
    routing::get,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod bridge;
pub mod doc;
pub mod health;
pub mod ui;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest("/bridge", bridge::router())
}

/// Page and UI event routes.
pub fn create_ui_router() -> Router<AppState> {
    Router::new()
        .route("/", get(ui::index))
        .nest("/ui", ui::router())
}

/// Sets the content-security policy on every response.
pub fn csp_layer(policy: &str) -> anyhow::Result<SetResponseHeaderLayer<HeaderValue>> {
    let value = HeaderValue::from_str(policy)?;
    Ok(SetResponseHeaderLayer::overriding(
        header::CONTENT_SECURITY_POLICY,
        value,
    ))
}

/// Every route plus the CSP header, with state bound. Transport layers
/// (tracing, request ids, limits) are added by the binary.
pub fn create_app(state: AppState, content_security_policy: &str) -> anyhow::Result<Router> {
    Ok(Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(create_ui_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(csp_layer(content_security_policy)?)
        .with_state(state))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
