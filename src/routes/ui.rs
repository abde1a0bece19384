use axum::{
    Json, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
    view::{ViewEvent, ViewState, render},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/state", get(view_state))
        .route("/events", post(view_event))
}

/// The page for the current view state.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.view.lock().await;
    Html(render::page(view.state(), &state.script_cdn))
}

#[utoipa::path(
    get,
    path = "/ui/state",
    responses(
        (status = 200, description = "Current view state", body = ApiResponse<ViewState>)
    ),
    tag = "ui"
)]
pub async fn view_state(State(state): State<AppState>) -> Json<ApiResponse<ViewState>> {
    let view = state.view.lock().await;
    Json(ApiResponse::success(
        "View state",
        view.state().clone(),
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    post,
    path = "/ui/events",
    request_body = ViewEvent,
    responses(
        (status = 200, description = "View state after the event", body = ApiResponse<ViewState>)
    ),
    tag = "ui"
)]
pub async fn view_event(
    State(state): State<AppState>,
    Json(event): Json<ViewEvent>,
) -> Json<ApiResponse<ViewState>> {
    let mut view = state.view.lock().await;
    view.handle(event).await;
    Json(ApiResponse::success(
        "View state",
        view.state().clone(),
        Some(Meta::empty()),
    ))
}
