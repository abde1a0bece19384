use axum::{Json, Router, extract::State, routing::post};

use crate::{
    bridge::{BridgeReply, BridgeRequest},
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(dispatch))
}

#[utoipa::path(
    post,
    path = "/api/bridge",
    request_body = BridgeRequest,
    responses(
        (status = 200, description = "Operation reply", body = ApiResponse<BridgeReply>),
        (status = 503, description = "Bridge dispatcher stopped"),
    ),
    tag = "bridge"
)]
pub async fn dispatch(
    State(state): State<AppState>,
    Json(request): Json<BridgeRequest>,
) -> AppResult<Json<ApiResponse<BridgeReply>>> {
    let op = request.name();
    let reply = state.bridge.dispatch(request).await?;
    let meta = match &reply {
        BridgeReply::Products(items) => Meta::new(items.len() as i64),
        _ => Meta::empty(),
    };
    Ok(Json(ApiResponse::success(op, reply, Some(meta))))
}
