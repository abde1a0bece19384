use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    bridge::{BridgeReply, BridgeRequest},
    dto::products::{OperationOutcome, ProductInput},
    models::Product,
    response::{ApiResponse, Meta},
    routes::{bridge, health, ui},
    view::{
        ViewEvent, ViewState,
        state::{ButtonStyle, EditForm, Field, FormState, SubmitButton, Toast, ToastVariant, ViewMode},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        bridge::dispatch,
        ui::view_state,
        ui::view_event
    ),
    components(
        schemas(
            Product,
            ProductInput,
            OperationOutcome,
            BridgeRequest,
            BridgeReply,
            ViewEvent,
            ViewState,
            ViewMode,
            Field,
            FormState,
            EditForm,
            SubmitButton,
            ButtonStyle,
            Toast,
            ToastVariant,
            Meta,
            ApiResponse<BridgeReply>,
            ApiResponse<ViewState>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "bridge", description = "Fixed product operations"),
        (name = "ui", description = "View controller events and state"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
