//! The fixed operation set between the view and the privileged host.
//!
//! Requests are a closed enum, so nothing but these shapes can reach the
//! gateway: no query strings, no code.

use std::future::Future;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    dto::products::{OperationOutcome, ProductInput},
    models::Product,
};

mod dispatcher;
mod window;

pub use dispatcher::{Bridge, BridgeHandle, spawn};
pub use window::{HeadlessWindow, WindowHost};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum BridgeRequest {
    AddProduct {
        nome: String,
        #[serde(with = "rust_decimal::serde::float")]
        quantidade: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        preco: Decimal,
    },
    GetProduct,
    DeleteProduct {
        id: i32,
    },
    UpdateProduct {
        id: i32,
        product: ProductInput,
    },
    FocusWindow,
}

/// Whether the caller observes a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    FireAndForget,
    RequestResponse,
}

impl BridgeRequest {
    pub fn delivery(&self) -> Delivery {
        match self {
            BridgeRequest::AddProduct { .. } | BridgeRequest::FocusWindow => Delivery::FireAndForget,
            BridgeRequest::GetProduct
            | BridgeRequest::DeleteProduct { .. }
            | BridgeRequest::UpdateProduct { .. } => Delivery::RequestResponse,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BridgeRequest::AddProduct { .. } => "addProduct",
            BridgeRequest::GetProduct => "getProduct",
            BridgeRequest::DeleteProduct { .. } => "deleteProduct",
            BridgeRequest::UpdateProduct { .. } => "updateProduct",
            BridgeRequest::FocusWindow => "focusWindow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum BridgeReply {
    /// A fire-and-forget request was queued.
    Accepted,
    Products(Vec<Product>),
    Outcome(OperationOutcome),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("bridge dispatcher is not running")]
    Disconnected,

    #[error("bridge dispatcher dropped the reply for {0}")]
    Dropped(&'static str),

    #[error("unexpected reply to {0}")]
    UnexpectedReply(&'static str),
}

/// Operations the view may call. Implemented by [`BridgeHandle`].
pub trait ProductApi: Send + Sync {
    fn add_product(&self, input: ProductInput)
    -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn get_product(&self) -> impl Future<Output = Result<Vec<Product>, BridgeError>> + Send;

    fn delete_product(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<OperationOutcome, BridgeError>> + Send;

    fn update_product(
        &self,
        id: i32,
        input: ProductInput,
    ) -> impl Future<Output = Result<OperationOutcome, BridgeError>> + Send;

    fn focus_window(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;
}
