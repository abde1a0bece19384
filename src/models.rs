use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A row of the `produtos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i32,
    pub nome: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantidade: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco: Decimal,
    pub data_criacao: DateTime<Utc>,
}
