use chrono::{DateTime, Utc};

use crate::{
    db::DbPool,
    dto::products::{OperationOutcome, ProductInput},
    error::AppResult,
    models::Product,
};

pub const UPDATE_FAILED_MESSAGE: &str = "Ocorreu um erro no servidor.";

/// Owns the pool handle and the SQL for the `produtos` table.
///
/// Every method is a single parameterized statement; nothing here spans a
/// transaction.
#[derive(Debug, Clone)]
pub struct ProductGateway {
    pool: DbPool,
}

impl ProductGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connectivity probe, returns the database clock.
    pub async fn ping(&self) -> AppResult<DateTime<Utc>> {
        let (now,): (DateTime<Utc>,) = sqlx::query_as("SELECT NOW()")
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }

    pub async fn insert(&self, input: &ProductInput) -> AppResult<()> {
        tracing::debug!(
            nome = %input.nome,
            quantidade = %input.quantidade,
            preco = %input.preco,
            "inserting product"
        );
        sqlx::query("INSERT INTO produtos (nome, quantidade, preco) VALUES ($1, $2, $3)")
            .bind(&input.nome)
            .bind(input.quantidade)
            .bind(input.preco)
            .execute(&self.pool)
            .await?;
        tracing::info!(nome = %input.nome, "product inserted");
        Ok(())
    }

    /// All products, newest id first. Failures are logged and reported as an
    /// empty list.
    pub async fn list(&self) -> Vec<Product> {
        let result = sqlx::query_as::<_, Product>(
            "SELECT id, nome, quantidade, preco, data_criacao FROM produtos ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await;

        match result {
            Ok(rows) => {
                tracing::debug!(count = rows.len(), "products listed");
                rows
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to list products");
                Vec::new()
            }
        }
    }

    pub async fn delete_by_id(&self, id: i32) -> OperationOutcome {
        let result = sqlx::query("DELETE FROM produtos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => {
                if done.rows_affected() == 0 {
                    tracing::warn!(id, "delete matched no product");
                }
                OperationOutcome::ok()
            }
            Err(err) => {
                tracing::error!(id, error = %err, "failed to delete product");
                OperationOutcome::failed(err.to_string())
            }
        }
    }

    pub async fn update_by_id(&self, id: i32, input: &ProductInput) -> OperationOutcome {
        let result = sqlx::query(
            r#"
            UPDATE produtos
            SET nome = $1, quantidade = $2, preco = $3
            WHERE id = $4
            "#,
        )
        .bind(&input.nome)
        .bind(input.quantidade)
        .bind(input.preco)
        .bind(id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                if done.rows_affected() == 0 {
                    tracing::warn!(id, "update matched no product");
                }
                OperationOutcome::ok()
            }
            Err(err) => {
                tracing::error!(id, error = %err, "failed to update product");
                OperationOutcome::failed(UPDATE_FAILED_MESSAGE)
            }
        }
    }

    /// Waits for checked-out connections and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
