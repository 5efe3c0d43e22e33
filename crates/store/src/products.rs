//! Read and update queries on the `produtos` table.

use estoque_core::ProductCode;
use estoque_inventory::{Product, ProductDetails};
use sqlx::postgres::PgConnection;

use crate::{Store, StoreError};

/// Column list shared by every query that returns a full product row.
pub(crate) const PRODUCT_COLUMNS: &str =
    "id, codigo, nome, categoria, unidade, marca, fornecedor, quantidade, valor_unitario, data_cadastro";

impl Store {
    /// All products, newest first.
    pub async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let produtos = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM produtos ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(produtos)
    }

    pub async fn product_by_code(
        &self,
        codigo: &ProductCode,
    ) -> Result<Option<Product>, StoreError> {
        let produto = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM produtos WHERE codigo = $1"
        ))
        .bind(codigo.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(produto)
    }

    pub async fn product_by_id(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let produto = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM produtos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(produto)
    }

    /// Update the descriptive fields of a product. The quantity is left
    /// untouched; it only changes through the movement-producing operations.
    pub async fn update_product(
        &self,
        id: i32,
        details: ProductDetails,
    ) -> Result<Product, StoreError> {
        let produto = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE produtos
            SET nome = $1, categoria = $2, unidade = $3, marca = $4,
                fornecedor = $5, valor_unitario = $6
            WHERE id = $7
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&details.nome)
        .bind(&details.categoria)
        .bind(&details.unidade)
        .bind(&details.marca)
        .bind(&details.fornecedor)
        .bind(details.valor_unitario)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        produto.ok_or_else(|| estoque_core::DomainError::not_found().into())
    }
}

/// Fetch a product row inside an open transaction.
pub(crate) async fn product_by_code_tx(
    conn: &mut PgConnection,
    codigo: &ProductCode,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM produtos WHERE codigo = $1"
    ))
    .bind(codigo.as_str())
    .fetch_optional(conn)
    .await
}
