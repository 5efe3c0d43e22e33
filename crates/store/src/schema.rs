//! Schema initialization.

use crate::{Store, StoreError};

impl Store {
    /// Ensure the `produtos` and `movimentacoes` tables exist.
    ///
    /// Safe to run on every boot; both statements are `IF NOT EXISTS`.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS produtos (
                id SERIAL PRIMARY KEY,
                codigo VARCHAR(10) UNIQUE NOT NULL,
                nome VARCHAR(255) NOT NULL,
                categoria VARCHAR(100) NOT NULL,
                unidade VARCHAR(20),
                marca VARCHAR(100),
                fornecedor VARCHAR(100),
                quantidade INTEGER NOT NULL,
                valor_unitario NUMERIC(10, 2) NOT NULL,
                data_cadastro TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS movimentacoes (
                id SERIAL PRIMARY KEY,
                produto_id INTEGER NOT NULL REFERENCES produtos(id),
                tipo VARCHAR(50) NOT NULL,
                quantidade INTEGER NOT NULL,
                data_movimentacao TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
