//! Stock mutations: the operations that pair a `produtos.quantidade` change
//! with its audit row in `movimentacoes`.
//!
//! Every mutation commits the quantity change and its movement in one
//! transaction, so a crash between the two writes cannot leave a quantity
//! change without its audit row. Deletion is the exception: the two DELETE
//! statements run back to back without a wrapping transaction, movements
//! first to satisfy the foreign key.

use chrono::Utc;
use tracing::instrument;

use estoque_core::{DomainError, ProductCode};
use estoque_inventory::{Adjustment, MovementKind, NewProduct, Product, Removal, Withdrawal};

use crate::error::map_insert_error;
use crate::movements::insert_movement;
use crate::products::{product_by_code_tx, PRODUCT_COLUMNS};
use crate::{Store, StoreError};

impl Store {
    /// Register a new product and its initial `ENTRADA` movement.
    ///
    /// The code is derived from `MAX(id) + 1` inside the same transaction as
    /// the insert. Both rows share one timestamp and commit together.
    #[instrument(skip(self, novo), fields(quantidade = novo.quantidade))]
    pub async fn register_product(&self, novo: NewProduct) -> Result<Product, StoreError> {
        let mut tx = self.pool.begin().await?;

        let max_id: Option<i32> = sqlx::query_scalar("SELECT MAX(id) FROM produtos")
            .fetch_one(&mut *tx)
            .await?;
        let codigo = ProductCode::from_sequence(i64::from(max_id.unwrap_or(0)) + 1);
        let agora = Utc::now();

        let produto = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO produtos
                (codigo, nome, categoria, unidade, marca, fornecedor,
                 quantidade, valor_unitario, data_cadastro)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(codigo.as_str())
        .bind(&novo.details.nome)
        .bind(&novo.details.categoria)
        .bind(&novo.details.unidade)
        .bind(&novo.details.marca)
        .bind(&novo.details.fornecedor)
        .bind(novo.quantidade)
        .bind(novo.details.valor_unitario)
        .bind(agora)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        insert_movement(
            &mut *tx,
            produto.id,
            MovementKind::Entrada,
            novo.quantidade,
            agora,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(codigo = %produto.codigo, "product registered");
        Ok(produto)
    }

    /// Withdraw `amount` units from the product identified by `codigo`.
    ///
    /// The decrement is a single conditional update, so two concurrent
    /// withdrawals cannot both pass the stock check; the loser sees
    /// insufficient stock.
    #[instrument(skip(self), fields(codigo = %codigo, amount))]
    pub async fn withdraw(
        &self,
        codigo: &ProductCode,
        amount: i32,
    ) -> Result<Withdrawal, StoreError> {
        if amount <= 0 {
            return Err(DomainError::validation("withdrawal amount must be positive").into());
        }

        let mut tx = self.pool.begin().await?;

        let current = product_by_code_tx(&mut *tx, codigo)
            .await?
            .ok_or(DomainError::NotFound)?;

        let updated = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE produtos
            SET quantidade = quantidade - $1
            WHERE codigo = $2 AND quantidade >= $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(amount)
        .bind(codigo.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(produto) = updated else {
            return Err(DomainError::insufficient_stock(current.quantidade, amount).into());
        };

        insert_movement(&mut *tx, produto.id, MovementKind::Saida, amount, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(codigo = %produto.codigo, restante = produto.quantidade, "stock withdrawn");
        Ok(Withdrawal {
            product: produto,
            amount,
        })
    }

    /// Set the product's quantity to `new_quantity`, recording the signed
    /// difference as an `AJUSTE_ENTRADA` or `AJUSTE_SAIDA` movement. Equal
    /// quantities write nothing.
    #[instrument(skip(self), fields(codigo = %codigo, new_quantity))]
    pub async fn adjust_quantity(
        &self,
        codigo: &ProductCode,
        new_quantity: i32,
    ) -> Result<Adjustment, StoreError> {
        if new_quantity < 0 {
            return Err(DomainError::validation("stock quantity cannot be negative").into());
        }

        let mut tx = self.pool.begin().await?;

        let current = product_by_code_tx(&mut *tx, codigo)
            .await?
            .ok_or(DomainError::NotFound)?;

        let Some((kind, size)) = MovementKind::for_adjustment(current.quantidade, new_quantity)
        else {
            return Ok(Adjustment::Unchanged { product: current });
        };

        let produto = sqlx::query_as::<_, Product>(&format!(
            "UPDATE produtos SET quantidade = $1 WHERE id = $2 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(new_quantity)
        .bind(current.id)
        .fetch_one(&mut *tx)
        .await?;

        insert_movement(&mut *tx, produto.id, kind, size, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(codigo = %produto.codigo, tipo = kind.as_str(), size, "stock adjusted");
        Ok(Adjustment::Applied {
            product: produto,
            kind,
            size,
        })
    }

    /// Delete the product identified by `codigo` along with its movement
    /// history.
    #[instrument(skip(self), fields(codigo = %codigo))]
    pub async fn remove_product(&self, codigo: &ProductCode) -> Result<Removal, StoreError> {
        let produto = self
            .product_by_code(codigo)
            .await?
            .ok_or(DomainError::NotFound)?;
        self.remove(produto).await
    }

    /// Delete a product by its internal id along with its movement history.
    #[instrument(skip(self))]
    pub async fn remove_product_by_id(&self, id: i32) -> Result<Removal, StoreError> {
        let produto = self.product_by_id(id).await?.ok_or(DomainError::NotFound)?;
        self.remove(produto).await
    }

    async fn remove(&self, produto: Product) -> Result<Removal, StoreError> {
        // Movements go first to satisfy the foreign key. The two statements
        // are intentionally not wrapped in one transaction.
        let movements_removed = sqlx::query("DELETE FROM movimentacoes WHERE produto_id = $1")
            .bind(produto.id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM produtos WHERE id = $1")
            .bind(produto.id)
            .execute(&self.pool)
            .await?;

        tracing::info!(codigo = %produto.codigo, movements_removed, "product removed");
        Ok(Removal {
            id: produto.id,
            codigo: produto.codigo,
            nome: produto.nome,
            movements_removed,
        })
    }
}
