//! Queries on the `movimentacoes` audit table.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgConnection;

use estoque_inventory::{Movement, MovementKind};

use crate::{Store, StoreError};

impl Store {
    /// The full movement history joined with product code and name, newest
    /// first.
    pub async fn movement_history(&self) -> Result<Vec<Movement>, StoreError> {
        let movimentacoes = sqlx::query_as::<_, Movement>(
            r#"
            SELECT m.id, m.produto_id, p.codigo, p.nome, m.tipo,
                   m.quantidade, m.data_movimentacao
            FROM movimentacoes m
            JOIN produtos p ON p.id = m.produto_id
            ORDER BY m.data_movimentacao DESC, m.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(movimentacoes)
    }
}

/// Append one audit row inside an open transaction.
pub(crate) async fn insert_movement(
    conn: &mut PgConnection,
    produto_id: i32,
    tipo: MovementKind,
    quantidade: i32,
    em: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO movimentacoes (produto_id, tipo, quantidade, data_movimentacao)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(produto_id)
    .bind(tipo.as_str())
    .bind(quantidade)
    .bind(em)
    .execute(conn)
    .await?;
    Ok(())
}
