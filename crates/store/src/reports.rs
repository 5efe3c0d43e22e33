//! Aggregations backing the report and chart-data endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use estoque_inventory::MovementKind;

use crate::{Store, StoreError};

/// Per-category totals (one bar of the category chart).
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CategoryBreakdown {
    pub categoria: String,
    pub total_produtos: i64,
    pub total_unidades: i64,
    pub valor_total: Decimal,
}

/// Per-movement-type totals (one slice of the movement chart).
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct MovementTotal {
    #[sqlx(try_from = "String")]
    pub tipo: MovementKind,
    pub movimentos: i64,
    pub total_unidades: i64,
}

/// Whole-inventory totals.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct InventorySummary {
    pub total_produtos: i64,
    pub total_unidades: i64,
    pub valor_estoque: Decimal,
}

impl Store {
    pub async fn category_breakdown(&self) -> Result<Vec<CategoryBreakdown>, StoreError> {
        let breakdown = sqlx::query_as::<_, CategoryBreakdown>(
            r#"
            SELECT categoria,
                   COUNT(*) AS total_produtos,
                   COALESCE(SUM(quantidade), 0)::BIGINT AS total_unidades,
                   COALESCE(SUM(quantidade * valor_unitario), 0) AS valor_total
            FROM produtos
            GROUP BY categoria
            ORDER BY categoria
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(breakdown)
    }

    pub async fn movement_totals(&self) -> Result<Vec<MovementTotal>, StoreError> {
        let totals = sqlx::query_as::<_, MovementTotal>(
            r#"
            SELECT tipo,
                   COUNT(*) AS movimentos,
                   COALESCE(SUM(quantidade), 0)::BIGINT AS total_unidades
            FROM movimentacoes
            GROUP BY tipo
            ORDER BY tipo
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(totals)
    }

    pub async fn inventory_summary(&self) -> Result<InventorySummary, StoreError> {
        let summary = sqlx::query_as::<_, InventorySummary>(
            r#"
            SELECT COUNT(*) AS total_produtos,
                   COALESCE(SUM(quantidade), 0)::BIGINT AS total_unidades,
                   COALESCE(SUM(quantidade * valor_unitario), 0) AS valor_estoque
            FROM produtos
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }
}
