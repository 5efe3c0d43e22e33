use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use estoque_inventory::{stratified_sample, Product};
use estoque_store::Store;

use crate::app::errors;

/// Sample 10% of each category, seeded for reproducible spot checks.
const SAMPLE_FRACTION: f64 = 0.10;
const SAMPLE_SEED: u64 = 42;

pub fn router() -> Router {
    Router::new()
        .route("/movimentacao", get(movimentacao))
        .route("/graficos", get(graficos))
        .route("/relatorios", get(relatorios))
        .route("/amostragem", get(amostragem))
        .route("/exportar", get(exportar))
}

pub async fn movimentacao(Extension(store): Extension<Arc<Store>>) -> axum::response::Response {
    match store.movement_history().await {
        Ok(movimentacoes) => (
            StatusCode::OK,
            Json(json!({ "movimentacoes": movimentacoes })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// The aggregates behind the dashboard charts.
pub async fn graficos(Extension(store): Extension<Arc<Store>>) -> axum::response::Response {
    let por_categoria = match store.category_breakdown().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    let por_tipo = match store.movement_totals().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(json!({
            "por_categoria": por_categoria,
            "por_tipo": por_tipo,
        })),
    )
        .into_response()
}

pub async fn relatorios(Extension(store): Extension<Arc<Store>>) -> axum::response::Response {
    let resumo = match store.inventory_summary().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    let por_categoria = match store.category_breakdown().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(json!({
            "resumo": resumo,
            "por_categoria": por_categoria,
        })),
    )
        .into_response()
}

pub async fn amostragem(Extension(store): Extension<Arc<Store>>) -> axum::response::Response {
    let produtos = match store.list_products().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };

    if produtos.is_empty() {
        return (
            StatusCode::OK,
            Json(json!({
                "flash": errors::flash("info", "inventory is empty; register products before sampling"),
                "amostra": [],
            })),
        )
            .into_response();
    }

    let amostra = stratified_sample(&produtos, SAMPLE_FRACTION, SAMPLE_SEED);
    (
        StatusCode::OK,
        Json(json!({
            "flash": errors::flash(
                "success",
                format!(
                    "stratified sample generated: {} items, 10% per category",
                    amostra.len()
                ),
            ),
            "amostra": amostra,
        })),
    )
        .into_response()
}

/// The product table as a CSV attachment.
pub async fn exportar(Extension(store): Extension<Arc<Store>>) -> axum::response::Response {
    let produtos = match store.list_products().await {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };

    match produtos_csv(&produtos) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"produtos.csv\"",
                ),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "csv export failed");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "danger",
                "export_error",
                "failed to build the CSV export",
            )
        }
    }
}

fn produtos_csv(produtos: &[Product]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "codigo",
        "nome",
        "categoria",
        "unidade",
        "marca",
        "fornecedor",
        "quantidade",
        "valor_unitario",
        "data_cadastro",
    ])?;

    for p in produtos {
        writer.write_record(&[
            p.codigo.as_str().to_string(),
            p.nome.clone(),
            p.categoria.clone(),
            p.unidade.clone().unwrap_or_default(),
            p.marca.clone().unwrap_or_default(),
            p.fornecedor.clone().unwrap_or_default(),
            p.quantidade.to_string(),
            p.valor_unitario.to_string(),
            p.data_cadastro.to_rfc3339(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use estoque_core::ProductCode;
    use rust_decimal::Decimal;

    fn produto(id: i32, nome: &str) -> Product {
        Product {
            id,
            codigo: ProductCode::from_sequence(i64::from(id)),
            nome: nome.to_string(),
            categoria: "Ferramentas".to_string(),
            unidade: Some("un".to_string()),
            marca: None,
            fornecedor: None,
            quantidade: 10,
            valor_unitario: Decimal::new(250, 2),
            data_cadastro: Utc::now(),
        }
    }

    #[test]
    fn csv_has_a_header_and_one_row_per_product() {
        let csv = produtos_csv(&[produto(1, "Widget"), produto(2, "Gadget")]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("codigo,nome,categoria"));
        assert!(lines[1].starts_with("P001,Widget,Ferramentas,un,,,10,2.50,"));
    }

    #[test]
    fn csv_of_empty_inventory_is_just_the_header() {
        let csv = produtos_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
