use std::sync::Arc;

use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::json;

use estoque_core::ProductCode;
use estoque_inventory::{parse_quantity, Adjustment, MovementKind};
use estoque_store::Store;

use crate::app::routes::common::flash_delete_response;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/retirada", post(retirada))
        .route("/atualizar_estoque", post(atualizar_estoque))
}

pub async fn retirada(
    Extension(store): Extension<Arc<Store>>,
    Form(body): Form<dto::RetiradaForm>,
) -> axum::response::Response {
    let codigo = match ProductCode::parse(&body.codigo) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let quantidade = match parse_quantity(&body.quantidade) {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if quantidade <= 0 {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "warning",
            "invalid_quantity",
            "withdrawal amount must be positive",
        );
    }

    match store.withdraw(&codigo, quantidade).await {
        Ok(w) => (
            StatusCode::OK,
            Json(json!({
                "flash": errors::flash(
                    "success",
                    format!(
                        "withdrew {} units of {} ({}); new stock: {}",
                        w.amount, w.product.nome, w.product.codigo, w.product.quantidade
                    ),
                ),
                "produto": w.product,
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Adjust a product's quantity, or delete the product outright when the
/// form's `excluir` flag is present (the page shares one form for both).
pub async fn atualizar_estoque(
    Extension(store): Extension<Arc<Store>>,
    Form(body): Form<dto::AtualizarEstoqueForm>,
) -> axum::response::Response {
    let codigo = match ProductCode::parse(&body.codigo) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if body.excluir.is_some() {
        return match store.remove_product(&codigo).await {
            Ok(removal) => flash_delete_response(removal),
            Err(e) => errors::store_error_to_response(e),
        };
    }

    let raw = match body.nova_quantidade.as_deref() {
        Some(v) => v,
        None => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "danger",
                "validation_error",
                "nova_quantidade is required",
            )
        }
    };
    let nova_quantidade = match parse_quantity(raw) {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match store.adjust_quantity(&codigo, nova_quantidade).await {
        Ok(Adjustment::Unchanged { product }) => (
            StatusCode::OK,
            Json(json!({
                "flash": errors::flash("info", format!("no change for {}", product.nome)),
                "produto": product,
            })),
        )
            .into_response(),
        Ok(Adjustment::Applied {
            product,
            kind,
            size,
        }) => {
            let (severity, verb) = match kind {
                MovementKind::AjusteEntrada => ("success", "added"),
                _ => ("warning", "removed"),
            };
            (
                StatusCode::OK,
                Json(json!({
                    "flash": errors::flash(
                        severity,
                        format!(
                            "stock of {} adjusted: {verb} {size} units; new stock: {}",
                            product.nome, product.quantidade
                        ),
                    ),
                    "produto": product,
                    "movimento": { "tipo": kind, "quantidade": size },
                })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
