use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use estoque_inventory::Removal;

use crate::app::errors;

/// Shared response for the two deletion entrypoints (`/delete/:id` and the
/// `excluir` branch of `/atualizar_estoque`).
pub fn flash_delete_response(removal: Removal) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(json!({
            "flash": errors::flash(
                "success",
                format!(
                    "{} ({}) deleted along with {} movement records",
                    removal.nome, removal.codigo, removal.movements_removed
                ),
            ),
        })),
    )
        .into_response()
}
