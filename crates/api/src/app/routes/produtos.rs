use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use estoque_store::Store;

use crate::app::routes::common::flash_delete_response;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/produtos", get(api_produtos))
        .route("/adicionar", post(adicionar))
        .route("/edit/:id", post(editar))
        .route("/delete/:id", post(excluir))
}

pub async fn index(Extension(store): Extension<Arc<Store>>) -> axum::response::Response {
    match store.list_products().await {
        Ok(produtos) => (StatusCode::OK, Json(json!({ "produtos": produtos }))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// The raw product table as a JSON array.
pub async fn api_produtos(Extension(store): Extension<Arc<Store>>) -> axum::response::Response {
    match store.list_products().await {
        Ok(produtos) => (StatusCode::OK, Json(produtos)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn adicionar(
    Extension(store): Extension<Arc<Store>>,
    Form(body): Form<dto::AdicionarForm>,
) -> axum::response::Response {
    let novo = match body.into_new_product() {
        Ok(n) => n,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match store.register_product(novo).await {
        Ok(produto) => (
            StatusCode::CREATED,
            Json(json!({
                "flash": errors::flash(
                    "success",
                    format!("{} registered with code {}", produto.nome, produto.codigo),
                ),
                "produto": produto,
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn editar(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<i32>,
    Form(body): Form<dto::EditarProdutoForm>,
) -> axum::response::Response {
    let details = match body.into_details() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match store.update_product(id, details).await {
        Ok(produto) => (
            StatusCode::OK,
            Json(json!({
                "flash": errors::flash("success", format!("{} updated", produto.codigo)),
                "produto": produto,
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn excluir(
    Extension(store): Extension<Arc<Store>>,
    Path(id): Path<i32>,
) -> axum::response::Response {
    match store.remove_product_by_id(id).await {
        Ok(removal) => flash_delete_response(removal),
        Err(e) => errors::store_error_to_response(e),
    }
}
