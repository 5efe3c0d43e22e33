use axum::Router;

pub mod common;
pub mod estoque;
pub mod produtos;
pub mod relatorios;
pub mod system;

/// Router for all application endpoints (paths are absolute, as the forms
/// post them).
pub fn router() -> Router {
    Router::new()
        .merge(produtos::router())
        .merge(estoque::router())
        .merge(relatorios::router())
}
