use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use estoque_core::DomainError;
use estoque_store::StoreError;

/// The flash-style message object carried by every mutation response.
pub fn flash(severity: &str, message: impl Into<String>) -> serde_json::Value {
    json!({ "severity": severity, "message": message.into() })
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => domain_error_to_response(e),
        StoreError::Db(e) => {
            tracing::error!(error = %e, "database error");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "danger",
                "database_error",
                "the operation failed; try again later",
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "danger", "validation_error", msg)
        }
        DomainError::InvalidCode(msg) => {
            json_error(StatusCode::BAD_REQUEST, "danger", "invalid_code", msg)
        }
        DomainError::NotFound => json_error(
            StatusCode::NOT_FOUND,
            "danger",
            "not_found",
            "product not found",
        ),
        err @ DomainError::InsufficientStock { .. } => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "danger",
            "insufficient_stock",
            err.to_string(),
        ),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "danger", "conflict", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    severity: &'static str,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "flash": flash(severity, message),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let resp = domain_error_to_response(DomainError::validation("bad input"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = domain_error_to_response(DomainError::not_found());
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn insufficient_stock_maps_to_unprocessable_entity() {
        let resp = domain_error_to_response(DomainError::insufficient_stock(3, 10));
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn conflict_maps_to_409() {
        let resp = domain_error_to_response(DomainError::conflict("duplicate"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
