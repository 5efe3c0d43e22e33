use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use estoque_core::{DomainError, DomainResult, ProductCode};

/// A row of the `produtos` table.
///
/// Field names match the column names, which are also the JSON contract of
/// the product listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    #[sqlx(try_from = "String")]
    pub codigo: ProductCode,
    pub nome: String,
    pub categoria: String,
    pub unidade: Option<String>,
    pub marca: Option<String>,
    pub fornecedor: Option<String>,
    pub quantidade: i32,
    pub valor_unitario: Decimal,
    pub data_cadastro: DateTime<Utc>,
}

/// Descriptive product fields, validated. Used both at registration and when
/// editing an existing product (quantity deliberately excluded: it only
/// changes through movement-producing operations).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub nome: String,
    pub categoria: String,
    pub unidade: Option<String>,
    pub marca: Option<String>,
    pub fornecedor: Option<String>,
    pub valor_unitario: Decimal,
}

impl ProductDetails {
    pub fn new(
        nome: &str,
        categoria: &str,
        unidade: Option<&str>,
        marca: Option<&str>,
        fornecedor: Option<&str>,
        valor_unitario: Decimal,
    ) -> DomainResult<Self> {
        let nome = nome.trim();
        if nome.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let categoria = categoria.trim();
        if categoria.is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        if valor_unitario.is_sign_negative() {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        Ok(Self {
            nome: nome.to_string(),
            categoria: categoria.to_string(),
            unidade: optional(unidade),
            marca: optional(marca),
            fornecedor: optional(fornecedor),
            valor_unitario,
        })
    }
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub details: ProductDetails,
    pub quantidade: i32,
}

impl NewProduct {
    pub fn new(details: ProductDetails, quantidade: i32) -> DomainResult<Self> {
        if quantidade < 0 {
            return Err(DomainError::validation(
                "initial quantity cannot be negative",
            ));
        }
        Ok(Self {
            details,
            quantidade,
        })
    }
}

fn optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a whole-unit quantity from form input.
pub fn parse_quantity(raw: &str) -> DomainResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| DomainError::validation(format!("quantity must be a whole number, got {raw:?}")))
}

/// Parse a unit price from form input.
///
/// Accepts a comma as the decimal separator (`"2,50"`), as Brazilian locale
/// forms submit it.
pub fn parse_price(raw: &str) -> DomainResult<Decimal> {
    use core::str::FromStr;

    let normalized = raw.trim().replace(',', ".");
    let price = Decimal::from_str(&normalized)
        .map_err(|_| DomainError::validation(format!("price must be a number, got {raw:?}")))?;
    if price.is_sign_negative() {
        return Err(DomainError::validation("price cannot be negative"));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(nome: &str, categoria: &str) -> DomainResult<ProductDetails> {
        ProductDetails::new(nome, categoria, None, None, None, Decimal::new(250, 2))
    }

    #[test]
    fn parse_quantity_accepts_padded_integers() {
        assert_eq!(parse_quantity(" 10 ").unwrap(), 10);
        assert_eq!(parse_quantity("0").unwrap(), 0);
        assert_eq!(parse_quantity("-3").unwrap(), -3);
    }

    #[test]
    fn parse_quantity_rejects_non_integers() {
        assert!(parse_quantity("dez").is_err());
        assert!(parse_quantity("2.5").is_err());
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn parse_price_accepts_comma_decimal_separator() {
        assert_eq!(parse_price("2,50").unwrap(), Decimal::new(250, 2));
        assert_eq!(parse_price("2.50").unwrap(), Decimal::new(250, 2));
        assert_eq!(parse_price(" 10 ").unwrap(), Decimal::new(10, 0));
    }

    #[test]
    fn parse_price_rejects_malformed_and_negative_input() {
        assert!(parse_price("abc").is_err());
        assert!(parse_price("").is_err());
        match parse_price("-1,00").unwrap_err() {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn details_trim_and_blank_optionals_become_none() {
        let d = ProductDetails::new(
            "  Widget  ",
            " Ferramentas ",
            Some("  "),
            Some(" Acme "),
            None,
            Decimal::new(250, 2),
        )
        .unwrap();
        assert_eq!(d.nome, "Widget");
        assert_eq!(d.categoria, "Ferramentas");
        assert_eq!(d.unidade, None);
        assert_eq!(d.marca.as_deref(), Some("Acme"));
        assert_eq!(d.fornecedor, None);
    }

    #[test]
    fn details_reject_blank_name_and_category() {
        assert!(details("   ", "Ferramentas").is_err());
        assert!(details("Widget", "").is_err());
    }

    #[test]
    fn new_product_rejects_negative_initial_quantity() {
        let d = details("Widget", "Ferramentas").unwrap();
        let err = NewProduct::new(d, -1).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn new_product_accepts_zero_initial_quantity() {
        let d = details("Widget", "Ferramentas").unwrap();
        assert_eq!(NewProduct::new(d, 0).unwrap().quantidade, 0);
    }
}
