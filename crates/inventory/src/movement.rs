use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use estoque_core::{DomainError, ProductCode};

/// Audit tag of a stock movement.
///
/// The serialized form matches the `tipo` column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    Entrada,
    Saida,
    AjusteEntrada,
    AjusteSaida,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entrada => "ENTRADA",
            MovementKind::Saida => "SAIDA",
            MovementKind::AjusteEntrada => "AJUSTE_ENTRADA",
            MovementKind::AjusteSaida => "AJUSTE_SAIDA",
        }
    }

    /// Classify an adjustment from the current quantity to a new one.
    ///
    /// Returns the movement kind and the (positive) movement size, or `None`
    /// when the quantities are equal and no movement should be recorded.
    pub fn for_adjustment(current: i32, new: i32) -> Option<(MovementKind, i32)> {
        let diff = new - current;
        match diff.cmp(&0) {
            core::cmp::Ordering::Equal => None,
            core::cmp::Ordering::Greater => Some((MovementKind::AjusteEntrada, diff)),
            core::cmp::Ordering::Less => Some((MovementKind::AjusteSaida, diff.abs())),
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENTRADA" => Ok(MovementKind::Entrada),
            "SAIDA" => Ok(MovementKind::Saida),
            "AJUSTE_ENTRADA" => Ok(MovementKind::AjusteEntrada),
            "AJUSTE_SAIDA" => Ok(MovementKind::AjusteSaida),
            other => Err(DomainError::validation(format!(
                "unknown movement type: {other:?}"
            ))),
        }
    }
}

impl TryFrom<String> for MovementKind {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A movement joined with its product's code and name, as served by the
/// movement-history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Movement {
    pub id: i32,
    pub produto_id: i32,
    #[sqlx(try_from = "String")]
    pub codigo: ProductCode,
    pub nome: String,
    #[sqlx(try_from = "String")]
    pub tipo: MovementKind,
    pub quantidade: i32,
    pub data_movimentacao: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_up_is_an_entrada_sized_to_the_difference() {
        assert_eq!(
            MovementKind::for_adjustment(3, 10),
            Some((MovementKind::AjusteEntrada, 7))
        );
    }

    #[test]
    fn adjustment_down_is_a_saida_sized_to_the_absolute_difference() {
        assert_eq!(
            MovementKind::for_adjustment(7, 5),
            Some((MovementKind::AjusteSaida, 2))
        );
    }

    #[test]
    fn equal_quantities_produce_no_movement() {
        assert_eq!(MovementKind::for_adjustment(5, 5), None);
    }

    #[test]
    fn kind_round_trips_through_column_values() {
        for kind in [
            MovementKind::Entrada,
            MovementKind::Saida,
            MovementKind::AjusteEntrada,
            MovementKind::AjusteSaida,
        ] {
            assert_eq!(kind.as_str().parse::<MovementKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_column_value_is_rejected() {
        assert!("TRANSFERENCIA".parse::<MovementKind>().is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Applying the signed effect of the classified movement to the
            /// current quantity always lands on the requested quantity.
            #[test]
            fn adjustment_reconstructs_new_quantity(current in 0..100_000i32, new in 0..100_000i32) {
                match MovementKind::for_adjustment(current, new) {
                    None => prop_assert_eq!(current, new),
                    Some((MovementKind::AjusteEntrada, size)) => {
                        prop_assert!(size > 0);
                        prop_assert_eq!(current + size, new);
                    }
                    Some((MovementKind::AjusteSaida, size)) => {
                        prop_assert!(size > 0);
                        prop_assert_eq!(current - size, new);
                    }
                    Some((other, _)) => prop_assert!(false, "unexpected kind {:?}", other),
                }
            }
        }
    }
}
