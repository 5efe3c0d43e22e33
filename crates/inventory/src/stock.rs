//! Outcomes of the stock mutation operations.

use estoque_core::ProductCode;

use crate::movement::MovementKind;
use crate::product::Product;

/// Result of a successful withdrawal. `product` is the post-withdrawal row.
#[derive(Debug, Clone, PartialEq)]
pub struct Withdrawal {
    pub product: Product,
    pub amount: i32,
}

/// Result of a quantity adjustment.
#[derive(Debug, Clone, PartialEq)]
pub enum Adjustment {
    /// Requested quantity equals the current one; nothing was written.
    Unchanged { product: Product },
    /// Quantity was updated and a movement of `size` units recorded.
    Applied {
        product: Product,
        kind: MovementKind,
        size: i32,
    },
}

/// Result of deleting a product and its movement history.
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    pub id: i32,
    pub codigo: ProductCode,
    pub nome: String,
    pub movements_removed: u64,
}
