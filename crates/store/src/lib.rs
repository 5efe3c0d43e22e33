//! PostgreSQL persistence for the inventory service.
//!
//! All access goes through [`Store`], which holds a pooled connection handle.
//! The pool is created lazily so the process can come up (and report schema
//! initialization failures) before the database is reachable.

use sqlx::postgres::{PgPool, PgPoolOptions};

pub mod config;
pub mod error;
mod movements;
mod products;
mod reports;
mod schema;
mod stock;

pub use config::DbConfig;
pub use error::StoreError;
pub use reports::{CategoryBreakdown, InventorySummary, MovementTotal};

/// Handle to the `produtos` / `movimentacoes` table pair.
///
/// Cloning is cheap (the pool is internally reference-counted), and every
/// operation acquires a connection scoped to that one call.
#[derive(Debug, Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a store from configuration without touching the database yet.
    pub fn connect(config: &DbConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy(&config.connection_url())?;
        Ok(Self::new(pool))
    }
}
