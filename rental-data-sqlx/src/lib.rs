//! # rental-data-sqlx
//!
//! SQLx (SQLite) backend for the CRM data layer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`OrderRepository`] | Order reads, writes and reports over an SQLite pool |
//! | [`Tx`] | Transaction wrapper: explicit commit, rollback on drop, `ManagedResource` impl |
//! | [`HasPool`] | Trait for application states that contain a database pool |
//! | [`SqlxErrorExt`] | Converts `sqlx::Error` → `DataError` (`.into_data_error()`) |
//! | [`migration`] | Embedded schema and `run_migrations` |
//!
//! # Transactions
//!
//! Writes that must happen together run in one [`Tx`]:
//!
//! ```ignore
//! let mut tx = Tx::begin(repo.pool()).await?;
//! let order = repo.insert_order(&mut tx, &new_order, &[3, 4]).await?;
//! repo.update_order_status(&mut tx, order.id, status::CONFIRMED).await?;
//! tx.commit().await?;
//! ```
//!
//! A `Tx` dropped without `commit` rolls back.

pub mod error;
pub mod migration;
pub mod order_repository;
pub mod tx;

pub use error::{SqlxErrorExt, SqlxResult};
pub use migration::{run_migrations, MIGRATOR};
pub use order_repository::OrderRepository;
pub use tx::{HasPool, Tx};

/// Re-exports of the most commonly used types from both `rental-data` and this crate.
pub mod prelude {
    pub use crate::{HasPool, OrderRepository, SqlxErrorExt, Tx};
    pub use rental_data::prelude::*;
}
