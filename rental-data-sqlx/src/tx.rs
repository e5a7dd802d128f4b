//! Transaction wrapper with explicit commit and rollback-on-drop.
//!
//! Provides [`Tx`], [`HasPool`], and a blanket [`ManagedResource`] implementation
//! so handlers can scope a transaction to one request.

use rental_core::error::HttpError;
use rental_core::managed::{ManagedError, ManagedResource};
use sqlx::{Database, Pool, Transaction};
use std::ops::{Deref, DerefMut};

use crate::error::{SqlxErrorExt, SqlxResult};

/// Trait for application states that contain a database pool.
///
/// ```ignore
/// impl HasPool<Sqlite> for AppState {
///     fn pool(&self) -> &Pool<Sqlite> {
///         &self.pool
///     }
/// }
/// ```
pub trait HasPool<DB: Database> {
    fn pool(&self) -> &Pool<DB>;
}

impl<DB: Database> HasPool<DB> for Pool<DB> {
    fn pool(&self) -> &Pool<DB> {
        self
    }
}

/// A wrapper around SQLx [`Transaction`].
///
/// The transaction is rolled back when the wrapper is dropped without a
/// successful [`Tx::commit`], so every early return or `?` leaves the store
/// untouched.
///
/// ```ignore
/// let mut tx = Tx::begin(&pool).await?;
/// sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
///     .bind(status)
///     .bind(id)
///     .execute(tx.as_mut())
///     .await
///     .map_err(SqlxErrorExt::into_data_error)?;
/// tx.commit().await?;
/// ```
pub struct Tx<'a, DB: Database>(pub Transaction<'a, DB>);

impl<'a, DB: Database> Deref for Tx<'a, DB> {
    type Target = Transaction<'a, DB>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, DB: Database> DerefMut for Tx<'a, DB> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<DB: Database> Tx<'static, DB> {
    /// Begin a new transaction on a connection taken from the pool.
    pub async fn begin(pool: &Pool<DB>) -> SqlxResult<Self> {
        let tx = pool.begin().await.map_err(SqlxErrorExt::into_data_error)?;
        Ok(Tx(tx))
    }
}

impl<'a, DB: Database> Tx<'a, DB> {
    /// Unwraps the `Tx` into the inner `Transaction`.
    pub fn into_inner(self) -> Transaction<'a, DB> {
        self.0
    }

    /// Returns a mutable reference to the underlying connection.
    pub fn as_mut(&mut self) -> &mut <DB as Database>::Connection {
        &mut *self.0
    }

    /// Commit all work done in this transaction.
    pub async fn commit(self) -> SqlxResult<()> {
        self.0.commit().await.map_err(SqlxErrorExt::into_data_error)
    }

    /// Roll back explicitly. Dropping the `Tx` has the same effect.
    pub async fn rollback(self) -> SqlxResult<()> {
        self.0.rollback().await.map_err(SqlxErrorExt::into_data_error)
    }
}

/// Request-scoped transaction lifecycle for `Tx`.
///
/// - `acquire`: begins a new transaction from the pool
/// - `release(true)`: commits the transaction
/// - `release(false)`: drops the transaction (automatic rollback)
impl<S, DB> ManagedResource<S> for Tx<'static, DB>
where
    DB: Database,
    S: HasPool<DB> + Send + Sync,
{
    type Error = ManagedError;

    async fn acquire(state: &S) -> Result<Self, Self::Error> {
        let tx = state
            .pool()
            .begin()
            .await
            .map_err(|e| ManagedError(HttpError::Internal(e.to_string())))?;
        Ok(Tx(tx))
    }

    async fn release(self, success: bool) -> Result<(), Self::Error> {
        if success {
            self.into_inner()
                .commit()
                .await
                .map_err(|e| ManagedError(HttpError::Internal(e.to_string())))?;
        } else {
            tracing::debug!("releasing failed transaction, rolling back");
        }
        Ok(())
    }
}
