// ABOUTME: RAII transaction guard with explicit commit/rollback for multi-statement writes
// ABOUTME: A guard dropped without commit is rolled back by SQLx and logged for observability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rezepte Contributors

//! Transaction management with RAII guards
//!
//! ```text
//! let mut guard = TransactionGuard::new(pool.begin().await?);
//! sqlx::query("INSERT INTO recipes ...").execute(guard.executor()?).await?;
//! sqlx::query("INSERT INTO parts ...").execute(guard.executor()?).await?;
//! guard.commit().await?;
//! ```
//!
//! Failures are not retried: the caller rolls back and reports the error.

use sqlx::{Database as SqlxDatabase, Transaction};
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

/// RAII guard for database transactions ensuring rollback unless committed
///
/// `commit` and `rollback` consume the guard, so a transaction can be
/// resolved exactly once.
pub struct TransactionGuard<'c, DB: SqlxDatabase> {
    transaction: Option<Transaction<'c, DB>>,
    committed: bool,
}

impl<'c, DB: SqlxDatabase> TransactionGuard<'c, DB> {
    /// Wrap a transaction obtained from `pool.begin().await`
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>) -> Self {
        debug!("TransactionGuard created - transaction will auto-rollback if not committed");
        Self {
            transaction: Some(transaction),
            committed: false,
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already resolved or the commit fails
    pub async fn commit(mut self) -> AppResult<()> {
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed - cannot commit"))?;
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Transaction commit failed: {e}")))?;
        self.committed = true;
        debug!("TransactionGuard committed successfully");
        Ok(())
    }

    /// Explicitly roll back the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already resolved or the rollback fails
    pub async fn rollback(mut self) -> AppResult<()> {
        let tx = self
            .transaction
            .take()
            .ok_or_else(|| AppError::internal("Transaction already consumed - cannot rollback"))?;
        tx.rollback()
            .await
            .map_err(|e| AppError::database(format!("Transaction rollback failed: {e}")))?;
        debug!("TransactionGuard rolled back explicitly");
        Ok(())
    }

    /// Check if the transaction has been committed
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Connection to execute statements inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the guard is used after being resolved
    pub fn executor(&mut self) -> AppResult<&mut <DB as SqlxDatabase>::Connection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit/rollback")
        })
    }
}

impl<DB: SqlxDatabase> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() && !self.committed {
            warn!(
                "TransactionGuard dropped without commit - transaction will be rolled back automatically"
            );
        }
    }
}

/// Type alias for `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, sqlx::Sqlite>;

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;

    async fn pool_with_table() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("CREATE TABLE notes (body TEXT NOT NULL)")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_commit_persists() {
        let pool = pool_with_table().await;
        let mut guard = SqliteTransactionGuard::new(pool.begin().await.unwrap());
        sqlx::query("INSERT INTO notes (body) VALUES ('kept')")
            .execute(guard.executor().unwrap())
            .await
            .unwrap();
        guard.commit().await.unwrap();

        assert_eq!(count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_rollback_and_drop_discard() {
        let pool = pool_with_table().await;

        let mut guard = SqliteTransactionGuard::new(pool.begin().await.unwrap());
        sqlx::query("INSERT INTO notes (body) VALUES ('explicit')")
            .execute(guard.executor().unwrap())
            .await
            .unwrap();
        guard.rollback().await.unwrap();

        {
            let mut guard = SqliteTransactionGuard::new(pool.begin().await.unwrap());
            sqlx::query("INSERT INTO notes (body) VALUES ('dropped')")
                .execute(guard.executor().unwrap())
                .await
                .unwrap();
            assert!(!guard.is_committed());
        }

        assert_eq!(count(&pool).await, 0);
    }
}
