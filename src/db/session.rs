//! Scoped database session
//!
//! One [`Session`] is one unit of work: a connection checked out of the
//! pool with a transaction begun on it. The happy path calls
//! [`Session::commit`]; every other exit path (error return, panic unwind,
//! task cancellation) drops the session, which rolls the transaction back
//! and returns the connection to the pool. A held connection can never leak
//! past the scope that acquired it.

use sqlx::{Sqlite, SqliteConnection, Transaction};

use crate::error::{AppError, AppResult};

/// A single begin/commit-or-rollback unit of work on one pooled connection.
#[derive(Debug)]
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    /// The executor to run statements against within this unit of work.
    pub fn executor(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Commit the transaction and release the connection back to the pool.
    pub async fn commit(self) -> AppResult<()> {
        self.tx.commit().await.map_err(AppError::from)
    }

    /// Roll back explicitly. Dropping the session has the same effect; this
    /// exists for callers that want to surface rollback errors.
    pub async fn rollback(self) -> AppResult<()> {
        self.tx.rollback().await.map_err(AppError::from)
    }
}
