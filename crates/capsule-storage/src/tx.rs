//! BEGIN IMMEDIATE transactions for ledger appends.

use rusqlite::Connection;

use capsule_core::errors::{CapsuleError, CapsuleResult, StorageError};

/// Run `f` inside a BEGIN IMMEDIATE transaction.
///
/// The write lock is taken at BEGIN, so a concurrent writer on another
/// connection waits on busy_timeout instead of failing mid-transaction.
/// Any error from `f` or from COMMIT rolls the whole unit back.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> CapsuleResult<T>
where
    F: FnOnce(&Connection) -> CapsuleResult<T>,
{
    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| tx_err(format!("failed to begin immediate transaction: {e}")))?;

    let result = match f(conn) {
        Ok(value) => value,
        Err(e) => {
            rollback(conn);
            return Err(e);
        }
    };

    if let Err(e) = conn.execute_batch("COMMIT") {
        rollback(conn);
        return Err(tx_err(format!("failed to commit: {e}")));
    }
    Ok(result)
}

fn rollback(conn: &Connection) {
    if let Err(e) = conn.execute_batch("ROLLBACK") {
        tracing::warn!(error = %e, "rollback failed");
    }
}

fn tx_err(reason: String) -> CapsuleError {
    CapsuleError::StorageError(StorageError::TransactionFailed { reason })
}
