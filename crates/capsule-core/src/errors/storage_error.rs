/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("transaction rolled back: {reason}")]
    TransactionFailed { reason: String },

    #[error("stored row is malformed: {details}")]
    CorruptRow { details: String },
}
