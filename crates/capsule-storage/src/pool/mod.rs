//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use capsule_core::config::StorageConfig;
use capsule_core::errors::CapsuleResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    pub fn open(path: &Path, config: &StorageConfig) -> CapsuleResult<Self> {
        let writer = WriteConnection::open(path, config)?;
        let readers = ReadPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory connection pool (for testing).
    /// In-memory readers are separate databases and never see the writer's
    /// changes, so callers route reads through the writer.
    pub fn open_in_memory(config: &StorageConfig) -> CapsuleResult<Self> {
        let writer = WriteConnection::open_in_memory(config)?;
        let readers = ReadPool::open_in_memory(1, config.busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers,
            db_path: None,
        })
    }
}
