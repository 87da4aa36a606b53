mod capsule_error;
mod storage_error;

pub use capsule_error::{CapsuleError, CapsuleResult, ErrorClass};
pub use storage_error::StorageError;
