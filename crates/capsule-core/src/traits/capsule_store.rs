use crate::errors::CapsuleResult;
use crate::models::{CapsuleSnapshot, CapsuleUpdate};

/// The capsule collaborator: owns capsule content, exposes lookups and
/// counter/score write-back.
pub trait ICapsuleStore: Send + Sync {
    fn get(&self, id: &str) -> CapsuleResult<Option<CapsuleSnapshot>>;

    /// Apply `update` to capsule `id`. Fails with `CapsuleNotFound` when absent.
    fn update(&self, id: &str, update: &CapsuleUpdate) -> CapsuleResult<()>;

    fn exists(&self, id: &str) -> CapsuleResult<bool> {
        Ok(self.get(id)?.is_some())
    }
}
