pub mod fs;

use crate::app::Result;

pub use fs::FsSeenStore;

/// Write-once record of which entry identifiers have been delivered.
pub trait SeenStore {
    /// Whether a marker exists for `id`. A missing marker is `Ok(false)`.
    fn lookup(&self, id: &str) -> Result<bool>;

    /// Create the marker for `id`; calling twice overwrites the payload.
    fn record_seen(&self, id: &str, payload: &str) -> Result<()>;

    /// Fail-open presence check.
    ///
    /// Any storage error other than "not found" is logged and reported as
    /// unseen: a read glitch may cause a duplicate email, never a lost one.
    fn has_seen(&self, id: &str) -> bool {
        match self.lookup(id) {
            Ok(seen) => seen,
            Err(e) => {
                tracing::warn!("Treating {} as unseen after storage error: {}", id, e);
                false
            }
        }
    }
}
