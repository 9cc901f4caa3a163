//! Chronological enumeration of snapshots, layered thinly over `Store`.

use crate::filter::SnapshotFilter;
use crate::store::Store;
use drift_core::{Error, Result, SnapshotInfo};

impl Store {
    /// Snapshot descriptors ordered oldest-first.
    pub fn timeline(&self, filter: &SnapshotFilter) -> Result<Vec<SnapshotInfo>> {
        self.list(filter)
    }

    /// Snapshot descriptors ordered newest-first.
    pub fn history(&self, filter: &SnapshotFilter) -> Result<Vec<SnapshotInfo>> {
        let mut infos = self.list(filter)?;
        infos.reverse();
        Ok(infos)
    }

    /// Descriptors strictly between two named baselines (inclusive),
    /// ordered oldest-first. Names resolve through `find_named_baseline`.
    pub fn between(&self, name_a: &str, name_b: &str, provider: Option<&str>) -> Result<Vec<SnapshotInfo>> {
        let a = self
            .find_named_baseline(name_a, provider)?
            .ok_or_else(|| Error::not_found(format!("no baseline named '{name_a}'")))?;
        let b = self
            .find_named_baseline(name_b, provider)?
            .ok_or_else(|| Error::not_found(format!("no baseline named '{name_b}'")))?;
        self.list_between(&a.id, &b.id)
    }
}
