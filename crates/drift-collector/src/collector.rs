//! The polymorphic surface every provider implements.

use crate::config::CollectorConfig;
use async_trait::async_trait;
use drift_core::{Result, Snapshot};
use tokio_util::sync::CancellationToken;

/// Local readiness of a collector, computed without network I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorStatus {
    Ready,
    Degraded { reason: String },
    Unavailable { reason: String },
}

impl CollectorStatus {
    pub fn is_usable(&self) -> bool {
        !matches!(self, CollectorStatus::Unavailable { .. })
    }
}

/// A source of resources: local state files, a cluster API, or a cloud
/// control plane. Every provider implements this in full; `collect_separate`
/// is the only optional method, used by providers whose single invocation
/// spans logically distinct roots (multi-root local state).
#[async_trait]
pub trait Collector: Send + Sync {
    /// Stable provider tag (`drift_core::providers::*`).
    fn name(&self) -> &'static str;

    /// Local prerequisite check: tool availability, credential presence.
    /// Never performs network I/O.
    fn status(&self) -> CollectorStatus;

    /// Infer a `CollectorConfig` from the environment (located state files,
    /// default cluster context, default region), or fail with
    /// `ErrorKind::NotFound` if nothing usable was found.
    async fn auto_discover(&self) -> Result<CollectorConfig>;

    /// Structural and semantic validation of a config before `collect` is
    /// attempted: missing project, missing region, missing credentials,
    /// unreachable endpoint are all reported here with a provider-scoped
    /// error rather than surfacing as a generic failure mid-collection.
    async fn validate(&self, config: &CollectorConfig) -> Result<()>;

    /// Gather a single `Snapshot`. Honors `cancel` at every I/O boundary;
    /// on cancellation no partial snapshot is returned to the caller.
    async fn collect(&self, cancel: CancellationToken, config: &CollectorConfig)
        -> Result<Snapshot>;

    /// Gather an ordered sequence of `Snapshot`s when one invocation spans
    /// multiple logical roots. Each output carries `codebase=<name>` in its
    /// metadata. Defaults to a single-element sequence from `collect`.
    async fn collect_separate(
        &self,
        cancel: CancellationToken,
        config: &CollectorConfig,
    ) -> Result<Vec<Snapshot>> {
        Ok(vec![self.collect(cancel, config).await?])
    }
}
