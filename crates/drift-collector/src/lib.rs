//! The Collector Framework: the polymorphic surface over which local-state,
//! cluster, and cloud providers implement a uniform collection contract.

pub mod collector;
pub mod config;
pub mod registry;

pub use collector::{Collector, CollectorStatus};
pub use config::CollectorConfig;
pub use registry::Registry;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use drift_core::{Result, Snapshot};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    struct FakeCollector(&'static str, CollectorStatus);

    #[async_trait]
    impl Collector for FakeCollector {
        fn name(&self) -> &'static str {
            self.0
        }

        fn status(&self) -> CollectorStatus {
            self.1.clone()
        }

        async fn auto_discover(&self) -> Result<CollectorConfig> {
            Ok(CollectorConfig::default())
        }

        async fn validate(&self, _config: &CollectorConfig) -> Result<()> {
            Ok(())
        }

        async fn collect(
            &self,
            _cancel: CancellationToken,
            _config: &CollectorConfig,
        ) -> Result<Snapshot> {
            Ok(Snapshot::new("snap".into(), self.0, Vec::new()))
        }
    }

    #[test]
    fn registry_looks_up_by_name() {
        let mut registry = Registry::new();
        registry.register(Arc::new(FakeCollector("cloud-a", CollectorStatus::Ready)));
        assert!(registry.get("cloud-a").is_ok());
        assert!(registry.get("cloud-z").is_err());
    }

    #[test]
    fn registry_names_are_sorted() {
        let mut registry = Registry::new();
        registry.register(Arc::new(FakeCollector("cluster", CollectorStatus::Ready)));
        registry.register(Arc::new(FakeCollector("cloud-a", CollectorStatus::Ready)));
        assert_eq!(registry.names(), vec!["cloud-a", "cluster"]);
    }

    #[tokio::test]
    async fn collect_separate_defaults_to_single_snapshot() {
        let collector = FakeCollector("local-state", CollectorStatus::Ready);
        let snapshots = collector
            .collect_separate(CancellationToken::new(), &CollectorConfig::default())
            .await
            .unwrap();
        assert_eq!(snapshots.len(), 1);
    }
}
