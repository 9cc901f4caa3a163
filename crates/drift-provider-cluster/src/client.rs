//! The seam between the collector and an actual cluster API. Kept trait-
//! based so tests exercise the collector's grouping/tagging logic against
//! an in-memory double instead of a live cluster.

use crate::kind::ResourceKind;
use async_trait::async_trait;
use drift_core::{Resource, Result};

#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// List every object of `kind` in `namespace`. An empty result is not
    /// an error -- most kinds are absent from most namespaces.
    async fn list(&self, context: &str, namespace: &str, kind: ResourceKind) -> Result<Vec<Resource>>;

    /// Namespaces visible under `context`, used when the caller supplies
    /// none explicitly.
    async fn namespaces(&self, context: &str) -> Result<Vec<String>>;
}

/// An in-memory `ClusterClient` for tests: namespace -> kind -> resources,
/// seeded directly by the caller.
pub mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeClusterClient {
        objects: Mutex<HashMap<(String, ResourceKind), Vec<Resource>>>,
        namespaces_by_context: Mutex<HashMap<String, Vec<String>>>,
    }

    impl FakeClusterClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seed(&self, namespace: &str, kind: ResourceKind, resources: Vec<Resource>) {
            self.objects
                .lock()
                .unwrap()
                .insert((namespace.to_string(), kind), resources);
        }

        pub fn seed_namespaces(&self, context: &str, namespaces: Vec<String>) {
            self.namespaces_by_context
                .lock()
                .unwrap()
                .insert(context.to_string(), namespaces);
        }
    }

    #[async_trait]
    impl ClusterClient for FakeClusterClient {
        async fn list(&self, _context: &str, namespace: &str, kind: ResourceKind) -> Result<Vec<Resource>> {
            Ok(self
                .objects
                .lock()
                .unwrap()
                .get(&(namespace.to_string(), kind))
                .cloned()
                .unwrap_or_default())
        }

        async fn namespaces(&self, context: &str) -> Result<Vec<String>> {
            Ok(self
                .namespaces_by_context
                .lock()
                .unwrap()
                .get(context)
                .cloned()
                .unwrap_or_else(|| vec!["default".to_string()]))
        }
    }
}
