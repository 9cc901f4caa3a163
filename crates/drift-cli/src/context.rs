//! Process-wide values built once in `main` and threaded explicitly through
//! command handlers -- never stored as globals.

use drift_collector::Registry;
use drift_store::{Store, StoreConfig};
use std::sync::Arc;

pub struct AppContext {
    pub registry: Registry,
    pub store: Store,
}

impl AppContext {
    pub fn build(store_root: Option<std::path::PathBuf>) -> anyhow::Result<Self> {
        let store_config = match store_root {
            Some(root) => StoreConfig::new(root),
            None => StoreConfig::default()?,
        };
        let store = Store::new(store_config);

        let mut registry = Registry::new();
        registry.register(Arc::new(drift_provider_local::LocalStateCollector::new()));
        registry.register(Arc::new(drift_provider_cluster::ClusterCollector::new(Arc::new(
            LiveClusterClientUnavailable,
        ))));
        registry.register(Arc::new(drift_provider_cloud_a::CloudACollector::new(cloud_a_client())));
        registry.register(Arc::new(drift_provider_cloud_b::CloudBCollector::new(cloud_b_client())));

        Ok(Self { registry, store })
    }
}

/// Placeholder clients wired into the default registry: a real deployment
/// supplies a live `ClusterClient`/`CloudAClient`/`CloudBClient` (a kubectl-
/// backed implementation, an SDK-backed implementation, ...) in its own
/// binary target; `drift-cli` exercises the library surface without
/// depending on any one such backend.
struct LiveClusterClientUnavailable;

#[async_trait::async_trait]
impl drift_provider_cluster::ClusterClient for LiveClusterClientUnavailable {
    async fn list(
        &self,
        _context: &str,
        _namespace: &str,
        _kind: drift_provider_cluster::ResourceKind,
    ) -> drift_core::Result<Vec<drift_core::Resource>> {
        Err(unavailable("cluster"))
    }

    async fn namespaces(&self, _context: &str) -> drift_core::Result<Vec<String>> {
        Err(unavailable("cluster"))
    }
}

struct LiveCloudAClientUnavailable;

#[async_trait::async_trait]
impl drift_provider_cloud_a::CloudAClient for LiveCloudAClientUnavailable {
    async fn list(
        &self,
        _region: &str,
        _service: drift_provider_cloud_a::CloudAService,
    ) -> drift_core::Result<Vec<drift_core::Resource>> {
        Err(unavailable("cloud-a"))
    }
}

struct LiveCloudBClientUnavailable;

#[async_trait::async_trait]
impl drift_provider_cloud_b::CloudBClient for LiveCloudBClientUnavailable {
    async fn list(&self, _project_id: &str, _region: &str) -> drift_core::Result<Vec<drift_core::Resource>> {
        Err(unavailable("cloud-b"))
    }
}

fn unavailable(provider: &str) -> drift_core::Error {
    drift_core::Error::provider_error(format!("no live backend wired in for {provider} in this build"))
        .with_provider(provider)
}

/// Builds the cloud-a client for the default registry: a real HTTP-backed
/// client when `CLOUD_A_ENDPOINT_TEMPLATE` names an endpoint (with
/// `{service}`/`{region}` placeholders), otherwise a stub that reports the
/// provider as unavailable.
fn cloud_a_client() -> Arc<dyn drift_provider_cloud_a::CloudAClient> {
    match std::env::var("CLOUD_A_ENDPOINT_TEMPLATE") {
        Ok(template) => Arc::new(drift_provider_cloud_a::LiveCloudAClient::new(template)),
        Err(_) => Arc::new(LiveCloudAClientUnavailable),
    }
}

/// Builds the cloud-b client for the default registry: a real HTTP-backed
/// client when `CLOUD_B_ENDPOINT` names a valid base URL, otherwise a stub
/// that reports the provider as unavailable.
fn cloud_b_client() -> Arc<dyn drift_provider_cloud_b::CloudBClient> {
    match std::env::var("CLOUD_B_ENDPOINT").ok().and_then(|raw| url::Url::parse(&raw).ok()) {
        Some(base_url) => Arc::new(drift_provider_cloud_b::LiveCloudBClient::new(base_url)),
        None => Arc::new(LiveCloudBClientUnavailable),
    }
}
