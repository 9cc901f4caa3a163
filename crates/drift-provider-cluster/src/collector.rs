//! The cluster collector: lists workload, network, and config objects
//! across namespaces via a pluggable `ClusterClient`.

use crate::client::ClusterClient;
use crate::kind::ResourceKind;
use crate::kubeconfig;
use async_trait::async_trait;
use drift_collector::{Collector, CollectorConfig, CollectorStatus};
use drift_core::{providers, Error, Resource, Result, Snapshot};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Name of the kubectl-compatible CLI this collector expects to be present.
/// Only used for the `status()` probe; `collect()` never shells out to it --
/// it goes through `ClusterClient` instead.
const CLIENT_TOOL: &str = "kubectl";

pub struct ClusterCollector {
    client: Arc<dyn ClusterClient>,
}

impl ClusterCollector {
    pub fn new(client: Arc<dyn ClusterClient>) -> Self {
        Self { client }
    }

    /// `true` iff an executable named `CLIENT_TOOL` is resolvable on `PATH`.
    /// Pure filesystem check -- no subprocess spawn, no network.
    fn client_tool_on_path() -> bool {
        let Some(path_var) = std::env::var_os("PATH") else {
            return false;
        };
        std::env::split_paths(&path_var).any(|dir| {
            let candidate = dir.join(CLIENT_TOOL);
            candidate.is_file()
        })
    }
}

#[async_trait]
impl Collector for ClusterCollector {
    fn name(&self) -> &'static str {
        providers::CLUSTER
    }

    fn status(&self) -> CollectorStatus {
        if Self::client_tool_on_path() {
            CollectorStatus::Ready
        } else {
            CollectorStatus::Unavailable {
                reason: format!("{CLIENT_TOOL} not found on PATH"),
            }
        }
    }

    async fn auto_discover(&self) -> Result<CollectorConfig> {
        let path = kubeconfig::default_path().ok_or_else(|| {
            Error::not_found("could not resolve a home directory to locate ~/.kube/config")
                .with_provider(providers::CLUSTER)
        })?;
        let config = kubeconfig::load(&path).ok_or_else(|| {
            Error::not_found(format!("no readable kubeconfig at {}", path.display()))
                .with_provider(providers::CLUSTER)
                .with_solutions(["pass --context explicitly, or set up ~/.kube/config"])
        })?;
        let context = config.current_context.ok_or_else(|| {
            Error::not_found("kubeconfig has no current-context set").with_provider(providers::CLUSTER)
        })?;
        Ok(CollectorConfig {
            contexts: vec![context],
            ..CollectorConfig::default()
        })
    }

    async fn validate(&self, config: &CollectorConfig) -> Result<()> {
        if config.contexts.is_empty() {
            return Err(Error::validation("cluster collector requires at least one context")
                .with_provider(providers::CLUSTER)
                .with_solutions(["set CollectorConfig.contexts, or call auto_discover() first"]));
        }
        Ok(())
    }

    async fn collect(&self, cancel: CancellationToken, config: &CollectorConfig) -> Result<Snapshot> {
        self.validate(config).await?;

        let mut resources = Vec::new();
        for context in &config.contexts {
            let namespaces = if config.namespaces.is_empty() {
                self.client.namespaces(context).await?
            } else {
                config.namespaces.clone()
            };

            for namespace in &namespaces {
                for kind in ResourceKind::ALL {
                    if cancel.is_cancelled() {
                        return Err(Error::timeout("cluster collection cancelled"));
                    }
                    let objects = self.client.list(context, namespace, kind).await?;
                    resources.extend(tag_with_type(objects, kind));
                }
            }
        }
        resources.sort_by(|a, b| a.key().cmp(&b.key()));

        let id = format!("{}-{}", providers::CLUSTER, config.contexts.join("+"));
        Ok(Snapshot::new(id, providers::CLUSTER, resources))
    }
}

/// The client double/implementation returns objects with whatever
/// `resource_type` it likes; normalize it to the closed kind's type tag so
/// severity/category rules in the diff engine are consistent regardless of
/// which `ClusterClient` produced the data.
fn tag_with_type(objects: Vec<Resource>, kind: ResourceKind) -> Vec<Resource> {
    objects
        .into_iter()
        .map(|mut resource| {
            resource.resource_type = kind.type_tag().to_string();
            resource
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeClusterClient;
    use std::collections::HashMap;

    fn resource(id: &str) -> Resource {
        Resource {
            id: id.to_string(),
            resource_type: "placeholder".to_string(),
            name: id.to_string(),
            provider: providers::CLUSTER.to_string(),
            region: String::new(),
            namespace: "default".to_string(),
            configuration: HashMap::new(),
            metadata: HashMap::new(),
            tags: HashMap::new(),
            dependencies: Vec::new(),
        }
    }

    #[tokio::test]
    async fn collect_normalizes_resource_type_to_the_kind_tag() {
        let fake = Arc::new(FakeClusterClient::new());
        fake.seed("default", ResourceKind::Deployment, vec![resource("web")]);
        fake.seed_namespaces("ctx", vec!["default".to_string()]);

        let collector = ClusterCollector::new(fake);
        let config = CollectorConfig {
            contexts: vec!["ctx".to_string()],
            ..CollectorConfig::default()
        };

        let snapshot = collector.collect(CancellationToken::new(), &config).await.unwrap();
        assert_eq!(snapshot.resources.len(), 1);
        assert_eq!(snapshot.resources[0].resource_type, "workload.deployment");
    }

    #[tokio::test]
    async fn validate_rejects_a_config_with_no_contexts() {
        let collector = ClusterCollector::new(Arc::new(FakeClusterClient::new()));
        assert!(collector.validate(&CollectorConfig::default()).await.is_err());
    }

    #[tokio::test]
    async fn collect_respects_an_explicit_namespace_list_over_discovery() {
        let fake = Arc::new(FakeClusterClient::new());
        fake.seed("prod", ResourceKind::Service, vec![resource("svc")]);
        fake.seed_namespaces("ctx", vec!["default".to_string()]);

        let collector = ClusterCollector::new(fake);
        let config = CollectorConfig {
            contexts: vec!["ctx".to_string()],
            namespaces: vec!["prod".to_string()],
            ..CollectorConfig::default()
        };

        let snapshot = collector.collect(CancellationToken::new(), &config).await.unwrap();
        assert_eq!(snapshot.resources.len(), 1);
        assert_eq!(snapshot.resources[0].namespace, "default");
    }
}
