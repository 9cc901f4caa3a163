use drift_collector::{Collector, CollectorConfig};
use drift_provider_cluster::client::fake::FakeClusterClient;
use drift_provider_cluster::{ClusterCollector, ResourceKind};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn resource(id: &str, namespace: &str) -> drift_core::Resource {
    drift_core::Resource {
        id: id.to_string(),
        resource_type: "placeholder".to_string(),
        name: id.to_string(),
        provider: drift_core::providers::CLUSTER.to_string(),
        region: String::new(),
        namespace: namespace.to_string(),
        configuration: HashMap::new(),
        metadata: HashMap::new(),
        tags: HashMap::new(),
        dependencies: Vec::new(),
    }
}

#[tokio::test]
async fn collect_spans_every_discovered_namespace_and_closed_kind() {
    let fake = Arc::new(FakeClusterClient::new());
    fake.seed_namespaces("ctx", vec!["team-a".to_string(), "team-b".to_string()]);
    fake.seed("team-a", ResourceKind::Deployment, vec![resource("app-a", "team-a")]);
    fake.seed("team-b", ResourceKind::Service, vec![resource("svc-b", "team-b")]);

    let collector = ClusterCollector::new(fake);
    let config = CollectorConfig {
        contexts: vec!["ctx".to_string()],
        ..CollectorConfig::default()
    };

    let snapshot = collector.collect(CancellationToken::new(), &config).await.unwrap();
    assert_eq!(snapshot.resources.len(), 2);
    let ids: Vec<_> = snapshot.resources.iter().map(|r| r.id.as_str()).collect();
    assert!(ids.contains(&"app-a"));
    assert!(ids.contains(&"svc-b"));
}
