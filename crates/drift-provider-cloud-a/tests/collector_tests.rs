use drift_collector::{Collector, CollectorConfig};
use drift_provider_cloud_a::client::fake::FakeCloudAClient;
use drift_provider_cloud_a::client::CloudAService;
use drift_provider_cloud_a::CloudACollector;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn resource(id: &str, resource_type: &str) -> drift_core::Resource {
    drift_core::Resource {
        id: id.to_string(),
        resource_type: resource_type.to_string(),
        name: id.to_string(),
        provider: drift_core::providers::CLOUD_A.to_string(),
        region: String::new(),
        namespace: String::new(),
        configuration: HashMap::new(),
        metadata: HashMap::new(),
        tags: HashMap::new(),
        dependencies: Vec::new(),
    }
}

#[tokio::test]
async fn collect_spans_every_closed_service_in_one_region() {
    std::env::set_var("CLOUD_A_INSTANCE_ROLE", "1");

    let fake = Arc::new(FakeCloudAClient::new());
    fake.seed("eu-west-1", CloudAService::Compute, vec![resource("i-1", "instance")]);
    fake.seed("eu-west-1", CloudAService::Storage, vec![resource("b-1", "bucket")]);

    let collector = CloudACollector::new(fake);
    let config = CollectorConfig {
        region: Some("eu-west-1".to_string()),
        ..CollectorConfig::default()
    };

    let snapshot = collector.collect(CancellationToken::new(), &config).await.unwrap();
    std::env::remove_var("CLOUD_A_INSTANCE_ROLE");

    assert_eq!(snapshot.resources.len(), 2);
    let types: Vec<_> = snapshot.resources.iter().map(|r| r.resource_type.as_str()).collect();
    assert!(types.contains(&"compute.instance"));
    assert!(types.contains(&"storage.bucket"));
}
