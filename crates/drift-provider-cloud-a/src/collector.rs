//! The cloud-a collector: one region per invocation, a closed service set,
//! standard credential-chain resolution, and exponential backoff on
//! retryable errors.

use crate::backoff::{self, BackoffPolicy};
use crate::client::{CloudAClient, CloudAService};
use crate::credentials;
use async_trait::async_trait;
use drift_collector::{Collector, CollectorConfig, CollectorStatus};
use drift_core::{providers, Error, Resource, Result, Snapshot};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct CloudACollector {
    client: Arc<dyn CloudAClient>,
    backoff: BackoffPolicy,
}

impl CloudACollector {
    pub fn new(client: Arc<dyn CloudAClient>) -> Self {
        Self {
            client,
            backoff: BackoffPolicy::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }
}

#[async_trait]
impl Collector for CloudACollector {
    fn name(&self) -> &'static str {
        providers::CLOUD_A
    }

    fn status(&self) -> CollectorStatus {
        match credentials::resolve(None) {
            Some(_) => CollectorStatus::Ready,
            None => CollectorStatus::Unavailable {
                reason: "no credentials found in environment, profile, or instance role".to_string(),
            },
        }
    }

    async fn auto_discover(&self) -> Result<CollectorConfig> {
        let region = std::env::var("CLOUD_A_DEFAULT_REGION").map_err(|_| {
            Error::not_found("CLOUD_A_DEFAULT_REGION is not set and no default region is configured")
                .with_provider(providers::CLOUD_A)
                .with_solutions(["pass --region explicitly, or set CLOUD_A_DEFAULT_REGION"])
        })?;
        Ok(CollectorConfig {
            region: Some(region),
            ..CollectorConfig::default()
        })
    }

    async fn validate(&self, config: &CollectorConfig) -> Result<()> {
        if config.region.is_none() {
            return Err(Error::validation("cloud-a collector requires exactly one region")
                .with_provider(providers::CLOUD_A)
                .with_solutions(["set CollectorConfig.region"]));
        }
        if credentials::resolve(config.profile.as_deref()).is_none() {
            return Err(Error::permission_denied("no resolvable credentials for cloud-a")
                .with_provider(providers::CLOUD_A)
                .with_solutions([
                    "set CLOUD_A_ACCESS_KEY_ID/CLOUD_A_SECRET_ACCESS_KEY",
                    "or configure a named profile in ~/.cloud-a/credentials",
                ]));
        }
        Ok(())
    }

    async fn collect(&self, cancel: CancellationToken, config: &CollectorConfig) -> Result<Snapshot> {
        self.validate(config).await?;
        let region = config.region.clone().expect("validated above");

        let mut resources: Vec<Resource> = Vec::new();
        for service in CloudAService::ALL {
            if cancel.is_cancelled() {
                return Err(Error::timeout("cloud-a collection cancelled"));
            }
            let client = Arc::clone(&self.client);
            let listed = backoff::retry(self.backoff, || {
                let client = Arc::clone(&client);
                let region = region.clone();
                async move { client.list(&region, service).await }
            })
            .await?;
            resources.extend(tag_with_service(listed, service));
        }
        resources.sort_by(|a, b| a.key().cmp(&b.key()));

        let id = format!("{}-{}", providers::CLOUD_A, region);
        let mut snapshot = Snapshot::new(id, providers::CLOUD_A, resources);
        snapshot.metadata.insert("region".to_string(), region);
        Ok(snapshot)
    }
}

fn tag_with_service(resources: Vec<Resource>, service: CloudAService) -> Vec<Resource> {
    resources
        .into_iter()
        .map(|mut resource| {
            if !resource.resource_type.starts_with(service.type_prefix()) {
                resource.resource_type = format!("{}.{}", service.type_prefix(), resource.resource_type);
            }
            resource
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeCloudAClient;
    use drift_core::ErrorKind;
    use std::collections::HashMap;

    fn resource(id: &str, resource_type: &str) -> Resource {
        Resource {
            id: id.to_string(),
            resource_type: resource_type.to_string(),
            name: id.to_string(),
            provider: providers::CLOUD_A.to_string(),
            region: String::new(),
            namespace: String::new(),
            configuration: HashMap::new(),
            metadata: HashMap::new(),
            tags: HashMap::new(),
            dependencies: Vec::new(),
        }
    }

    #[tokio::test]
    async fn collect_tags_resources_with_their_service_prefix() {
        let _guard = crate::credentials::ENV_LOCK.lock().unwrap();
        let fake = Arc::new(FakeCloudAClient::new());
        fake.seed("us-east-1", CloudAService::Compute, vec![resource("i-1", "instance")]);

        let collector = CloudACollector::new(fake);
        let config = CollectorConfig {
            region: Some("us-east-1".to_string()),
            ..CollectorConfig::default()
        };
        std::env::set_var("CLOUD_A_INSTANCE_ROLE", "1");

        let snapshot = collector.collect(CancellationToken::new(), &config).await.unwrap();
        std::env::remove_var("CLOUD_A_INSTANCE_ROLE");

        assert_eq!(snapshot.resources.len(), 1);
        assert_eq!(snapshot.resources[0].resource_type, "compute.instance");
        assert_eq!(snapshot.metadata.get("region").map(String::as_str), Some("us-east-1"));
    }

    #[tokio::test]
    async fn collect_recovers_from_a_transient_error_via_backoff() {
        let _guard = crate::credentials::ENV_LOCK.lock().unwrap();
        let fake = Arc::new(FakeCloudAClient::new());
        fake.fail_first("us-east-1", CloudAService::Compute, 1, ErrorKind::Network);
        fake.seed("us-east-1", CloudAService::Compute, vec![resource("i-1", "instance")]);

        let collector = CloudACollector::new(fake).with_backoff(BackoffPolicy {
            max_attempts: 2,
            base_delay: std::time::Duration::from_millis(1),
        });
        let config = CollectorConfig {
            region: Some("us-east-1".to_string()),
            ..CollectorConfig::default()
        };
        std::env::set_var("CLOUD_A_INSTANCE_ROLE", "1");
        let snapshot = collector.collect(CancellationToken::new(), &config).await.unwrap();
        std::env::remove_var("CLOUD_A_INSTANCE_ROLE");

        assert_eq!(snapshot.resources.len(), 1);
    }

    #[tokio::test]
    async fn validate_requires_a_single_region() {
        let collector = CloudACollector::new(Arc::new(FakeCloudAClient::new()));
        let result = collector.validate(&CollectorConfig::default()).await;
        assert!(result.is_err());
    }
}
