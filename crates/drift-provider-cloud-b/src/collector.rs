//! The cloud-b collector: project-scoped, optionally multi-region, with
//! ADC-style credential resolution and fail-fast `PermissionDenied`
//! handling (unlike other regional failures, which are recorded and
//! tolerated).

use crate::client::CloudBClient;
use crate::credentials;
use async_trait::async_trait;
use drift_collector::{Collector, CollectorConfig, CollectorStatus};
use drift_core::{meta_keys, providers, Error, ErrorKind, Resource, Result, Snapshot};
use futures::stream::{self, StreamExt};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const DEFAULT_REGION: &str = "global";

/// Regions are fetched concurrently, bounded by this worker count, so a
/// project with many regions does not open one connection per region.
const DEFAULT_REGION_CONCURRENCY: usize = 4;

pub struct CloudBCollector {
    client: Arc<dyn CloudBClient>,
}

impl CloudBCollector {
    pub fn new(client: Arc<dyn CloudBClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Collector for CloudBCollector {
    fn name(&self) -> &'static str {
        providers::CLOUD_B
    }

    fn status(&self) -> CollectorStatus {
        match credentials::resolve(None) {
            Some(_) => CollectorStatus::Ready,
            None => CollectorStatus::Unavailable {
                reason: "no Application Default Credentials or key file resolvable".to_string(),
            },
        }
    }

    async fn auto_discover(&self) -> Result<CollectorConfig> {
        let project_id = std::env::var("CLOUD_B_PROJECT_ID").map_err(|_| {
            Error::not_found("CLOUD_B_PROJECT_ID is not set")
                .with_provider(providers::CLOUD_B)
                .with_solutions(["pass --project explicitly, or set CLOUD_B_PROJECT_ID"])
        })?;
        Ok(CollectorConfig {
            project_id: Some(project_id),
            ..CollectorConfig::default()
        })
    }

    async fn validate(&self, config: &CollectorConfig) -> Result<()> {
        if config.project_id.is_none() {
            return Err(Error::validation("cloud-b collector requires an explicit project_id")
                .with_provider(providers::CLOUD_B)
                .with_solutions(["set CollectorConfig.project_id"]));
        }
        let credentials_file = config.credentials_file.as_deref();
        if credentials::resolve(credentials_file).is_none() {
            return Err(Error::permission_denied("no resolvable ADC or key-file credentials for cloud-b")
                .with_provider(providers::CLOUD_B)
                .with_solutions([
                    "set CLOUD_B_APPLICATION_CREDENTIALS, or pass --credentials-file",
                    "or place application_default_credentials.json in the standard ADC location",
                ]));
        }
        Ok(())
    }

    async fn collect(&self, cancel: CancellationToken, config: &CollectorConfig) -> Result<Snapshot> {
        self.validate(config).await?;
        let project_id = config.project_id.clone().expect("validated above");

        let regions = {
            let configured = config.regions();
            if configured.is_empty() {
                vec![DEFAULT_REGION.to_string()]
            } else {
                configured
            }
        };

        if cancel.is_cancelled() {
            return Err(Error::timeout("cloud-b collection cancelled"));
        }

        let outcomes: Vec<(String, Result<Vec<Resource>>)> = stream::iter(regions.clone())
            .map(|region| {
                let client = Arc::clone(&self.client);
                let project_id = project_id.clone();
                let cancel = cancel.clone();
                async move {
                    if cancel.is_cancelled() {
                        return (region, Err(Error::timeout("cloud-b collection cancelled")));
                    }
                    let outcome = client.list(&project_id, &region).await;
                    (region, outcome)
                }
            })
            .buffer_unordered(DEFAULT_REGION_CONCURRENCY)
            .collect()
            .await;

        let mut resources: Vec<Resource> = Vec::new();
        let mut partial_failures = Vec::new();

        for (region, outcome) in outcomes {
            match outcome {
                Ok(listed) => resources.extend(listed),
                Err(err) if err.kind == ErrorKind::PermissionDenied => return Err(err),
                Err(err) => partial_failures.push(json!({"region": region, "reason": err.message})),
            }
        }

        if !partial_failures.is_empty() && partial_failures.len() == regions.len() {
            return Err(Error::provider_error(format!(
                "all {} region(s) failed for project {project_id}",
                regions.len()
            ))
            .with_provider(providers::CLOUD_B));
        }

        resources.sort_by(|a, b| a.key().cmp(&b.key()));
        let id = format!("{}-{}", providers::CLOUD_B, project_id);
        let mut snapshot = Snapshot::new(id, providers::CLOUD_B, resources);
        if !partial_failures.is_empty() {
            snapshot.metadata.insert(
                meta_keys::PARTIAL_FAILURES.to_string(),
                serde_json::to_string(&partial_failures).unwrap_or_default(),
            );
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeCloudBClient;
    use std::collections::HashMap;

    fn resource(id: &str) -> Resource {
        Resource {
            id: id.to_string(),
            resource_type: "compute.instance".to_string(),
            name: id.to_string(),
            provider: providers::CLOUD_B.to_string(),
            region: String::new(),
            namespace: String::new(),
            configuration: HashMap::new(),
            metadata: HashMap::new(),
            tags: HashMap::new(),
            dependencies: Vec::new(),
        }
    }

    fn set_adc() {
        std::env::set_var("CLOUD_B_APPLICATION_CREDENTIALS", "/does/not/exist");
    }

    #[tokio::test]
    async fn permission_denied_on_any_region_aborts_the_whole_collect() {
        let _guard = crate::credentials::ENV_LOCK.lock().unwrap();
        let fake = Arc::new(FakeCloudBClient::new());
        fake.seed("proj-1", "us-central1", vec![resource("i-1")]);
        fake.deny("proj-1", "eu-west1", "compute.instances.list");

        let collector = CloudBCollector::new(fake);
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("key.json");
        std::fs::write(&key_path, "{}").unwrap();
        let config = CollectorConfig {
            project_id: Some("proj-1".to_string()),
            credentials_file: Some(key_path),
            regions: vec!["us-central1".to_string(), "eu-west1".to_string()],
            ..CollectorConfig::default()
        };

        let result = collector.collect(CancellationToken::new(), &config).await;
        assert!(matches!(result, Err(e) if e.kind == ErrorKind::PermissionDenied));
    }

    #[tokio::test]
    async fn a_failing_region_is_recorded_but_does_not_fail_the_scan_if_another_succeeds() {
        let _guard = crate::credentials::ENV_LOCK.lock().unwrap();
        let fake = Arc::new(FakeCloudBClient::new());
        fake.seed("proj-1", "us-central1", vec![resource("i-1")]);
        fake.fail("proj-1", "eu-west1", "endpoint unreachable");

        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("key.json");
        std::fs::write(&key_path, "{}").unwrap();

        let collector = CloudBCollector::new(fake);
        let config = CollectorConfig {
            project_id: Some("proj-1".to_string()),
            credentials_file: Some(key_path),
            regions: vec!["us-central1".to_string(), "eu-west1".to_string()],
            ..CollectorConfig::default()
        };

        let snapshot = collector.collect(CancellationToken::new(), &config).await.unwrap();
        assert_eq!(snapshot.resources.len(), 1);
        assert!(snapshot.metadata.contains_key(meta_keys::PARTIAL_FAILURES));
    }

    #[tokio::test]
    async fn every_region_failing_fails_the_whole_scan() {
        let _guard = crate::credentials::ENV_LOCK.lock().unwrap();
        let fake = Arc::new(FakeCloudBClient::new());
        fake.fail("proj-1", "us-central1", "endpoint unreachable");
        fake.fail("proj-1", "eu-west1", "endpoint unreachable");

        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("key.json");
        std::fs::write(&key_path, "{}").unwrap();

        let collector = CloudBCollector::new(fake);
        let config = CollectorConfig {
            project_id: Some("proj-1".to_string()),
            credentials_file: Some(key_path),
            regions: vec!["us-central1".to_string(), "eu-west1".to_string()],
            ..CollectorConfig::default()
        };

        let result = collector.collect(CancellationToken::new(), &config).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn validate_requires_an_explicit_project_id() {
        let _guard = crate::credentials::ENV_LOCK.lock().unwrap();
        set_adc();
        let collector = CloudBCollector::new(Arc::new(FakeCloudBClient::new()));
        let result = collector.validate(&CollectorConfig::default()).await;
        std::env::remove_var("CLOUD_B_APPLICATION_CREDENTIALS");
        assert!(result.is_err());
    }
}
