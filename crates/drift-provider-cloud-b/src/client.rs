//! The seam between the collector and cloud-b's control plane.

use async_trait::async_trait;
use drift_core::{Resource, Result};

#[async_trait]
pub trait CloudBClient: Send + Sync {
    /// List every resource in `project_id`/`region`. A 403-equivalent
    /// failure should be surfaced as `drift_core::Error::permission_denied`
    /// with the offending API name in the message.
    async fn list(&self, project_id: &str, region: &str) -> Result<Vec<Resource>>;
}

/// Talks to cloud-b's real resource-manager endpoint over HTTPS.
pub mod live {
    use super::*;
    use drift_core::Error;
    use reqwest::{Client as HttpClient, StatusCode};
    use serde::Deserialize;
    use url::Url;

    #[derive(Deserialize)]
    struct ResourceListResponse {
        items: Vec<Resource>,
    }

    /// HTTP-backed `CloudBClient`. `base_url` points at the resource-manager
    /// root, e.g. `https://resourcemanager.cloud-b.example`.
    pub struct LiveCloudBClient {
        http: HttpClient,
        base_url: Url,
    }

    impl LiveCloudBClient {
        pub fn new(base_url: Url) -> Self {
            let http = HttpClient::builder()
                .user_agent(concat!("drift-kit/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("failed to build cloud-b HTTP client");
            Self { http, base_url }
        }
    }

    #[async_trait]
    impl CloudBClient for LiveCloudBClient {
        async fn list(&self, project_id: &str, region: &str) -> Result<Vec<Resource>> {
            let path = format!("/v1/projects/{project_id}/regions/{region}/resources");
            let url = self.base_url.join(&path).map_err(|e| {
                Error::provider_error(format!("invalid cloud-b resource path: {e}"))
                    .with_provider(drift_core::providers::CLOUD_B)
            })?;

            let response = self.http.get(url).send().await.map_err(|e| {
                let kind = if e.is_timeout() {
                    drift_core::ErrorKind::Timeout
                } else {
                    drift_core::ErrorKind::Network
                };
                Error::new(kind, format!("cloud-b request failed: {e}"))
                    .with_provider(drift_core::providers::CLOUD_B)
            })?;

            let status = response.status();
            if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
                return Err(Error::permission_denied(format!(
                    "cloud-b denied access to resourcemanager.list in project {project_id}"
                ))
                .with_provider(drift_core::providers::CLOUD_B));
            }
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                return Err(Error::new(drift_core::ErrorKind::Network, format!("cloud-b returned {status}"))
                    .with_provider(drift_core::providers::CLOUD_B));
            }
            if !status.is_success() {
                return Err(Error::provider_error(format!("cloud-b returned {status}"))
                    .with_provider(drift_core::providers::CLOUD_B));
            }

            let body: ResourceListResponse = response.json().await.map_err(|e| {
                Error::provider_error(format!("invalid cloud-b response body: {e}"))
                    .with_provider(drift_core::providers::CLOUD_B)
            })?;
            Ok(body.items)
        }
    }
}

pub mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeCloudBClient {
        objects: Mutex<HashMap<(String, String), Vec<Resource>>>,
        denied: Mutex<HashMap<(String, String), String>>,
        failing: Mutex<HashMap<(String, String), String>>,
    }

    impl FakeCloudBClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seed(&self, project_id: &str, region: &str, resources: Vec<Resource>) {
            self.objects
                .lock()
                .unwrap()
                .insert((project_id.to_string(), region.to_string()), resources);
        }

        pub fn deny(&self, project_id: &str, region: &str, api_name: &str) {
            self.denied
                .lock()
                .unwrap()
                .insert((project_id.to_string(), region.to_string()), api_name.to_string());
        }

        /// Makes `list` return a non-permission, transient-style failure
        /// for `(project_id, region)` -- the kind recorded as a partial
        /// failure rather than aborting the whole collect.
        pub fn fail(&self, project_id: &str, region: &str, reason: &str) {
            self.failing
                .lock()
                .unwrap()
                .insert((project_id.to_string(), region.to_string()), reason.to_string());
        }
    }

    #[async_trait]
    impl CloudBClient for FakeCloudBClient {
        async fn list(&self, project_id: &str, region: &str) -> Result<Vec<Resource>> {
            let key = (project_id.to_string(), region.to_string());
            if let Some(api_name) = self.denied.lock().unwrap().get(&key) {
                return Err(drift_core::Error::permission_denied(format!(
                    "permission denied calling {api_name}"
                ))
                .with_provider(drift_core::providers::CLOUD_B));
            }
            if let Some(reason) = self.failing.lock().unwrap().get(&key) {
                return Err(drift_core::Error::provider_error(reason.clone())
                    .with_provider(drift_core::providers::CLOUD_B));
            }
            Ok(self.objects.lock().unwrap().get(&key).cloned().unwrap_or_default())
        }
    }
}
