//! The seam between the collector and cloud-a's control plane.

use async_trait::async_trait;
use drift_core::{Resource, Result};

/// The closed set of services cloud-a inventories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloudAService {
    Compute,
    Storage,
    Identity,
}

impl CloudAService {
    pub const ALL: [CloudAService; 3] = [CloudAService::Compute, CloudAService::Storage, CloudAService::Identity];

    pub fn type_prefix(&self) -> &'static str {
        match self {
            CloudAService::Compute => "compute",
            CloudAService::Storage => "storage",
            CloudAService::Identity => "identity",
        }
    }
}

#[async_trait]
pub trait CloudAClient: Send + Sync {
    /// List resources for one service in `region`. Implementations apply
    /// their own pagination internally and return the full, assembled list.
    async fn list(&self, region: &str, service: CloudAService) -> Result<Vec<Resource>>;
}

/// Talks to cloud-a's real control-plane endpoint over HTTPS. Each region
/// gets its own base URL by substitution, matching the service's
/// `https://<service>.<region>.cloud-a.example/` convention.
pub mod live {
    use super::*;
    use drift_core::{Error, ErrorKind};
    use reqwest::{Client as HttpClient, StatusCode};
    use serde::Deserialize;
    use url::Url;

    #[derive(Deserialize)]
    struct ResourceListResponse {
        items: Vec<Resource>,
    }

    /// HTTP-backed `CloudAClient`. `endpoint_template` is expected to contain
    /// `{service}` and `{region}` placeholders, e.g.
    /// `https://{service}.{region}.cloud-a.example`.
    pub struct LiveCloudAClient {
        http: HttpClient,
        endpoint_template: String,
    }

    impl LiveCloudAClient {
        pub fn new(endpoint_template: impl Into<String>) -> Self {
            let http = HttpClient::builder()
                .user_agent(concat!("drift-kit/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("failed to build cloud-a HTTP client");
            Self {
                http,
                endpoint_template: endpoint_template.into(),
            }
        }

        fn base_url(&self, region: &str, service: CloudAService) -> Result<Url> {
            let raw = self
                .endpoint_template
                .replace("{service}", service.type_prefix())
                .replace("{region}", region);
            Url::parse(&raw).map_err(|e| {
                Error::provider_error(format!("invalid cloud-a endpoint '{raw}': {e}"))
                    .with_provider("cloud-a")
            })
        }
    }

    #[async_trait]
    impl CloudAClient for LiveCloudAClient {
        async fn list(&self, region: &str, service: CloudAService) -> Result<Vec<Resource>> {
            let base = self.base_url(region, service)?;
            let url = base.join("/v1/resources").map_err(|e| {
                Error::provider_error(format!("invalid cloud-a resource path: {e}")).with_provider("cloud-a")
            })?;

            let response = self.http.get(url).send().await.map_err(|e| {
                let kind = if e.is_timeout() { ErrorKind::Timeout } else { ErrorKind::Network };
                Error::new(kind, format!("cloud-a request failed: {e}")).with_provider("cloud-a")
            })?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                return Err(Error::new(ErrorKind::Network, format!("cloud-a returned {status}"))
                    .with_provider("cloud-a"));
            }
            if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
                return Err(Error::permission_denied(format!(
                    "cloud-a denied access to {} in {region}",
                    service.type_prefix()
                ))
                .with_provider("cloud-a"));
            }
            if !status.is_success() {
                return Err(Error::provider_error(format!("cloud-a returned {status}")).with_provider("cloud-a"));
            }

            let body: ResourceListResponse = response
                .json()
                .await
                .map_err(|e| Error::provider_error(format!("invalid cloud-a response body: {e}")).with_provider("cloud-a"))?;
            Ok(body.items)
        }
    }
}

pub mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeCloudAClient {
        objects: Mutex<HashMap<(String, CloudAService), Vec<Resource>>>,
        fail_until_attempt: Mutex<HashMap<(String, CloudAService), (u32, drift_core::ErrorKind)>>,
    }

    impl FakeCloudAClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seed(&self, region: &str, service: CloudAService, resources: Vec<Resource>) {
            self.objects.lock().unwrap().insert((region.to_string(), service), resources);
        }

        /// Makes `list` fail with `kind` for the first `count` calls against
        /// `(region, service)`, then succeed from whatever was seeded.
        pub fn fail_first(&self, region: &str, service: CloudAService, count: u32, kind: drift_core::ErrorKind) {
            self.fail_until_attempt
                .lock()
                .unwrap()
                .insert((region.to_string(), service), (count, kind));
        }
    }

    #[async_trait]
    impl CloudAClient for FakeCloudAClient {
        async fn list(&self, region: &str, service: CloudAService) -> Result<Vec<Resource>> {
            let key = (region.to_string(), service);
            if let Some(remaining) = self.fail_until_attempt.lock().unwrap().get_mut(&key) {
                if remaining.0 > 0 {
                    remaining.0 -= 1;
                    return Err(drift_core::Error::new(remaining.1, "simulated failure"));
                }
            }
            Ok(self.objects.lock().unwrap().get(&key).cloned().unwrap_or_default())
        }
    }
}
