//! Cloud-a collector: single-region-per-invocation control-plane inventory
//! over a closed service set, with standard credential-chain resolution
//! (environment, named profile, instance role) and exponential backoff on
//! retryable errors.

pub mod backoff;
pub mod client;
pub mod collector;
pub mod credentials;

pub use client::live::LiveCloudAClient;
pub use client::{CloudAClient, CloudAService};
pub use collector::CloudACollector;
pub use credentials::Credentials;
