//! Cloud-b collector: project-scoped, optionally multi-region control-plane
//! inventory. Credentials resolve via ADC or an explicit key file; a
//! permission-denied response from any region aborts the whole scan rather
//! than being tolerated as a partial regional failure.

pub mod client;
pub mod collector;
pub mod credentials;

pub use client::live::LiveCloudBClient;
pub use client::CloudBClient;
pub use collector::CloudBCollector;
pub use credentials::Credentials;
