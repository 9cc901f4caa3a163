//! Cluster (Kubernetes-style) collector: inventories a closed set of
//! workload, network, and config kinds across namespaces via a pluggable
//! `ClusterClient`, with no live cluster dependency required to test it.

pub mod client;
pub mod collector;
pub mod kind;
pub mod kubeconfig;

pub use client::ClusterClient;
pub use collector::ClusterCollector;
pub use kind::ResourceKind;
