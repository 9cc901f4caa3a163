//! The closed set of object kinds the cluster collector inventories.

use std::fmt;

/// A workload, network, or config kind recognized by the cluster collector.
/// Deliberately closed -- no arbitrary CRDs -- so severity/category rules in
/// the diff engine can key off `Resource::resource_type` without surprises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    StatefulSet,
    DaemonSet,
    Service,
    Ingress,
    NetworkPolicy,
    ConfigMap,
    Secret,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Deployment,
        ResourceKind::StatefulSet,
        ResourceKind::DaemonSet,
        ResourceKind::Service,
        ResourceKind::Ingress,
        ResourceKind::NetworkPolicy,
        ResourceKind::ConfigMap,
        ResourceKind::Secret,
    ];

    /// `resource_type` string stored on the normalized `Resource`.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "workload.deployment",
            ResourceKind::StatefulSet => "workload.statefulset",
            ResourceKind::DaemonSet => "workload.daemonset",
            ResourceKind::Service => "network.service",
            ResourceKind::Ingress => "network.ingress",
            ResourceKind::NetworkPolicy => "network.policy",
            ResourceKind::ConfigMap => "config.configmap",
            ResourceKind::Secret => "config.secret",
        }
    }

    pub fn api_kind(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::Service => "Service",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::NetworkPolicy => "NetworkPolicy",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_kind())
    }
}
