use drift_core::{Resource, RiskLevel, Severity};
use std::collections::HashMap;

fn resource(id: &str) -> Resource {
    Resource {
        id: id.to_string(),
        resource_type: "compute.instance".to_string(),
        name: "web-1".to_string(),
        provider: "cloud-a".to_string(),
        region: "us-east-1".to_string(),
        namespace: String::new(),
        configuration: HashMap::new(),
        metadata: HashMap::new(),
        tags: HashMap::new(),
        dependencies: Vec::new(),
    }
}

#[test]
fn resource_key_is_stable_for_same_identity() {
    let a = resource("i-1");
    let b = resource("i-1");
    assert_eq!(a.key(), b.key());
}

#[test]
fn resource_key_differs_on_id() {
    let a = resource("i-1");
    let b = resource("i-2");
    assert_ne!(a.key(), b.key());
}

#[test]
fn severity_orders_low_to_critical() {
    assert!(Severity::Low < Severity::Medium);
    assert!(Severity::Medium < Severity::High);
    assert!(Severity::High < Severity::Critical);
}

#[test]
fn risk_bucket_boundaries_match_spec() {
    assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(0.24), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(0.25), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(0.49), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(0.5), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(0.74), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(0.75), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_score(1.0), RiskLevel::Critical);
}

#[test]
fn snapshot_roundtrips_through_json() {
    let snap = drift_core::Snapshot::new("snap-1".into(), "cloud-a", vec![resource("i-1")]);
    let json = serde_json::to_string(&snap).unwrap();
    let back: drift_core::Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, snap.id);
    assert_eq!(back.resources.len(), 1);
}
