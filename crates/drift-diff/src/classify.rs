//! Static lookup tables: field -> category, (category, change-kind) ->
//! severity, and (category, change-kind) -> risk weight.

use drift_core::{Category, ChangeKind, Severity};

/// Derive a field's category from its dotted path. Matching is by
/// substring on path segments, broadest-to-narrowest, mirroring the kind of
/// static field->category table a real collector inventory would ship per
/// resource type; here it is intentionally provider/type-agnostic so new
/// provider collectors need no changes to the diff engine.
pub fn categorize(field: &str) -> Category {
    let lower = field.to_ascii_lowercase();

    const SECURITY: &[&str] = &[
        "security_group",
        "firewall",
        "ingress",
        "egress",
        "cidr",
        "acl",
        "encryption",
        "kms",
        "tls",
        "certificate",
    ];
    const IDENTITY: &[&str] = &["iam", "role", "policy", "credential", "identity", "principal", "user", "service_account"];
    const NETWORK: &[&str] = &["vpc", "subnet", "network", "dns", "load_balancer", "route_table", "endpoint"];
    const COMPUTE: &[&str] = &["cpu", "memory", "instance_type", "size", "replicas", "image", "container"];
    const STORAGE: &[&str] = &["disk", "volume", "bucket", "storage", "snapshot_policy", "retention"];

    if lower.starts_with("tags.") || lower.starts_with("tags[") {
        return Category::Tag;
    }
    if lower.starts_with("metadata.") || lower.starts_with("metadata[") {
        return Category::Metadata;
    }
    if SECURITY.iter().any(|k| lower.contains(k)) {
        Category::Security
    } else if IDENTITY.iter().any(|k| lower.contains(k)) {
        Category::Identity
    } else if NETWORK.iter().any(|k| lower.contains(k)) {
        Category::Network
    } else if COMPUTE.iter().any(|k| lower.contains(k)) {
        Category::Compute
    } else if STORAGE.iter().any(|k| lower.contains(k)) {
        Category::Storage
    } else {
        Category::Other
    }
}

/// Severity for one field-level change, from a static (category,
/// change-kind) table.
pub fn severity_for(category: Category, kind: ChangeKind) -> Severity {
    use Category::*;
    use ChangeKind::*;
    match (category, kind) {
        (Security, Remove) => Severity::Critical,
        (Security, _) => Severity::High,
        (Identity, Remove) => Severity::High,
        (Identity, _) => Severity::Medium,
        (Network, _) | (Compute, _) | (Storage, _) => Severity::Medium,
        (Tag, _) | (Metadata, _) | (Other, _) => Severity::Low,
    }
}

/// Weight a category contributes to risk, independent of change-kind.
pub fn category_weight(category: Category) -> f64 {
    match category {
        Category::Security => 0.9,
        Category::Identity => 0.8,
        Category::Network => 0.6,
        Category::Compute => 0.4,
        Category::Storage => 0.4,
        Category::Tag => 0.1,
        Category::Metadata => 0.05,
        Category::Other => 0.2,
    }
}

/// Multiplier a change-kind contributes to risk, independent of category.
pub fn kind_weight(kind: ChangeKind) -> f64 {
    match kind {
        ChangeKind::Modify => 1.0,
        ChangeKind::Add => 0.7,
        ChangeKind::Remove => 0.8,
    }
}

/// Saturating risk contribution of one field change.
pub fn field_risk(category: Category, kind: ChangeKind) -> f64 {
    (category_weight(category) * kind_weight(kind)).clamp(0.0, 1.0)
}

/// Default resource-level severity for a whole added/removed resource with
/// no field changes to derive a severity from, keyed by `(provider, type)`.
/// No overrides are registered yet, so this always returns the documented
/// default.
pub fn default_resource_severity(_provider: &str, _resource_type: &str) -> Severity {
    Severity::Medium
}

/// Default resource-level risk score for a whole added/removed resource,
/// chosen to land in the `medium` bucket to match `default_resource_severity`.
pub fn default_resource_risk(_provider: &str, _resource_type: &str) -> f64 {
    0.4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_group_ingress_cidr_is_security_category() {
        assert_eq!(categorize("security_group.ingress[0].cidr"), Category::Security);
    }

    #[test]
    fn security_modify_is_high_severity_with_risk_at_least_0_6() {
        let category = categorize("security_group.ingress[0].cidr");
        let severity = severity_for(category, ChangeKind::Modify);
        assert_eq!(severity, Severity::High);
        assert!(field_risk(category, ChangeKind::Modify) >= 0.6);
    }

    #[test]
    fn tag_fields_are_low_risk() {
        assert_eq!(categorize("tags.owner"), Category::Tag);
        assert_eq!(severity_for(Category::Tag, ChangeKind::Modify), Severity::Low);
    }
}
