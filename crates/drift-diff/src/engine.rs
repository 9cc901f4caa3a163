//! The Diff Engine: matches two snapshots' resources and produces a
//! risk-scored `DriftReport`.

use crate::classify::{categorize, default_resource_risk, default_resource_severity, field_risk, severity_for};
use crate::compare::diff_values;
use crate::correlate::correlate;
use crate::options::DiffOptions;
use drift_core::{
    DriftReport, DriftReportMetadata, DriftType, Error, ErrorKind, FieldChange, Resource,
    ResourceChange, ResourceKey, RiskLevel, Severity, Snapshot, Summary,
};
use rayon::prelude::*;
use std::collections::HashMap;

pub const ENGINE_VERSION: &str = "1.0.0";

/// Compare snapshot `a` (source/baseline) against snapshot `b`
/// (target/current) and return a drift report. Fails with `InvalidSnapshot`
/// before any change is produced if either input violates the resource
/// identity invariant; otherwise never partially returns.
pub fn diff(a: &Snapshot, b: &Snapshot, options: &DiffOptions) -> drift_core::Result<DriftReport> {
    validate_snapshot(a)?;
    validate_snapshot(b)?;

    let started = std::time::Instant::now();

    let a_index = index_resources(a, options);
    let b_index = index_resources(b, options);

    let mut keys: Vec<&ResourceKey> = a_index.keys().chain(b_index.keys()).collect();
    keys.sort();
    keys.dedup();

    let total = a_index.len() + b_index.len();
    let changes: Vec<Option<ResourceChange>> = if total > options.parallel_threshold {
        keys.par_iter()
            .map(|key| compute_change(key, a_index.get(*key).copied(), b_index.get(*key).copied(), options))
            .collect()
    } else {
        keys.iter()
            .map(|key| compute_change(key, a_index.get(*key).copied(), b_index.get(*key).copied(), options))
            .collect()
    };

    let mut all_changes: Vec<ResourceChange> = changes.into_iter().flatten().collect();
    order_changes(&mut all_changes);

    let summary = build_summary(&all_changes);

    let correlations = if options.correlate {
        let mut by_id: HashMap<String, &Resource> = HashMap::new();
        for r in a.resources.iter().chain(b.resources.iter()) {
            by_id.insert(r.id.clone(), r);
        }
        correlate(&all_changes, &by_id, options.correlation_window_secs)
    } else {
        Vec::new()
    };

    let resource_changes: Vec<ResourceChange> = all_changes
        .into_iter()
        .filter(|change| match options.min_risk_level {
            Some(min) => RiskLevel::from_score(change.risk_score) >= min,
            None => true,
        })
        .collect();

    Ok(DriftReport {
        summary,
        resource_changes,
        correlations,
        metadata: DriftReportMetadata {
            from_snapshot_id: a.id.clone(),
            to_snapshot_id: b.id.clone(),
            engine_version: ENGINE_VERSION.to_string(),
            computed_at: chrono::Utc::now(),
            duration_ms: started.elapsed().as_millis() as u64,
        },
    })
}

fn validate_snapshot(snapshot: &Snapshot) -> drift_core::Result<()> {
    let mut seen = std::collections::HashSet::new();
    for resource in &snapshot.resources {
        if resource.id.is_empty() {
            return Err(invalid(format!(
                "snapshot {} contains a resource with an empty id",
                snapshot.id
            )));
        }
        if resource.resource_type.is_empty() {
            return Err(invalid(format!(
                "snapshot {} contains resource {} with an empty type",
                snapshot.id, resource.id
            )));
        }
        if !seen.insert(resource.key()) {
            return Err(invalid(format!(
                "snapshot {} has a duplicate resource for (provider, type, id) = ({}, {}, {})",
                snapshot.id, resource.provider, resource.resource_type, resource.id
            )));
        }
    }
    Ok(())
}

fn invalid(message: String) -> Error {
    Error::new(ErrorKind::Validation, message)
}

fn index_resources<'a>(snapshot: &'a Snapshot, options: &DiffOptions) -> HashMap<ResourceKey, &'a Resource> {
    snapshot
        .resources
        .iter()
        .filter(|r| !options.ignore_providers.iter().any(|p| p == &r.provider))
        .map(|r| (r.key(), r))
        .collect()
}

fn compute_change(
    key: &ResourceKey,
    a: Option<&Resource>,
    b: Option<&Resource>,
    options: &DiffOptions,
) -> Option<ResourceChange> {
    match (a, b) {
        (None, Some(resource)) => Some(resource_change_for_endpoint(resource, DriftType::Added)),
        (Some(resource), None) => Some(resource_change_for_endpoint(resource, DriftType::Removed)),
        (Some(old), Some(new)) => {
            let changes = compare_resources_with_options(old, new, options);
            if changes.is_empty() {
                None
            } else {
                let severity = changes.iter().map(|c| c.severity).max().unwrap_or(Severity::Low);
                let risk_score = changes
                    .iter()
                    .map(|c| field_risk(c.category, c.change_kind))
                    .fold(0.0_f64, f64::max);
                Some(ResourceChange {
                    resource_id: key.id.clone(),
                    resource_type: key.resource_type.clone(),
                    provider: key.provider.clone(),
                    drift_type: DriftType::Modified,
                    severity,
                    risk_score,
                    description: describe_modified(new, &changes),
                    changes,
                })
            }
        }
        (None, None) => None,
    }
}

fn resource_change_for_endpoint(resource: &Resource, drift_type: DriftType) -> ResourceChange {
    ResourceChange {
        resource_id: resource.id.clone(),
        resource_type: resource.resource_type.clone(),
        provider: resource.provider.clone(),
        drift_type,
        severity: default_resource_severity(&resource.provider, &resource.resource_type),
        risk_score: default_resource_risk(&resource.provider, &resource.resource_type),
        changes: Vec::new(),
        description: match drift_type {
            DriftType::Added => format!("{} '{}' was added", resource.resource_type, resource.name),
            DriftType::Removed => format!("{} '{}' was removed", resource.resource_type, resource.name),
            DriftType::Modified => unreachable!(),
        },
    }
}

pub(crate) fn compare_resources_with_options(
    old: &Resource,
    new: &Resource,
    options: &DiffOptions,
) -> Vec<FieldChange> {
    let mut raw = Vec::new();

    let old_config = serde_json::to_value(&old.configuration).unwrap_or_default();
    let new_config = serde_json::to_value(&new.configuration).unwrap_or_default();
    diff_values(&new.resource_type, "", &old_config, &new_config, &mut raw);

    let old_tags = serde_json::to_value(&old.tags).unwrap_or_default();
    let new_tags = serde_json::to_value(&new.tags).unwrap_or_default();
    diff_values(&new.resource_type, "tags", &old_tags, &new_tags, &mut raw);

    let old_meta = serde_json::to_value(&old.metadata).unwrap_or_default();
    let new_meta = serde_json::to_value(&new.metadata).unwrap_or_default();
    diff_values(&new.resource_type, "metadata", &old_meta, &new_meta, &mut raw);

    raw.into_iter()
        .filter(|c| !options.is_ignored(&c.field))
        .map(|c| {
            let category = categorize(&c.field);
            let severity = severity_for(category, c.kind);
            FieldChange {
                field: c.field,
                old_value: c.old_value,
                new_value: c.new_value,
                severity,
                category,
                change_kind: c.kind,
            }
        })
        .collect()
}

fn describe_modified(resource: &Resource, changes: &[FieldChange]) -> String {
    let fields: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
    format!(
        "{} '{}' changed: {}",
        resource.resource_type,
        resource.name,
        fields.join(", ")
    )
}

/// Sort by (severity desc, risk_score desc, provider asc, type asc, id asc).
/// Fully specifies ties so the result is identical regardless of worker
/// interleaving during parallel comparison.
fn order_changes(changes: &mut [ResourceChange]) {
    changes.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.risk_score.partial_cmp(&a.risk_score).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| a.provider.cmp(&b.provider))
            .then_with(|| a.resource_type.cmp(&b.resource_type))
            .then_with(|| a.resource_id.cmp(&b.resource_id))
    });
}

fn build_summary(changes: &[ResourceChange]) -> Summary {
    let mut summary = Summary {
        total: changes.len(),
        ..Summary::default()
    };

    for change in changes {
        match change.drift_type {
            DriftType::Added => summary.added += 1,
            DriftType::Removed => summary.removed += 1,
            DriftType::Modified => summary.modified += 1,
        }
        *summary.by_severity.entry(change.severity).or_insert(0) += 1;
        for fc in &change.changes {
            *summary.by_category.entry(fc.category).or_insert(0) += 1;
        }
    }

    let risk_score = if changes.is_empty() {
        0.0
    } else {
        changes.iter().map(|c| c.risk_score).sum::<f64>() / changes.len() as f64
    };
    summary.risk_score = risk_score;
    summary.risk_level = RiskLevel::from_score(risk_score);
    summary
}
