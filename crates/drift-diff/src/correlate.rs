//! Optional post-pass that groups related `ResourceChange`s. Grouping never
//! alters `resource_changes` itself; it only adds entries to the report's
//! `correlations` list.

use chrono::{DateTime, Utc};
use drift_core::{Correlation, Resource, ResourceChange};
use std::collections::HashMap;

/// Group changes by a rollout naming pattern (`<prefix>-<ordinal>`) shared
/// by at least two changed resources of the same type, by a shared
/// dependency referenced as an owner/parent by at least two changed
/// resources, and by resource-reported timestamps falling within
/// `window_secs` of each other.
pub fn correlate(
    changes: &[ResourceChange],
    resources_by_id: &HashMap<String, &Resource>,
    window_secs: i64,
) -> Vec<Correlation> {
    let mut correlations = Vec::new();
    correlations.extend(correlate_by_rollout_prefix(changes));
    correlations.extend(correlate_by_shared_dependency(changes, resources_by_id));
    correlations.extend(correlate_by_timestamp_window(changes, resources_by_id, window_secs));
    correlations
}

/// Metadata keys checked, in order, for a per-resource timestamp to
/// correlate on. Providers disagree on the name; the first one present wins.
const TIMESTAMP_METADATA_KEYS: &[&str] =
    &["last_modified", "updated_at", "modified_at", "created_at", "launch_time", "timestamp"];

fn resource_timestamp(resource: &Resource) -> Option<DateTime<Utc>> {
    TIMESTAMP_METADATA_KEYS.iter().find_map(|key| {
        resource
            .metadata
            .get(*key)
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    })
}

/// Group changed resources whose metadata timestamp falls within
/// `window_secs` of its chronological neighbor, chaining adjacent changes
/// into one group rather than emitting overlapping subsets per anchor.
fn correlate_by_timestamp_window(
    changes: &[ResourceChange],
    resources_by_id: &HashMap<String, &Resource>,
    window_secs: i64,
) -> Vec<Correlation> {
    if window_secs <= 0 {
        return Vec::new();
    }

    let mut stamped: Vec<(DateTime<Utc>, &str)> = changes
        .iter()
        .filter_map(|change| {
            resources_by_id
                .get(&change.resource_id)
                .and_then(|r| resource_timestamp(r))
                .map(|ts| (ts, change.resource_id.as_str()))
        })
        .collect();
    stamped.sort_by_key(|(ts, _)| *ts);

    let mut out = Vec::new();
    let mut start = 0;
    while start < stamped.len() {
        let mut end = start;
        while end + 1 < stamped.len() && (stamped[end + 1].0 - stamped[end].0).num_seconds() <= window_secs {
            end += 1;
        }
        if end > start {
            let mut ids: Vec<String> = stamped[start..=end].iter().map(|(_, id)| id.to_string()).collect();
            ids.sort();
            ids.dedup();
            out.push(Correlation {
                reason: format!("changed within {window_secs}s of each other"),
                resource_ids: ids,
            });
        }
        start = end + 1;
    }
    out.sort_by(|a, b| a.resource_ids.first().cmp(&b.resource_ids.first()));
    out
}

fn rollout_prefix(name: &str) -> Option<&str> {
    let trimmed = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if trimmed.len() == name.len() {
        return None; // no trailing ordinal at all
    }
    trimmed.strip_suffix('-').or(Some(trimmed))
}

fn correlate_by_rollout_prefix(changes: &[ResourceChange]) -> Vec<Correlation> {
    let mut groups: HashMap<(String, String), Vec<String>> = HashMap::new();
    for change in changes {
        if let Some(prefix) = rollout_prefix(&change.resource_id) {
            groups
                .entry((change.resource_type.clone(), prefix.to_string()))
                .or_default()
                .push(change.resource_id.clone());
        }
    }

    let mut out: Vec<Correlation> = groups
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|((resource_type, prefix), mut ids)| {
            ids.sort();
            Correlation {
                reason: format!("rollout naming prefix '{prefix}' on {resource_type}"),
                resource_ids: ids,
            }
        })
        .collect();
    out.sort_by(|a, b| a.reason.cmp(&b.reason));
    out
}

fn correlate_by_shared_dependency(
    changes: &[ResourceChange],
    resources_by_id: &HashMap<String, &Resource>,
) -> Vec<Correlation> {
    let mut by_dependency: HashMap<String, Vec<String>> = HashMap::new();
    for change in changes {
        let Some(resource) = resources_by_id.get(&change.resource_id) else {
            continue;
        };
        for dep in &resource.dependencies {
            by_dependency
                .entry(dep.clone())
                .or_default()
                .push(change.resource_id.clone());
        }
    }

    let mut out: Vec<Correlation> = by_dependency
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(dep, mut ids)| {
            ids.sort();
            Correlation {
                reason: format!("shared dependency on '{dep}'"),
                resource_ids: ids,
            }
        })
        .collect();
    out.sort_by(|a, b| a.reason.cmp(&b.reason));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::{ChangeKind, Category, DriftType, Severity};
    use serde_json::json;
    use std::collections::HashMap as Map;

    #[test]
    fn rollout_prefix_strips_trailing_ordinal() {
        assert_eq!(rollout_prefix("web-1"), Some("web"));
        assert_eq!(rollout_prefix("web-02"), Some("web"));
        assert_eq!(rollout_prefix("web"), None);
    }

    fn resource_with_timestamp(id: &str, ts: &str) -> Resource {
        let mut metadata = Map::new();
        metadata.insert("last_modified".to_string(), json!(ts));
        Resource {
            id: id.to_string(),
            resource_type: "compute.instance".to_string(),
            name: id.to_string(),
            provider: "cloud-a".to_string(),
            region: String::new(),
            namespace: String::new(),
            configuration: Map::new(),
            metadata,
            tags: Map::new(),
            dependencies: Vec::new(),
        }
    }

    fn change_for(id: &str) -> ResourceChange {
        ResourceChange {
            resource_id: id.to_string(),
            resource_type: "compute.instance".to_string(),
            provider: "cloud-a".to_string(),
            drift_type: DriftType::Modified,
            severity: Severity::Medium,
            risk_score: 0.4,
            changes: vec![drift_core::FieldChange {
                field: "size".to_string(),
                old_value: None,
                new_value: None,
                severity: Severity::Medium,
                category: Category::Compute,
                change_kind: ChangeKind::Modify,
            }],
            description: String::new(),
        }
    }

    #[test]
    fn timestamp_window_groups_changes_within_range() {
        let a = resource_with_timestamp("i-1", "2026-01-01T00:00:00Z");
        let b = resource_with_timestamp("i-2", "2026-01-01T00:00:30Z");
        let c = resource_with_timestamp("i-3", "2026-01-01T01:00:00Z");
        let by_id: HashMap<String, &Resource> =
            [("i-1".to_string(), &a), ("i-2".to_string(), &b), ("i-3".to_string(), &c)]
                .into_iter()
                .collect();
        let changes = vec![change_for("i-1"), change_for("i-2"), change_for("i-3")];

        let groups = correlate_by_timestamp_window(&changes, &by_id, 60);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].resource_ids, vec!["i-1".to_string(), "i-2".to_string()]);
    }

    #[test]
    fn timestamp_window_zero_disables_grouping() {
        let a = resource_with_timestamp("i-1", "2026-01-01T00:00:00Z");
        let b = resource_with_timestamp("i-2", "2026-01-01T00:00:01Z");
        let by_id: HashMap<String, &Resource> =
            [("i-1".to_string(), &a), ("i-2".to_string(), &b)].into_iter().collect();
        let changes = vec![change_for("i-1"), change_for("i-2")];

        assert!(correlate_by_timestamp_window(&changes, &by_id, 0).is_empty());
    }
}
