//! Deep, path-preserving comparison of JSON-shaped attribute maps.

use drift_core::ChangeKind;
use serde_json::Value;
use std::collections::BTreeMap;

/// A single leaf-level difference found by `diff_values`, before severity
/// or category classification.
pub struct RawChange {
    pub field: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub kind: ChangeKind,
}

/// Resource types/field combinations whose array fields are compared as
/// sets rather than ordered sequences (e.g. firewall rule lists, where
/// reordering rules is not itself a meaningful change).
pub fn is_order_independent(resource_type: &str, field_path: &str) -> bool {
    const RULES: &[(&str, &str)] = &[
        ("security_group", "ingress"),
        ("security_group", "egress"),
        ("firewall", "rules"),
        ("iam.policy", "statements"),
    ];
    RULES.iter().any(|(ty, field)| {
        resource_type.contains(ty) && (field_path == *field || field_path.starts_with(&format!("{field}[")))
    })
}

/// Recursively compare two JSON values under `prefix`, emitting one
/// `RawChange` per differing leaf. Numeric/string/bool equality is exact;
/// object comparison is key-order-independent; array comparison is
/// index-order-dependent unless `order_independent` says otherwise for this
/// resource type and field path.
pub fn diff_values(
    resource_type: &str,
    prefix: &str,
    old: &Value,
    new: &Value,
    out: &mut Vec<RawChange>,
) {
    if old == new {
        return;
    }

    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            let mut keys: BTreeMap<&String, ()> = BTreeMap::new();
            for k in old_map.keys() {
                keys.insert(k, ());
            }
            for k in new_map.keys() {
                keys.insert(k, ());
            }
            for key in keys.keys() {
                let path = if prefix.is_empty() {
                    (*key).clone()
                } else {
                    format!("{prefix}.{key}")
                };
                let old_v = old_map.get(*key).unwrap_or(&Value::Null);
                let new_v = new_map.get(*key).unwrap_or(&Value::Null);
                diff_values(resource_type, &path, old_v, new_v, out);
            }
        }
        (Value::Array(old_arr), Value::Array(new_arr)) if is_order_independent(resource_type, prefix) => {
            diff_array_as_set(resource_type, prefix, old_arr, new_arr, out);
        }
        (Value::Array(old_arr), Value::Array(new_arr)) => {
            let max_len = old_arr.len().max(new_arr.len());
            for i in 0..max_len {
                let path = format!("{prefix}[{i}]");
                let old_v = old_arr.get(i).unwrap_or(&Value::Null);
                let new_v = new_arr.get(i).unwrap_or(&Value::Null);
                diff_values(resource_type, &path, old_v, new_v, out);
            }
        }
        _ => {
            let kind = match (old.is_null(), new.is_null()) {
                (true, false) => ChangeKind::Add,
                (false, true) => ChangeKind::Remove,
                _ => ChangeKind::Modify,
            };
            out.push(RawChange {
                field: prefix.to_string(),
                old_value: none_if_null(old),
                new_value: none_if_null(new),
                kind,
            });
        }
    }
}

/// Compare two arrays as sets: elements present unchanged on both sides are
/// not a diff at all (order doesn't matter), but an element that merely had
/// a leaf edited in place must still come out as a `Modify` rather than a
/// `Remove` of the old value paired with an `Add` of the new one -- the
/// latter would classify a rule edit as a removal, which is a more severe
/// change-kind than a modification under `severity_for`. So after dropping
/// exact matches, the remaining old/new elements are paired by position
/// (the only stable identity available without a per-type identity field)
/// and recursed into, so only the leaves that actually differ show up.
/// Any leftover elements beyond the shorter side are genuine adds/removes.
fn diff_array_as_set(resource_type: &str, prefix: &str, old_arr: &[Value], new_arr: &[Value], out: &mut Vec<RawChange>) {
    let mut old_rest: Vec<(usize, &Value)> = old_arr.iter().enumerate().collect();
    let mut new_rest: Vec<(usize, &Value)> = new_arr.iter().enumerate().collect();

    let mut i = 0;
    while i < old_rest.len() {
        let canonical = old_rest[i].1.to_string();
        if let Some(pos) = new_rest.iter().position(|(_, v)| v.to_string() == canonical) {
            old_rest.remove(i);
            new_rest.remove(pos);
        } else {
            i += 1;
        }
    }

    let paired = old_rest.len().min(new_rest.len());
    for k in 0..paired {
        let (old_idx, old_v) = old_rest[k];
        let (_, new_v) = new_rest[k];
        diff_values(resource_type, &format!("{prefix}[{old_idx}]"), old_v, new_v, out);
    }
    for (idx, item) in &old_rest[paired..] {
        out.push(RawChange {
            field: format!("{prefix}[{idx}]"),
            old_value: Some((*item).clone()),
            new_value: None,
            kind: ChangeKind::Remove,
        });
    }
    for (idx, item) in &new_rest[paired..] {
        out.push(RawChange {
            field: format!("{prefix}[{idx}]"),
            old_value: None,
            new_value: Some((*item).clone()),
            kind: ChangeKind::Add,
        });
    }
}

fn none_if_null(v: &Value) -> Option<Value> {
    if v.is_null() {
        None
    } else {
        Some(v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_a_single_leaf_modification() {
        let old = json!({"size": "s"});
        let new = json!({"size": "m"});
        let mut out = Vec::new();
        diff_values("compute.instance", "", &old, &new, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].field, "size");
        assert_eq!(out[0].kind, drift_core::ChangeKind::Modify);
    }

    #[test]
    fn order_independent_arrays_ignore_reordering() {
        let old = json!({"ingress": [{"cidr": "10.0.0.0/8"}, {"cidr": "192.168.0.0/16"}]});
        let new = json!({"ingress": [{"cidr": "192.168.0.0/16"}, {"cidr": "10.0.0.0/8"}]});
        let mut out = Vec::new();
        diff_values("security_group", "", &old, &new, &mut out);
        assert!(out.is_empty(), "reordering alone should not be a diff");
    }

    #[test]
    fn object_comparison_is_key_order_independent() {
        let old = json!({"a": 1, "b": 2});
        let new = json!({"b": 2, "a": 1});
        let mut out = Vec::new();
        diff_values("compute.instance", "", &old, &new, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn order_independent_array_in_place_edit_is_a_modify_not_remove_and_add() {
        let old = json!({"ingress": [{"cidr": "0.0.0.0/0"}]});
        let new = json!({"ingress": [{"cidr": "10.0.0.0/8"}]});
        let mut out = Vec::new();
        diff_values("security_group", "", &old, &new, &mut out);
        assert_eq!(out.len(), 1, "editing one rule's cidr should be one change, not a remove+add pair");
        assert_eq!(out[0].field, "ingress[0].cidr");
        assert_eq!(out[0].kind, drift_core::ChangeKind::Modify);
    }
}
