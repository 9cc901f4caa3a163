//! Drift report types: the output of one diff between two snapshots.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// How a resource or field changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftType {
    Added,
    Removed,
    Modified,
}

/// The kind of edit a `FieldChange` represents, used to look up risk
/// weights and severity independent of the field's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Add,
    Remove,
    Modify,
}

/// Impact level assigned to a change or to an overall report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// The functional area a changed field belongs to, used to weight risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Security,
    Network,
    Compute,
    Storage,
    Identity,
    Tag,
    Metadata,
    Other,
}

/// Coarse bucket a report's mean risk score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for RiskLevel {
    /// `Summary::default()` needs some value before `build_summary` fills
    /// in the real bucket; `Low` is the only one that doesn't overstate risk.
    fn default() -> Self {
        RiskLevel::Low
    }
}

impl RiskLevel {
    /// Bucket boundaries per spec: `<0.25` low, `<0.5` medium, `<0.75` high,
    /// else critical. Boundaries themselves round up (0.25 -> medium, 0.5 ->
    /// high, 0.75 -> critical).
    pub fn from_score(score: f64) -> Self {
        if score < 0.25 {
            RiskLevel::Low
        } else if score < 0.5 {
            RiskLevel::Medium
        } else if score < 0.75 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

/// One leaf-level attribute delta within a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub severity: Severity,
    pub category: Category,
    pub change_kind: ChangeKind,
}

/// The aggregate of all `FieldChange`s on one matched resource, plus
/// add/remove semantics for resources with no counterpart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceChange {
    pub resource_id: String,
    pub resource_type: String,
    pub provider: String,
    pub drift_type: DriftType,
    pub severity: Severity,
    pub risk_score: f64,
    #[serde(default)]
    pub changes: Vec<FieldChange>,
    pub description: String,
}

/// Per-severity / per-category counts in a `DriftReport`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    #[serde(default)]
    pub by_severity: HashMap<Severity, usize>,
    #[serde(default)]
    pub by_category: HashMap<Category, usize>,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
}

impl std::hash::Hash for Severity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (*self as u8).hash(state)
    }
}

/// A group of related `ResourceChange`s discovered by the correlation pass
/// (shared owner/parent, timestamp window, or rollout naming prefix).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correlation {
    pub reason: String,
    pub resource_ids: Vec<String>,
}

/// The outcome of one diff: everything a downstream formatter needs to
/// render a drift report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    pub summary: Summary,
    pub resource_changes: Vec<ResourceChange>,
    #[serde(default)]
    pub correlations: Vec<Correlation>,
    pub metadata: DriftReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReportMetadata {
    pub from_snapshot_id: String,
    pub to_snapshot_id: String,
    pub engine_version: String,
    pub computed_at: chrono::DateTime<chrono::Utc>,
    pub duration_ms: u64,
}
