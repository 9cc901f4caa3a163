//! Canonical types shared by every drift-kit crate: the resource model,
//! the snapshot envelope, the drift report, and the error taxonomy.

pub mod drift;
pub mod error;
pub mod resource;
pub mod snapshot;

pub use drift::{
    Category, ChangeKind, Correlation, DriftReport, DriftReportMetadata, DriftType, FieldChange,
    ResourceChange, RiskLevel, Severity, Summary,
};
pub use error::{Error, ErrorKind, Result};
pub use resource::{Resource, ResourceKey};
pub use snapshot::{meta_keys, Snapshot, SnapshotInfo};

/// The closed set of recognized provider tags.
pub mod providers {
    pub const LOCAL_STATE: &str = "local-state";
    pub const CLUSTER: &str = "cluster";
    pub const CLOUD_A: &str = "cloud-a";
    pub const CLOUD_B: &str = "cloud-b";
    pub const MULTI: &str = "multi";
}
