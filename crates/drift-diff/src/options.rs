//! Tunables for one diff run.

use drift_core::RiskLevel;

/// Default number of combined resources above which matching and attribute
/// comparison fan out across the rayon global pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 500;

#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Dotted-path prefixes to drop from the output regardless of the
    /// built-in noise list.
    pub ignore_fields: Vec<String>,
    /// Providers to skip entirely (resources never matched, never reported).
    pub ignore_providers: Vec<String>,
    /// Resource changes whose risk bucket falls below this are dropped from
    /// `resource_changes`, though still counted in `summary`.
    pub min_risk_level: Option<RiskLevel>,
    /// Total resource count above which the engine parallelizes matching
    /// and comparison.
    pub parallel_threshold: usize,
    /// Whether to run the correlation pass.
    pub correlate: bool,
    /// Window, in seconds, within which two changes with adjacent rollout
    /// naming are still considered correlated.
    pub correlation_window_secs: i64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            ignore_fields: Vec::new(),
            ignore_providers: Vec::new(),
            min_risk_level: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            correlate: false,
            correlation_window_secs: 60,
        }
    }
}

impl DiffOptions {
    pub fn ignore_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignore_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignore_providers(mut self, providers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ignore_providers = providers.into_iter().map(Into::into).collect();
        self
    }

    pub fn min_risk_level(mut self, level: RiskLevel) -> Self {
        self.min_risk_level = Some(level);
        self
    }

    pub fn with_correlation(mut self) -> Self {
        self.correlate = true;
        self
    }

    /// Fields dropped unconditionally: server-generated timestamps, etags,
    /// and other volatile bookkeeping that would otherwise show up as noise
    /// on every scan.
    pub fn builtin_noise_fields() -> &'static [&'static str] {
        &[
            "metadata.last_modified",
            "metadata.last_modified_time",
            "metadata.updated_at",
            "metadata.etag",
            "metadata.resource_version",
            "metadata.generation",
            "metadata.last_scanned_at",
        ]
    }

    pub fn is_ignored(&self, field: &str) -> bool {
        Self::builtin_noise_fields()
            .iter()
            .any(|noise| field == *noise || field.starts_with(&format!("{noise}.")))
            || self
                .ignore_fields
                .iter()
                .any(|prefix| field == prefix || field.starts_with(&format!("{prefix}.")) || field.starts_with(&format!("{prefix}[")))
    }
}
