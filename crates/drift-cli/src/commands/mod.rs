pub mod baseline;
pub mod diff;
pub mod scan;
pub mod status;
pub mod timeline;

/// Shared `RiskLevel`/severity parsing for flags that take one of
/// `low|medium|high|critical`.
pub fn parse_risk_level(input: &str) -> Result<drift_core::RiskLevel, String> {
    match input.to_ascii_lowercase().as_str() {
        "low" => Ok(drift_core::RiskLevel::Low),
        "medium" => Ok(drift_core::RiskLevel::Medium),
        "high" => Ok(drift_core::RiskLevel::High),
        "critical" => Ok(drift_core::RiskLevel::Critical),
        other => Err(format!("unrecognized risk level '{other}' (expected low|medium|high|critical)")),
    }
}
