//! Snapshot filename encoding/decoding:
//! `<UTC-yyyy-mm-dd-HH-MM-SS>-<provider>-<snapshot-id>.json`.

use chrono::{DateTime, NaiveDateTime, Utc};

const TIMESTAMP_FMT: &str = "%Y-%m-%d-%H-%M-%S";

pub fn build(timestamp: DateTime<Utc>, provider: &str, snapshot_id: &str) -> String {
    format!(
        "{}-{}-{}.json",
        timestamp.format(TIMESTAMP_FMT),
        provider,
        snapshot_id
    )
}

/// Parsed components of a snapshot filename, if it matches the expected
/// shape. The provider segment may itself contain no hyphens reliably, so
/// parsing anchors on the fixed-width timestamp prefix and the known
/// `.json` suffix, splitting what remains on the first hyphen.
pub struct Parsed {
    pub timestamp: DateTime<Utc>,
    pub provider: String,
    pub snapshot_id: String,
}

pub fn parse(filename: &str) -> Option<Parsed> {
    let stem = filename.strip_suffix(".json")?;
    // Timestamp is exactly "YYYY-MM-DD-HH-MM-SS" = 19 characters.
    if stem.len() < 20 {
        return None;
    }
    let (ts_part, rest) = stem.split_at(19);
    let rest = rest.strip_prefix('-')?;
    let naive = NaiveDateTime::parse_from_str(ts_part, TIMESTAMP_FMT).ok()?;
    let timestamp = DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc);
    let (provider, snapshot_id) = rest.rsplit_once('-')?;
    Some(Parsed {
        timestamp,
        provider: provider.to_string(),
        snapshot_id: snapshot_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_build_and_parse() {
        let ts = DateTime::parse_from_rfc3339("2026-07-28T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let name = build(ts, "cloud-a", "abc123");
        let parsed = parse(&name).expect("should parse");
        assert_eq!(parsed.timestamp, ts);
        assert_eq!(parsed.provider, "cloud-a");
        assert_eq!(parsed.snapshot_id, "abc123");
    }

    #[test]
    fn rejects_non_matching_names() {
        assert!(parse("not-a-snapshot.json").is_none());
        assert!(parse("last-scan-cloud-a.json").is_none());
    }
}
