//! Filter criteria for `Store::list`.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct SnapshotFilter {
    pub provider: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl SnapshotFilter {
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn matches(&self, provider: &str, timestamp: DateTime<Utc>) -> bool {
        if let Some(p) = &self.provider {
            if p != provider {
                return false;
            }
        }
        if let Some(since) = self.since {
            if timestamp < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > until {
                return false;
            }
        }
        true
    }
}
