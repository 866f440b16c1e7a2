//! Query options for reading back persisted entries

use chrono::{DateTime, Utc};

/// Result ordering for a query, by entry timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    /// Newest first; the default, matching the common "tail the log" use.
    #[default]
    Desc,
}

/// Options accepted by [`Logger::query`](crate::Logger::query) and fanned
/// out to every query-capable transport.
///
/// Time bounds are applied per transport; pagination (`start`, `limit`),
/// ordering, and field projection are applied by the logger after merging.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    /// Maximum number of merged rows to return.
    pub limit: Option<usize>,
    /// Offset into the merged, ordered result set.
    pub start: usize,
    pub order: SortOrder,
    /// When set, each returned entry keeps only these fields.
    pub fields: Option<Vec<String>>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn fields<S: Into<String>, I: IntoIterator<Item = S>>(mut self, fields: I) -> Self {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Whether a timestamp falls inside the `[from, until]` bounds.
    pub fn in_range(&self, timestamp: DateTime<Utc>) -> bool {
        if let Some(from) = self.from {
            if timestamp < from {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let options = QueryOptions::new();
        assert_eq!(options.order, SortOrder::Desc);
        assert_eq!(options.start, 0);
        assert!(options.limit.is_none());
    }

    #[test]
    fn test_in_range() {
        let from = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let options = QueryOptions::new().from(from).until(until);

        let inside = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap();

        assert!(options.in_range(inside));
        assert!(options.in_range(from));
        assert!(options.in_range(until));
        assert!(!options.in_range(before));
        assert!(!options.in_range(after));
    }
}
