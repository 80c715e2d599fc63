//! Search request model

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Upper bound on the per-request result count, provider-agnostic.
pub const MAX_RESULTS_LIMIT: u32 = 50;

/// Optional published-date window for providers that support date filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub after: Option<NaiveDate>,
    pub before: Option<NaiveDate>,
}

impl TimeRange {
    /// Parse a date window from optional ISO `YYYY-MM-DD` strings.
    ///
    /// A malformed date or an inverted window is a configuration error,
    /// reported before any provider is contacted.
    pub fn parse(after: Option<&str>, before: Option<&str>) -> Result<Option<Self>> {
        let after = after.map(parse_date).transpose()?;
        let before = before.map(parse_date).transpose()?;

        match (after, before) {
            (None, None) => Ok(None),
            (Some(a), Some(b)) if a > b => {
                bail!("invalid date range: {} is after {}", a, b)
            }
            _ => Ok(Some(Self { after, before })),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("invalid date '{}', expected YYYY-MM-DD", raw))
}

/// A normalized search request
///
/// Built once from raw caller input; each provider adapter derives its own
/// wire shape from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Search query, non-empty after trimming
    pub query: String,
    /// Requested result count, within 1..=[`MAX_RESULTS_LIMIT`]
    pub max_results: u32,
    /// Optional published-date window
    pub time_range: Option<TimeRange>,
}

impl SearchRequest {
    /// Normalize raw caller input into a request.
    pub fn new(query: &str, max_results: u32) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            bail!("search query must not be empty");
        }
        if max_results == 0 || max_results > MAX_RESULTS_LIMIT {
            bail!(
                "max_results must be between 1 and {} (got {})",
                MAX_RESULTS_LIMIT,
                max_results
            );
        }

        Ok(Self {
            query: query.to_string(),
            max_results,
            time_range: None,
        })
    }

    /// Attach a published-date window.
    pub fn with_time_range(mut self, time_range: Option<TimeRange>) -> Self {
        self.time_range = time_range;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_keeps_query() {
        let request = SearchRequest::new("  rust async runtimes 2024  ", 10).unwrap();
        assert_eq!(request.query, "rust async runtimes 2024");
        assert_eq!(request.max_results, 10);
    }

    #[test]
    fn rejects_empty_query() {
        assert!(SearchRequest::new("   ", 5).is_err());
        assert!(SearchRequest::new("", 5).is_err());
    }

    #[test]
    fn rejects_out_of_range_result_count() {
        assert!(SearchRequest::new("rust", 0).is_err());
        assert!(SearchRequest::new("rust", MAX_RESULTS_LIMIT + 1).is_err());
        assert!(SearchRequest::new("rust", MAX_RESULTS_LIMIT).is_ok());
    }

    #[test]
    fn parses_valid_date_window() {
        let range = TimeRange::parse(Some("2024-01-01"), Some("2024-06-30"))
            .unwrap()
            .unwrap();
        assert_eq!(range.after.unwrap().to_string(), "2024-01-01");
        assert_eq!(range.before.unwrap().to_string(), "2024-06-30");
    }

    #[test]
    fn open_ended_window_is_allowed() {
        let range = TimeRange::parse(Some("2024-01-01"), None).unwrap().unwrap();
        assert!(range.after.is_some());
        assert!(range.before.is_none());
    }

    #[test]
    fn rejects_malformed_and_inverted_dates() {
        assert!(TimeRange::parse(Some("January 1st"), None).is_err());
        assert!(TimeRange::parse(Some("2024-06-30"), Some("2024-01-01")).is_err());
    }

    #[test]
    fn absent_dates_mean_no_window() {
        assert!(TimeRange::parse(None, None).unwrap().is_none());
    }
}
