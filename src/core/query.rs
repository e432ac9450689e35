//! Search, category filter and sort over a snapshot (the log view).

use crate::models::{CategoryFilter, ServiceRecord};
use clap::ValueEnum;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Newest first
    #[default]
    Date,
    /// Longest first
    Duration,
    Title,
    Organization,
}

#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    pub search: Option<String>,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

#[derive(Debug)]
pub struct QueryResult<'a> {
    pub records: Vec<&'a ServiceRecord>,
    pub total_minutes: u64,
}

impl QueryResult<'_> {
    /// Rounded mean duration of the matched records, 0 when nothing matched.
    pub fn average_minutes(&self) -> u64 {
        if self.records.is_empty() {
            return 0;
        }
        (self.total_minutes as f64 / self.records.len() as f64).round() as u64
    }
}

impl RecordQuery {
    fn matches(&self, r: &ServiceRecord) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                r.title.to_lowercase().contains(&term)
                    || r.organization.to_lowercase().contains(&term)
                    || r.description.to_lowercase().contains(&term)
            }
        };
        search_ok && self.category.matches(r.category)
    }

    pub fn apply<'a>(&self, records: &'a [ServiceRecord]) -> QueryResult<'a> {
        let mut out: Vec<&ServiceRecord> = records.iter().filter(|r| self.matches(r)).collect();

        match self.sort {
            SortKey::Date => out.sort_by(|a, b| b.start_time.cmp(&a.start_time)),
            SortKey::Duration => out.sort_by(|a, b| b.duration_minutes.cmp(&a.duration_minutes)),
            SortKey::Title => out.sort_by(|a, b| text_cmp(&a.title, &b.title)),
            SortKey::Organization => out.sort_by(|a, b| text_cmp(&a.organization, &b.organization)),
        }

        let total_minutes = out.iter().map(|r| u64::from(r.duration_minutes)).sum();
        QueryResult {
            records: out,
            total_minutes,
        }
    }
}

fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// The first `n` records of an already ordered snapshot.
pub fn recent(records: &[ServiceRecord], n: usize) -> &[ServiceRecord] {
    &records[..n.min(records.len())]
}
