//! Catalogue search filter.

use serde::Deserialize;

use super::{Category, Event};

/// Optional criteria for listing events. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventFilter {
    /// Case-insensitive substring of the title.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    /// Case-insensitive substring of the location.
    #[serde(default)]
    pub location: Option<String>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        contains_ci(&event.title, self.search.as_deref())
            && self.category.map_or(true, |c| c == event.category)
            && contains_ci(&event.location, self.location.as_deref())
    }

    /// `%term%` pattern for SQL `ILIKE`, or `None` when the criterion is unset.
    pub fn like_pattern(term: Option<&str>) -> Option<String> {
        term.map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| format!("%{}%", t.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")))
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    match needle.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
        None => true,
    }
}
