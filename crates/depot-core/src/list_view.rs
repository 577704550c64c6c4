//! # List View
//!
//! Derives the rows a table shows from the store's canonical collection.
//!
//! ## Derivation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  store.items()  ──►  1. stable sort (optional)  ──►  2. filter  ──► rows │
//! │   (untouched)          by one column, asc/desc        substring,        │
//! │                        missing values first asc       case-insensitive  │
//! │                                                                         │
//! │  Rows are borrows of the store's items: deriving never mutates or      │
//! │  reorders the cache, and rows must be re-derived after every change.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::resource::{Resource, SortDirection, SortKey};

/// Sort and search settings of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    sort: Option<(SortKey, SortDirection)>,
    search: String,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some((key, direction));
        self
    }

    pub fn searching(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn sort(&self) -> Option<(SortKey, SortDirection)> {
        self.sort
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the sorted, filtered rows for `items`.
    ///
    /// Fails only when the sort column is not one `R` supports.
    pub fn derive<'a, R: Resource>(&self, items: &'a [R]) -> CoreResult<Vec<&'a R>> {
        let mut rows: Vec<&R> = items.iter().collect();

        if let Some((key, direction)) = self.sort {
            if !R::SORT_KEYS.contains(&key) {
                return Err(CoreError::UnsupportedSortKey { kind: R::KIND, key });
            }
            // sort_by is stable, so equal keys keep their store order
            rows.sort_by(|a, b| {
                let ordering = a.sort_text(key).cmp(&b.sort_text(key));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return Ok(rows);
        }

        rows.retain(|item| {
            item.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        });
        Ok(rows)
    }
}
