//! Incremental search over the status catalog.
//!
//! `filter_categories` is the whole contract: an empty query returns the input
//! unchanged; any other query keeps the entries whose `"<code> <name>"` label
//! contains the query case-insensitively, drops categories left empty, and
//! never reorders anything. `SearchSession` carries the current search text
//! between keystrokes and memoizes the last result.

use crate::catalog::{Catalog, Category, StatusEntry};
use tracing::trace;

/// A query folded once so it can be matched against many labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldedQuery {
    folded: String,
}

impl FoldedQuery {
    pub fn new(query: &str) -> Self {
        Self {
            folded: fold(query),
        }
    }

    /// Case- and width-insensitive substring test. An empty query matches everything.
    pub fn matches(&self, haystack: &str) -> bool {
        fold(haystack).contains(self.folded.as_str())
    }
}

/// Fold text for comparison: fullwidth ASCII forms become ASCII, the
/// ideographic space becomes a plain space, then every char is lowercased.
///
/// Folding is per character so both sides of a comparison fold identically
/// regardless of context-sensitive lowercasing rules.
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        out.extend(narrow(ch).to_lowercase());
    }
    out
}

fn narrow(ch: char) -> char {
    match ch {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => char::from_u32(ch as u32 - 0xFEE0).unwrap_or(ch),
        _ => ch,
    }
}

impl StatusEntry {
    /// Whether this entry's label contains `query`.
    pub fn matches(&self, query: &FoldedQuery) -> bool {
        query.matches(&self.label())
    }
}

impl Category {
    /// Copy of this category holding only matching entries, or `None` when
    /// nothing matches.
    pub fn retain_matching(&self, query: &FoldedQuery) -> Option<Category> {
        let entries: Vec<StatusEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.matches(query))
            .cloned()
            .collect();
        if entries.is_empty() {
            return None;
        }
        Some(Category {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            entries,
        })
    }
}

/// Filter `categories` by `query`.
///
/// The empty query is an identity short-circuit, not a zero-result filter.
/// No other normalization happens before that check, so a whitespace-only
/// query is a real (and usually empty) search.
pub fn filter_categories(categories: &[Category], query: &str) -> Vec<Category> {
    if query.is_empty() {
        return categories.to_vec();
    }
    let needle = FoldedQuery::new(query);
    categories
        .iter()
        .filter_map(|category| category.retain_matching(&needle))
        .collect()
}

impl Catalog {
    /// Filtered copy of the catalog; metadata is carried over unchanged.
    pub fn filter(&self, query: &str) -> Catalog {
        self.with_categories(filter_categories(&self.categories, query))
    }
}

/// The search field state: current text plus its memoized results.
#[derive(Debug)]
pub struct SearchSession<'a> {
    catalog: &'a Catalog,
    query: String,
    results: Vec<Category>,
}

impl<'a> SearchSession<'a> {
    /// Start with an empty search field, which shows the whole catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            query: String::new(),
            results: catalog.categories.clone(),
        }
    }

    /// Replace the search text. Returns true when the results were recomputed.
    pub fn set_query(&mut self, query: &str) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query.to_string();
        self.results = filter_categories(&self.catalog.categories, query);
        trace!(
            query,
            categories = self.results.len(),
            entries = self.match_count(),
            "search results refreshed"
        );
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Category] {
        &self.results
    }

    /// Number of entries across all result categories.
    pub fn match_count(&self) -> usize {
        self.results.iter().map(Category::len).sum()
    }

    /// True when the query matched nothing; render an empty state, not an error.
    pub fn is_empty_result(&self) -> bool {
        self.results.is_empty()
    }
}
