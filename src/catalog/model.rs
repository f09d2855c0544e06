//! Deserializable representation of `catalogs/http_status_v1.json`.
//!
//! The types mirror the catalog schema so the filter, the renderers and tests
//! can work with typed records instead of ad-hoc JSON. Use `CatalogIndex` for
//! validation and code lookup; these structs are the plain data.

use crate::catalog::identity::{CatalogKey, CategoryId, StatusCode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Full status catalog as stored on disk.
pub struct Catalog {
    pub schema_version: String,
    pub catalog: CatalogMetadata,
    pub categories: Vec<Category>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Identity and display metadata for one catalog snapshot.
pub struct CatalogMetadata {
    pub key: CatalogKey,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One response class with its entries in display order.
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub entries: Vec<StatusEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A single status code with its reason phrase and description.
pub struct StatusEntry {
    pub code: StatusCode,
    pub name: String,
    pub description: String,
}

impl StatusEntry {
    pub fn new(code: u16, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: StatusCode(code),
            name: name.into(),
            description: description.into(),
        }
    }

    /// `"<code> <name>"`, the list row text and the string searches match against.
    pub fn label(&self) -> String {
        format!("{} {}", self.code, self.name)
    }

    /// `"<code> - <name>"`, used as the title of a shared card.
    pub fn share_title(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

impl Category {
    /// Number of entries in this category.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, code: StatusCode) -> Option<&StatusEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }
}

impl Catalog {
    /// Parse a catalog document without additional validation.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(data).context("parsing status catalog")?;
        Ok(catalog)
    }

    /// Total entries across all categories.
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    /// Iterates every entry in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = &StatusEntry> {
        self.categories.iter().flat_map(|category| category.entries.iter())
    }

    /// Copy of this catalog with `categories` swapped for a derived list.
    pub fn with_categories(&self, categories: Vec<Category>) -> Self {
        Self {
            schema_version: self.schema_version.clone(),
            catalog: self.catalog.clone(),
            categories,
        }
    }
}
