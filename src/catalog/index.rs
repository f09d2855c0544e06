//! Validated, indexed view of a status catalog.
//!
//! The index enforces the catalog schema (JSON Schema plus the ordering and
//! uniqueness rules a schema cannot express) and provides lookup by status
//! code. It is strict about unknown schema versions and category layout so
//! the renderers never see a malformed table.

use crate::catalog::{
    CATALOG_SCHEMA_JSON, Catalog, CatalogKey, CatalogMetadata, Category, CategoryId,
    EMBEDDED_CATALOG_JSON, StatusCode, StatusEntry,
};
use crate::config::allowed_schema_versions;
use crate::schema_loader::{SchemaLoadOptions, load_json_schema_str, validate_instance};
use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

#[derive(Clone, Debug)]
/// Status catalog plus a derived index keyed by status code.
pub struct CatalogIndex {
    catalog: Catalog,
    // (category position, entry position) of the first entry with each code.
    by_code: BTreeMap<StatusCode, (usize, usize)>,
}

impl CatalogIndex {
    /// The compiled-in catalog, parsed and validated once per process.
    pub fn embedded() -> Result<&'static CatalogIndex> {
        static EMBEDDED: OnceLock<CatalogIndex> = OnceLock::new();
        if let Some(index) = EMBEDDED.get() {
            return Ok(index);
        }
        let index = Self::from_json_str(EMBEDDED_CATALOG_JSON, "embedded catalog")?;
        Ok(EMBEDDED.get_or_init(|| index))
    }

    /// Load and validate a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading status catalog {}", path.display()))?;
        Self::from_json_str(&raw, &path.display().to_string())
            .with_context(|| format!("loading {}", path.display()))
    }

    /// Validate a catalog document against the JSON Schema, then the index rules.
    ///
    /// `origin` labels error messages (a path or "embedded catalog").
    pub fn from_json_str(raw: &str, origin: &str) -> Result<Self> {
        let document: Value =
            serde_json::from_str(raw).with_context(|| format!("parsing {origin}"))?;
        let version = document
            .get("schema_version")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("{origin} is missing schema_version"))?;

        let allowed = allowed_schema_versions();
        let schema = load_json_schema_str(
            CATALOG_SCHEMA_JSON,
            "http_status_catalog.schema.json",
            SchemaLoadOptions {
                expected_version: Some(version),
                allowed_versions: Some(&allowed),
                patch_schema_version_const: true,
                ..SchemaLoadOptions::default()
            },
        )?;
        validate_instance(&schema.compiled, &document, origin)?;

        let catalog: Catalog =
            serde_json::from_value(document).with_context(|| format!("decoding {origin}"))?;
        let index = Self::from_catalog(catalog)?;
        debug!(
            origin,
            key = %index.key().0,
            schema_version = %schema.schema_version,
            entries = index.len(),
            "loaded status catalog"
        );
        Ok(index)
    }

    /// Validate an already-decoded catalog and build the code index.
    pub fn from_catalog(catalog: Catalog) -> Result<Self> {
        validate_schema_version(&catalog.schema_version)?;
        validate_catalog_metadata(&catalog.catalog)?;
        validate_category_layout(&catalog.categories)?;
        let by_code = build_index(&catalog)?;
        Ok(Self { catalog, by_code })
    }

    /// The catalog key declared in the loaded document.
    pub fn key(&self) -> &CatalogKey {
        &self.catalog.catalog.key
    }

    /// Access the underlying catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Categories in canonical display order.
    pub fn categories(&self) -> &[Category] {
        &self.catalog.categories
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.catalog.categories.iter().find(|category| &category.id == id)
    }

    /// Resolve a status entry by code.
    ///
    /// Returns `None` instead of erroring; callers surface errors with the CLI
    /// context that referenced the missing code.
    pub fn entry(&self, code: StatusCode) -> Option<&StatusEntry> {
        self.locate(code).map(|(_, entry)| entry)
    }

    /// Like `entry`, also returning the category that holds the entry.
    pub fn locate(&self, code: StatusCode) -> Option<(&Category, &StatusEntry)> {
        let &(category_pos, entry_pos) = self.by_code.get(&code)?;
        let category = &self.catalog.categories[category_pos];
        Some((category, &category.entries[entry_pos]))
    }

    /// Iterates codes in catalog order.
    pub fn codes(&self) -> impl Iterator<Item = StatusCode> + '_ {
        self.catalog.entries().map(|entry| entry.code)
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.catalog.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !schema_version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

fn validate_catalog_metadata(meta: &CatalogMetadata) -> Result<()> {
    if meta.key.0.is_empty() {
        bail!("catalog.key must not be empty");
    }
    if !meta
        .key
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("catalog.key must match ^[A-Za-z0-9_.-]+$, got {}", meta.key.0);
    }
    if meta.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    Ok(())
}

fn validate_category_layout(categories: &[Category]) -> Result<()> {
    let ids: Vec<CategoryId> = categories.iter().map(|category| category.id.clone()).collect();
    let expected: Vec<CategoryId> = CategoryId::ORDERED.to_vec();
    if ids != expected {
        let render = |list: &[CategoryId]| {
            list.iter().map(CategoryId::as_str).collect::<Vec<_>>().join(", ")
        };
        bail!(
            "catalog categories must be [{}] in that order, got [{}]",
            render(&expected),
            render(&ids)
        );
    }

    for category in categories {
        if category.name.trim().is_empty() {
            bail!("category {} has an empty name", category.id);
        }
        if category.is_empty() {
            bail!("category {} contains no entries", category.id);
        }
    }
    Ok(())
}

fn build_index(catalog: &Catalog) -> Result<BTreeMap<StatusCode, (usize, usize)>> {
    let mut map = BTreeMap::new();
    for (category_pos, category) in catalog.categories.iter().enumerate() {
        let mut seen: BTreeSet<StatusCode> = BTreeSet::new();
        for (entry_pos, entry) in category.entries.iter().enumerate() {
            if !entry.code.is_valid() {
                bail!(
                    "category {} has status code {} outside 100-599",
                    category.id,
                    entry.code
                );
            }
            if !seen.insert(entry.code) {
                bail!(
                    "duplicate status code {} in category {}",
                    entry.code,
                    category.id
                );
            }
            if entry.name.trim().is_empty() {
                bail!("status code {} has an empty name", entry.code);
            }
            if entry.code.class().as_ref() != Some(&category.id) {
                warn!(
                    code = entry.code.0,
                    category = %category.id,
                    "status code filed outside its response class"
                );
            }
            map.entry(entry.code).or_insert((category_pos, entry_pos));
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: CategoryId, entries: Vec<StatusEntry>) -> Category {
        Category {
            name: id.as_str().to_string(),
            description: String::new(),
            id,
            entries,
        }
    }

    fn five_categories() -> Vec<Category> {
        vec![
            category(CategoryId::Informational, vec![StatusEntry::new(100, "Continue", "")]),
            category(CategoryId::Success, vec![StatusEntry::new(200, "OK", "")]),
            category(CategoryId::Redirection, vec![StatusEntry::new(301, "Moved", "")]),
            category(CategoryId::ClientError, vec![StatusEntry::new(404, "Not Found", "")]),
            category(CategoryId::ServerError, vec![StatusEntry::new(500, "Oops", "")]),
        ]
    }

    fn catalog(categories: Vec<Category>) -> Catalog {
        Catalog {
            schema_version: "http_status_catalog_v1".to_string(),
            catalog: CatalogMetadata {
                key: CatalogKey("unit".to_string()),
                title: "Unit".to_string(),
                locale: None,
            },
            categories,
        }
    }

    #[test]
    fn accepts_canonical_layout() {
        let index = CatalogIndex::from_catalog(catalog(five_categories())).unwrap();
        assert_eq!(index.len(), 5);
        let (category, entry) = index.locate(StatusCode(404)).unwrap();
        assert_eq!(category.id, CategoryId::ClientError);
        assert_eq!(entry.name, "Not Found");
        assert!(index.entry(StatusCode(418)).is_none());
        assert_eq!(
            index.category(&CategoryId::Success).map(|c| c.len()),
            Some(1)
        );
        assert!(index.category(&CategoryId::Other("teapots".into())).is_none());
    }

    #[test]
    fn rejects_reordered_categories() {
        let mut categories = five_categories();
        categories.swap(0, 1);
        let err = CatalogIndex::from_catalog(catalog(categories)).unwrap_err();
        assert!(err.to_string().contains("in that order"));
    }

    #[test]
    fn rejects_missing_category() {
        let mut categories = five_categories();
        categories.pop();
        assert!(CatalogIndex::from_catalog(catalog(categories)).is_err());
    }

    #[test]
    fn rejects_duplicate_code_within_category() {
        let mut categories = five_categories();
        categories[3]
            .entries
            .push(StatusEntry::new(404, "Not Found Again", ""));
        let err = CatalogIndex::from_catalog(catalog(categories)).unwrap_err();
        assert!(err.to_string().contains("duplicate status code 404"));
    }

    #[test]
    fn allows_same_code_in_different_categories() {
        let mut categories = five_categories();
        categories[4].entries.push(StatusEntry::new(404, "Odd", ""));
        let index = CatalogIndex::from_catalog(catalog(categories)).unwrap();
        let (category, _) = index.locate(StatusCode(404)).unwrap();
        assert_eq!(category.id, CategoryId::ClientError);
    }

    #[test]
    fn rejects_out_of_range_code_and_empty_category() {
        let mut categories = five_categories();
        categories[0].entries.push(StatusEntry::new(42, "Answer", ""));
        assert!(CatalogIndex::from_catalog(catalog(categories)).is_err());

        let mut categories = five_categories();
        categories[2].entries.clear();
        let err = CatalogIndex::from_catalog(catalog(categories)).unwrap_err();
        assert!(err.to_string().contains("contains no entries"));
    }

    #[test]
    fn rejects_bad_metadata() {
        let mut bad = catalog(five_categories());
        bad.catalog.key = CatalogKey("has space".to_string());
        assert!(CatalogIndex::from_catalog(bad).is_err());

        let mut bad = catalog(five_categories());
        bad.catalog.title = "  ".to_string();
        assert!(CatalogIndex::from_catalog(bad).is_err());

        let mut bad = catalog(five_categories());
        bad.schema_version = "unknown_catalog_v0".to_string();
        let err = CatalogIndex::from_catalog(bad).unwrap_err();
        assert!(err.to_string().contains("not in allowed set"));
    }

    #[test]
    fn schema_rejects_unknown_fields() {
        let raw = serde_json::json!({
            "schema_version": "http_status_catalog_v1",
            "catalog": {"key": "unit", "title": "Unit"},
            "categories": [],
            "surprise": true
        })
        .to_string();
        let err = CatalogIndex::from_json_str(&raw, "inline").unwrap_err();
        assert!(format!("{err:#}").contains("failed schema validation"));
    }

    #[test]
    fn embedded_catalog_is_valid() {
        let index = CatalogIndex::embedded().unwrap();
        assert_eq!(index.categories().len(), 5);
        assert_eq!(index.len(), 50);
        let ids: Vec<CategoryId> = index.categories().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, CategoryId::ORDERED.to_vec());
        assert_eq!(
            index.entry(StatusCode(404)).map(|e| e.name.as_str()),
            Some("Not Found")
        );
        let codes: Vec<u16> = index.codes().map(|c| c.0).collect();
        assert_eq!(codes.first(), Some(&100));
        assert_eq!(codes.last(), Some(&511));
    }

    #[test]
    fn embedded_text_has_no_surrounding_whitespace() {
        let index = CatalogIndex::embedded().unwrap();
        for category in index.categories() {
            assert_eq!(category.description, category.description.trim(), "{}", category.id);
            for entry in &category.entries {
                assert_eq!(entry.name, entry.name.trim(), "{}", entry.code);
                assert_eq!(entry.description, entry.description.trim(), "{}", entry.code);
            }
        }
    }
}
