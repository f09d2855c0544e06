//! Shared library for the `httpcodes` reference.
//!
//! The crate exposes the status catalog (compiled-in, schema-validated), the
//! incremental search filter over it, and the renderers the CLI uses for the
//! list view, the detail view and the share card. Public functions here form
//! the contract the binary depends on: catalog loading, filtering, asset
//! lookup and output rendering.

use anyhow::Result;
use std::borrow::Cow;

pub mod assets;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod logging;
pub mod render;
mod schema_loader;

pub use assets::{AssetDirectory, AssetLookup, NoAssets};
pub use catalog::{
    Catalog, CatalogIndex, CatalogKey, CatalogMetadata, Category, CategoryId, StatusCode,
    StatusEntry,
};
pub use config::Settings;
pub use filter::{FoldedQuery, SearchSession, filter_categories};
pub use render::{DetailView, ListView, ShareCard};

/// Catalog selected by `settings`: the file override when one is configured,
/// otherwise the embedded table.
pub fn load_catalog(settings: &Settings) -> Result<Cow<'static, CatalogIndex>> {
    match &settings.catalog_path {
        Some(path) => Ok(Cow::Owned(CatalogIndex::load(path)?)),
        None => Ok(Cow::Borrowed(CatalogIndex::embedded()?)),
    }
}

/// Asset lookup selected by `settings`.
pub fn asset_lookup(settings: &Settings) -> Box<dyn AssetLookup> {
    match &settings.assets_dir {
        Some(dir) => Box::new(AssetDirectory::new(dir.clone())),
        None => Box::new(NoAssets),
    }
}
