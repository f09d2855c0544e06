//! Status catalog wiring.
//!
//! This module wraps the JSON table under `catalogs/http_status_v1.json` (and
//! its schema under `schema/`), both compiled into the library. Types here
//! mirror the schema fields; callers use `CatalogIndex` for a validated
//! snapshot with lookup by code.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CatalogKey, CategoryId, StatusCode};
pub use index::CatalogIndex;
pub use model::{Catalog, CatalogMetadata, Category, StatusEntry};

/// Default relative path to the bundled status catalog.
pub const DEFAULT_CATALOG_PATH: &str = "catalogs/http_status_v1.json";

/// The bundled status catalog document.
pub const EMBEDDED_CATALOG_JSON: &str = include_str!("../../catalogs/http_status_v1.json");

/// JSON Schema every catalog document must satisfy.
pub const CATALOG_SCHEMA_JSON: &str =
    include_str!("../../schema/http_status_catalog.schema.json");
