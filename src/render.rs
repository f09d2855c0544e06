//! Text and JSON renderings of the list view, the detail view and the share card.
//!
//! Renderers write to any `io::Write` so the CLI streams to stdout and tests
//! capture into a `Vec<u8>`.

use crate::assets::AssetLookup;
use crate::catalog::{CatalogKey, Category, CategoryId, StatusCode, StatusEntry};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Shown instead of the list when a search matches nothing.
pub const EMPTY_STATE: &str = "No matching status codes.";

#[derive(Debug, Serialize)]
/// One list row with its derived label.
pub struct EntryView<'a> {
    pub code: StatusCode,
    pub name: &'a str,
    pub description: &'a str,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryView<'a> {
    pub id: &'a CategoryId,
    pub name: &'a str,
    pub description: &'a str,
    pub entries: Vec<EntryView<'a>>,
}

#[derive(Debug, Serialize)]
/// The list view for one query.
pub struct ListView<'a> {
    pub catalog: &'a CatalogKey,
    pub query: &'a str,
    pub match_count: usize,
    pub categories: Vec<CategoryView<'a>>,
}

#[derive(Debug, Serialize)]
/// The detail view for one entry.
pub struct DetailView<'a> {
    pub code: StatusCode,
    pub name: &'a str,
    pub label: String,
    pub description: &'a str,
    pub category: &'a CategoryId,
    pub category_name: &'a str,
    pub illustration: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Shareable artifact for one entry.
pub struct ShareCard {
    pub title: String,
    pub code: StatusCode,
    pub name: String,
    pub description: String,
    pub image: Option<PathBuf>,
}

impl<'a> EntryView<'a> {
    pub fn new(entry: &'a StatusEntry) -> Self {
        Self {
            code: entry.code,
            name: &entry.name,
            description: &entry.description,
            label: entry.label(),
        }
    }
}

impl<'a> CategoryView<'a> {
    pub fn new(category: &'a Category) -> Self {
        Self {
            id: &category.id,
            name: &category.name,
            description: &category.description,
            entries: category.entries.iter().map(EntryView::new).collect(),
        }
    }
}

impl<'a> ListView<'a> {
    pub fn new(catalog: &'a CatalogKey, query: &'a str, categories: &'a [Category]) -> Self {
        Self {
            catalog,
            query,
            match_count: categories.iter().map(Category::len).sum(),
            categories: categories.iter().map(CategoryView::new).collect(),
        }
    }
}

impl<'a> DetailView<'a> {
    pub fn new(category: &'a Category, entry: &'a StatusEntry, assets: &dyn AssetLookup) -> Self {
        Self {
            code: entry.code,
            name: &entry.name,
            label: entry.label(),
            description: &entry.description,
            category: &category.id,
            category_name: &category.name,
            illustration: assets.illustration(entry.code),
        }
    }
}

impl ShareCard {
    /// Build the card, preferring the dedicated share image over the illustration.
    pub fn new(entry: &StatusEntry, assets: &dyn AssetLookup) -> Self {
        Self {
            title: entry.share_title(),
            code: entry.code,
            name: entry.name.clone(),
            description: entry.description.clone(),
            image: assets
                .share_image(entry.code)
                .or_else(|| assets.illustration(entry.code)),
        }
    }
}

/// Category headers followed by indented `"<code> <name>"` rows.
pub fn render_list<W: Write>(out: &mut W, categories: &[Category]) -> Result<()> {
    if categories.is_empty() {
        writeln!(out, "{EMPTY_STATE}")?;
        return Ok(());
    }
    for (idx, category) in categories.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", category.name)?;
        for entry in &category.entries {
            writeln!(out, "  {}", entry.label())?;
        }
    }
    Ok(())
}

pub fn render_detail<W: Write>(out: &mut W, view: &DetailView<'_>) -> Result<()> {
    writeln!(out, "{}", view.label)?;
    writeln!(out, "Category: {}", view.category_name)?;
    if let Some(image) = &view.illustration {
        writeln!(out, "Image: {}", image.display())?;
    }
    writeln!(out)?;
    writeln!(out, "{}", view.description)?;
    Ok(())
}

pub fn render_share<W: Write>(out: &mut W, card: &ShareCard) -> Result<()> {
    writeln!(out, "{}", card.title)?;
    writeln!(out, "{}", card.description)?;
    if let Some(image) = &card.image {
        writeln!(out, "Image: {}", image.display())?;
    }
    Ok(())
}

/// Serialize `value` as a single JSON line.
pub fn render_json_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("serializing JSON output")?;
    writeln!(out)?;
    Ok(())
}
