//! Per-code image lookup.
//!
//! Images are an external collaborator keyed by status code: one
//! illustration shown on the detail view and one image handed out when an
//! entry is shared. The catalog never depends on them; a missing asset
//! simply renders without an image.

use crate::catalog::StatusCode;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Placeholder substituted with the numeric code in asset stems.
pub const CODE_PLACEHOLDER: &str = "{code}";
pub const DEFAULT_ILLUSTRATION_STEM: &str = "{code}";
pub const DEFAULT_SHARE_STEM: &str = "{code}-meme";

/// Resolves image assets for a status code.
pub trait AssetLookup {
    /// Image shown alongside the detail view.
    fn illustration(&self, code: StatusCode) -> Option<PathBuf>;
    /// Image attached to a shared card.
    fn share_image(&self, code: StatusCode) -> Option<PathBuf>;
}

/// Lookup used when no asset directory is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAssets;

impl AssetLookup for NoAssets {
    fn illustration(&self, _code: StatusCode) -> Option<PathBuf> {
        None
    }

    fn share_image(&self, _code: StatusCode) -> Option<PathBuf> {
        None
    }
}

/// Assets stored as files in one directory, matched by file stem.
///
/// Any extension is accepted. When several files share a stem the
/// lexicographically first path wins so lookups are deterministic.
#[derive(Clone, Debug)]
pub struct AssetDirectory {
    root: PathBuf,
    illustration_stem: String,
    share_stem: String,
}

impl AssetDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            illustration_stem: DEFAULT_ILLUSTRATION_STEM.to_string(),
            share_stem: DEFAULT_SHARE_STEM.to_string(),
        }
    }

    /// Override the stem templates; each may contain `{code}`.
    pub fn with_stems(mut self, illustration: &str, share: &str) -> Self {
        self.illustration_stem = illustration.to_string();
        self.share_stem = share.to_string();
        self
    }

    fn find(&self, template: &str, code: StatusCode) -> Option<PathBuf> {
        let stem = template.replace(CODE_PLACEHOLDER, &code.to_string());
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(root = %self.root.display(), error = %err, "asset directory unreadable");
                return None;
            }
        };
        let mut matches: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .filter(|path| path.file_stem().and_then(|s| s.to_str()) == Some(stem.as_str()))
            .collect();
        matches.sort();
        matches.into_iter().next()
    }
}

impl AssetLookup for AssetDirectory {
    fn illustration(&self, code: StatusCode) -> Option<PathBuf> {
        self.find(&self.illustration_stem, code)
    }

    fn share_image(&self, code: StatusCode) -> Option<PathBuf> {
        self.find(&self.share_stem, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn resolves_default_stems_with_any_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("404.png"), b"img").unwrap();
        fs::write(dir.path().join("404-meme.jpg"), b"img").unwrap();
        fs::write(dir.path().join("4040.png"), b"img").unwrap();

        let assets = AssetDirectory::new(dir.path());
        assert_eq!(
            assets.illustration(StatusCode(404)),
            Some(dir.path().join("404.png"))
        );
        assert_eq!(
            assets.share_image(StatusCode(404)),
            Some(dir.path().join("404-meme.jpg"))
        );
        assert_eq!(assets.illustration(StatusCode(500)), None);
    }

    #[test]
    fn picks_first_path_when_stems_collide() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("200.webp"), b"img").unwrap();
        fs::write(dir.path().join("200.gif"), b"img").unwrap();
        let assets = AssetDirectory::new(dir.path());
        assert_eq!(
            assets.illustration(StatusCode(200)),
            Some(dir.path().join("200.gif"))
        );
    }

    #[test]
    fn custom_stems_and_missing_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("status_418.svg"), b"img").unwrap();
        let assets = AssetDirectory::new(dir.path()).with_stems("status_{code}", "share_{code}");
        assert_eq!(
            assets.illustration(StatusCode(418)),
            Some(dir.path().join("status_418.svg"))
        );
        assert_eq!(assets.share_image(StatusCode(418)), None);

        let gone = AssetDirectory::new(dir.path().join("missing"));
        assert_eq!(gone.illustration(StatusCode(418)), None);
        assert_eq!(NoAssets.share_image(StatusCode(418)), None);
    }
}
