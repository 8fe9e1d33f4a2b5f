//! Run configuration.
//!
//! Settings come from an optional JSON file; command-line flags override the
//! file. Every field has a default so a file may set only what it needs.
//!
//! ```json
//! {
//!   "source": "export/DOCS",
//!   "destination": "site/source/DOCS",
//!   "title": "DOCS",
//!   "url_filter": { "blocked_prefixes": [".", "/", "attachments"] },
//!   "asset_extensions": [".png", ".svg"]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::markdown::UrlFilter;

/// Extensions of attachment files copied next to the converted pages.
pub const DEFAULT_ASSET_EXTENSIONS: &[&str] =
    &[".jpg", ".jpeg", ".png", ".gif", ".svg", ".log", ".yaml", ".eml"];

/// Name of the space index inside the source tree.
pub const DEFAULT_INDEX_NAME: &str = "index.html";

/// Name of the navigation root written to the destination.
pub const INDEX_RST_NAME: &str = "index.rst";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the exported HTML tree.
    pub source: PathBuf,
    /// Root of the Markdown tree to write.
    pub destination: PathBuf,
    /// Space index; `<source>/index.html` when unset.
    pub index: Option<PathBuf>,
    /// Title of `index.rst`; the source directory name when unset.
    pub title: Option<String>,
    pub url_filter: UrlFilter,
    pub asset_extensions: Vec<String>,
    /// Remove the destination before converting.
    pub clean: bool,
    /// Encoding tried when a page is not valid UTF-8.
    pub encoding: Option<String>,
    /// Hide the progress bar.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            index: None,
            title: None,
            url_filter: UrlFilter::default(),
            asset_extensions: DEFAULT_ASSET_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            clean: false,
            encoding: None,
            quiet: false,
        }
    }
}

impl Config {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(
            path = %path.display(),
            source = %config.source.display(),
            destination = %config.destination.display(),
            clean = config.clean,
            "loaded config"
        );
        Ok(config)
    }

    /// Check the settings a run cannot start without.
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(Error::Config("no source directory given".into()));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(Error::Config("no destination directory given".into()));
        }
        if !self.source.is_dir() {
            return Err(Error::Config(format!(
                "source {} is not a directory",
                self.source.display()
            )));
        }
        Ok(())
    }

    pub fn index_path(&self) -> PathBuf {
        self.index
            .clone()
            .unwrap_or_else(|| self.source.join(DEFAULT_INDEX_NAME))
    }

    pub fn index_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Documentation".to_string()),
        }
    }

    /// Whether a non-page file should be copied to the destination.
    ///
    /// Attachment files stored under their numeric id (no extension) count
    /// as assets too.
    pub fn is_asset(&self, file_name: &str) -> bool {
        let numeric_id =
            !file_name.is_empty() && file_name.bytes().all(|b| b.is_ascii_digit());
        numeric_id
            || self
                .asset_extensions
                .iter()
                .any(|ext| file_name.ends_with(ext.as_str()))
    }
}
