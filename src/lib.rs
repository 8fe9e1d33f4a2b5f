//! # wikimyst
//!
//! Converts an exported wiki space (a directory of HTML pages plus an index
//! page) into MyST Markdown with a Sphinx navigation tree.
//!
//! ## Features
//!
//! - Headings, paragraphs, inline emphasis, links, images and lists
//! - Tables as `:::{list-table}` directives with widths and header rows
//! - Pages renamed after their titles, with links between pages rewritten
//! - `index.rst` and per-page hidden toctrees rebuilt from the space index
//! - Attachments copied next to the converted pages
//!
//! ## Quick Start
//!
//! ```no_run
//! use wikimyst::{Config, Converter};
//!
//! let report = Converter::new(Config::new("export/DOCS", "site/source/DOCS"))?.run()?;
//! assert!(report.is_success());
//! # Ok::<(), wikimyst::Error>(())
//! ```
//!
//! ## Converting a Single Page
//!
//! ```
//! use wikimyst::markdown::{UrlFilter, convert_page};
//! use wikimyst::RenameTable;
//!
//! let mut table = RenameTable::new();
//! table.insert("Setup_1234.html", "Setup Guide");
//!
//! let md = convert_page(
//!     r#"<p>Read <a href="Setup_1234.html">the guide</a>.</p>"#,
//!     &table,
//!     &UrlFilter::default(),
//! );
//! assert_eq!(md, "Read [the guide](Setup_Guide.md).");
//! ```

pub mod config;
pub mod dom;
mod error;
pub mod export;
pub mod markdown;
pub mod rename;
pub mod toc;
pub(crate) mod util;

pub use config::Config;
pub use error::{Error, Result};
pub use export::{Converter, RunReport};
pub use rename::RenameTable;
pub use toc::{TocEntry, TocTree};
pub use util::decode_text;
