//! Exported wiki pages → MyST Markdown.
//!
//! The design separates pure rendering from I/O:
//!
//! - [`slugify`]: page title → output filename
//! - [`filter`]: which link targets and image sources survive
//! - [`render`]: page walk producing a list of [`Block`]s
//! - `inline`: position-aware rendering of paragraphs and table cells
//! - `table`: `list-table` directives
//!
//! The export layer ([`crate::export`]) handles reading pages and writing the
//! results.
//!
//! ## Design Notes
//!
//! - **Blocks first, text last**: handlers push [`Block`]s; spacing between
//!   blocks is decided once, in [`MarkdownDocument::to_markdown`].
//! - **Links in place**: a link is written at its own position in the node
//!   tree, so identical words elsewhere in a paragraph are left alone.
//! - **Flat lists**: nested lists are flattened to one level.

mod filter;
mod inline;
mod render;
mod slugify;
mod table;

pub use filter::{DEFAULT_BLOCKED_PREFIXES, DEFAULT_THUMBNAIL_MARKER, UrlFilter};
pub use render::{Block, MarkdownDocument, TITLE_HEADING_ID, Transcoder};
pub use slugify::{
    HTML_EXT, MARKDOWN_EXT, display_text, markdown_filename, page_slug, swap_extension,
};
pub use table::ListTable;

use crate::rename::RenameTable;

/// Convert one page to Markdown text.
///
/// ```
/// use wikimyst::markdown::{UrlFilter, convert_page};
/// use wikimyst::rename::RenameTable;
///
/// let md = convert_page(
///     "<h1 id=\"title-heading\">Docs : Welcome</h1><p>Hello <em>there</em></p>",
///     &RenameTable::new(),
///     &UrlFilter::default(),
/// );
/// assert_eq!(md, "# Welcome\n\nHello there\n\n*there*");
/// ```
pub fn convert_page(html: &str, table: &RenameTable, filter: &UrlFilter) -> String {
    Transcoder::new(table, filter).convert(html).to_markdown()
}
