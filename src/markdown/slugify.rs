//! Page filename slugs.
//!
//! Exported pages are named after their titles: whitespace becomes `_`,
//! everything outside a small allow-list is percent-encoded, and the `.html`
//! extension is swapped for `.md`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::util::collapse_whitespace;

/// Source page extension.
pub const HTML_EXT: &str = ".html";
/// Output page extension.
pub const MARKDOWN_EXT: &str = ".md";

/// Bytes left unencoded: the unreserved marks plus `:()?&=#`.
const SLUG_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b':')
    .remove(b'(')
    .remove(b')')
    .remove(b'?')
    .remove(b'&')
    .remove(b'=')
    .remove(b'#');

/// Visible text of an anchor, with `fallback` used when the text is blank.
///
/// ```
/// use wikimyst::markdown::display_text;
///
/// assert_eq!(display_text("\n  Release\n  Notes ", "x.html"), "Release Notes");
/// assert_eq!(display_text("  ", "x.html"), "x.html");
/// ```
pub fn display_text(text: &str, fallback: &str) -> String {
    let text = collapse_whitespace(text);
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

/// URL-safe slug for a page title.
///
/// ```
/// use wikimyst::markdown::page_slug;
///
/// assert_eq!(page_slug("Release Notes"), "Release_Notes");
/// assert_eq!(page_slug("Q&A: Setup (v2)"), "Q&A:_Setup_(v2)");
/// assert_eq!(page_slug("50% done"), "50%25_done");
/// assert_eq!(page_slug("page.html"), "page.md");
/// ```
pub fn page_slug(text: &str) -> String {
    let underscored = collapse_whitespace(text).replace(' ', "_");
    let encoded: String = utf8_percent_encode(&underscored, SLUG_SAFE)
        .to_string()
        .chars()
        .filter(|&c| c != '~' && c != '*')
        .collect();
    swap_extension(&encoded)
}

/// Replace a trailing `.html` with `.md`; other names are returned unchanged.
pub fn swap_extension(name: &str) -> String {
    match name.strip_suffix(HTML_EXT) {
        Some(stem) => format!("{stem}{MARKDOWN_EXT}"),
        None => name.to_string(),
    }
}

/// Output filename for a page slug: the slug with `.md` ensured at the end.
pub fn markdown_filename(slug: &str) -> String {
    if slug.ends_with(MARKDOWN_EXT) {
        slug.to_string()
    } else {
        format!("{slug}{MARKDOWN_EXT}")
    }
}
