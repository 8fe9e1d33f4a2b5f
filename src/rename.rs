//! Page rename table.
//!
//! Every page of an export is reachable from the space index. The index
//! anchors give each page file (`Install_Guide_123456.html`) a human title,
//! which becomes the page's Markdown filename (`Install_Guide.md`). Links
//! between pages are rewritten through this table.

use std::collections::HashMap;

use crate::dom::{Dom, NodeId};
use crate::markdown::{display_text, markdown_filename, page_slug, swap_extension};

/// Map from original href (as written in the index) to output filename.
///
/// Keys are unique and the first anchor seen for an href wins. Values always
/// end in `.md`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameTable {
    entries: HashMap<String, String>,
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from every `a[href]` of a parsed index document.
    pub fn from_index(dom: &Dom) -> Self {
        let mut table = Self::new();
        for (anchor, href) in anchors_with_href(dom) {
            let text = display_text(&dom.text_content(anchor), href);
            table.insert(href, &text);
        }
        tracing::debug!(entries = table.len(), "built rename table");
        table
    }

    /// Record `href → slug(title).md` unless `href` is already known.
    ///
    /// Returns whether the entry was added.
    pub fn insert(&mut self, href: &str, title: &str) -> bool {
        if self.entries.contains_key(href) {
            return false;
        }
        let filename = markdown_filename(&page_slug(title));
        self.entries.insert(href.to_string(), filename);
        true
    }

    /// Output filename recorded for an exact href.
    pub fn get(&self, href: &str) -> Option<&str> {
        self.entries.get(href).map(String::as_str)
    }

    pub fn contains(&self, href: &str) -> bool {
        self.entries.contains_key(href)
    }

    /// Target for a link found in a page.
    ///
    /// Known hrefs map to their table entry; unknown ones only get their
    /// `.html` extension swapped for `.md`.
    pub fn resolve(&self, href: &str) -> String {
        let href = href.trim();
        match self.get(href) {
            Some(filename) => filename.to_string(),
            None => swap_extension(href),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Anchors of `dom` that carry an `href`, in document order.
pub(crate) fn anchors_with_href(dom: &Dom) -> impl Iterator<Item = (NodeId, &str)> {
    dom.find_all(dom.document(), &["a"])
        .filter_map(|a| dom.attr(a, "href").map(|href| (a, href)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    const INDEX: &str = r#"
        <ul>
          <li><a href="Home_1.html">Home</a>
            <ul>
              <li><a href="Install_Guide_2.html">Install
                  Guide</a></li>
              <li><a href="Install_Guide_2.html">Duplicate Title</a></li>
              <li><a href="Blank_3.html">  </a></li>
            </ul>
          </li>
        </ul>
        <a>no href</a>
    "#;

    #[test]
    fn test_from_index() {
        let table = RenameTable::from_index(&parse_html(INDEX));

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("Home_1.html"), Some("Home.md"));
        assert_eq!(table.get("Install_Guide_2.html"), Some("Install_Guide.md"));
    }

    #[test]
    fn test_first_seen_wins() {
        let mut table = RenameTable::new();
        assert!(table.insert("a.html", "First"));
        assert!(!table.insert("a.html", "Second"));
        assert_eq!(table.get("a.html"), Some("First.md"));
    }

    #[test]
    fn test_blank_text_falls_back_to_href() {
        let table = RenameTable::from_index(&parse_html(INDEX));
        assert_eq!(table.get("Blank_3.html"), Some("Blank_3.md"));
    }

    #[test]
    fn test_resolve() {
        let table = RenameTable::from_index(&parse_html(INDEX));
        assert_eq!(table.resolve(" Home_1.html "), "Home.md");
        assert_eq!(table.resolve("Unknown_9.html"), "Unknown_9.md");
        assert_eq!(table.resolve("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_anchors_with_href() {
        let dom = parse_html(INDEX);
        let hrefs: Vec<_> = anchors_with_href(&dom).map(|(_, h)| h).collect();
        assert_eq!(
            hrefs,
            vec!["Home_1.html", "Install_Guide_2.html", "Install_Guide_2.html", "Blank_3.html"]
        );
    }
}
