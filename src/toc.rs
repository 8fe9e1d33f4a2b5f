//! Navigation tree built from the space index.
//!
//! The index page lists every page as nested `<ul>` markup. The tree is
//! rebuilt in two steps: anchors are flattened into records carrying their
//! list depth, then an indentation stack turns the records back into a tree.

use serde::Serialize;

use crate::dom::Dom;
use crate::markdown::{HTML_EXT, display_text, page_slug};
use crate::rename::anchors_with_href;

/// Elements that open a nesting level in the index.
const LIST_CONTAINERS: &[&str] = &["ul", "ol"];

/// One index anchor before the tree is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocRecord {
    pub text: String,
    /// Page slug derived from `text`, without extension.
    pub link: String,
    /// Number of enclosing list containers.
    pub indentation: usize,
}

/// Node of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub text: String,
    pub link: String,
    pub indentation: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subitems: Vec<TocEntry>,
}

impl From<TocRecord> for TocEntry {
    fn from(record: TocRecord) -> Self {
        Self {
            text: record.text,
            link: record.link,
            indentation: record.indentation,
            subitems: Vec::new(),
        }
    }
}

impl TocEntry {
    pub fn has_subitems(&self) -> bool {
        !self.subitems.is_empty()
    }
}

/// Flatten the page anchors of an index into records, in document order.
///
/// Only anchors pointing at `.html` pages take part.
pub fn flatten(dom: &Dom) -> Vec<TocRecord> {
    anchors_with_href(dom)
        .filter(|(_, href)| href.ends_with(HTML_EXT))
        .map(|(anchor, href)| {
            let text = display_text(&dom.text_content(anchor), href);
            let indentation = dom
                .ancestors(anchor)
                .filter(|&a| dom.tag(a).is_some_and(|t| LIST_CONTAINERS.contains(&t)))
                .count();
            TocRecord {
                link: page_slug(&text),
                text,
                indentation,
            }
        })
        .collect()
}

/// Rebuild the tree from flat records.
///
/// A record becomes a child of the nearest earlier record with a smaller
/// indentation that is still open. Jumps of more than one level nest under
/// whatever is open; they are not rejected.
pub fn build_tree(records: impl IntoIterator<Item = TocRecord>) -> Vec<TocEntry> {
    let mut roots: Vec<TocEntry> = Vec::new();
    // Open entries, outermost first. An entry is attached to its parent when
    // it is closed, so children keep their document order.
    let mut stack: Vec<TocEntry> = Vec::new();

    fn close(stack: &mut Vec<TocEntry>, roots: &mut Vec<TocEntry>) {
        if let Some(done) = stack.pop() {
            match stack.last_mut() {
                Some(parent) => parent.subitems.push(done),
                None => roots.push(done),
            }
        }
    }

    for record in records {
        while stack
            .last()
            .is_some_and(|top| top.indentation >= record.indentation)
        {
            close(&mut stack, &mut roots);
        }
        stack.push(record.into());
    }
    while !stack.is_empty() {
        close(&mut stack, &mut roots);
    }

    roots
}

/// Navigation forest of a space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TocTree {
    roots: Vec<TocEntry>,
}

impl TocTree {
    pub fn new(roots: Vec<TocEntry>) -> Self {
        Self { roots }
    }

    pub fn from_index(dom: &Dom) -> Self {
        let records = flatten(dom);
        tracing::debug!(records = records.len(), "flattened index anchors");
        Self::new(build_tree(records))
    }

    pub fn roots(&self) -> &[TocEntry] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// First entry, depth-first in document order, whose link is `link`.
    pub fn find(&self, link: &str) -> Option<&TocEntry> {
        fn search<'a>(entries: &'a [TocEntry], link: &str) -> Option<&'a TocEntry> {
            entries.iter().find_map(|entry| {
                if entry.link == link {
                    Some(entry)
                } else {
                    search(&entry.subitems, link)
                }
            })
        }
        search(&self.roots, link)
    }

    /// Pretty JSON rendering of the tree.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
