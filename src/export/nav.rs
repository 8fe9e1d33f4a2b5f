//! Sphinx navigation output: the root `index.rst` and per-page toctrees.

use std::fmt::Write;

use crate::markdown::MARKDOWN_EXT;
use crate::toc::{TocEntry, TocTree};

/// Root document listing the children of every top-level index entry.
///
/// The top-level entries themselves (usually the space home page) are not
/// listed; their children form the first navigation level.
pub fn render_index(tree: &TocTree, title: &str) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.extend(std::iter::repeat_n('=', title.chars().count()));
    out.push_str("\n\n.. toctree::\n   :hidden:\n\n");
    for root in tree.roots() {
        write_entries(&mut out, &root.subitems);
    }
    out
}

/// Hidden toctree appended to a page that has children in the index.
///
/// `filename` is the page's output name (`Install_Guide.md`).
pub fn render_child_toctree(tree: &TocTree, filename: &str) -> Option<String> {
    let link = filename.strip_suffix(MARKDOWN_EXT).unwrap_or(filename);
    let entry = tree.find(link).filter(|e| e.has_subitems())?;

    let mut out = String::from("\n\n```{toctree}\n   :hidden:\n\n");
    write_entries(&mut out, &entry.subitems);
    out.push_str("```\n");
    Some(out)
}

fn write_entries(out: &mut String, entries: &[TocEntry]) {
    for entry in entries {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "   {} <{}>", entry.text, entry.link);
    }
}
