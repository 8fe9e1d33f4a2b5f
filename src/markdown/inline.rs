//! Position-aware inline rendering of paragraph and table-cell subtrees.
//!
//! Links and images are written where they occur in the node tree, so a
//! link whose text also appears elsewhere in the same paragraph only ever
//! replaces its own occurrence.

use crate::dom::{NodeId, NodeKind};
use crate::util::{clean_text, collapse_repeated, collapse_whitespace};

use super::render::PageRenderer;

/// Line break marker inside list-table cells.
const CELL_BREAK: &str = "<br>";

/// Elements that stop a cell link from being rewritten.
const LINK_BLOCKERS: &[&str] = &["img", "a"];

impl PageRenderer<'_> {
    /// Render a paragraph's text with links rewritten in place.
    ///
    /// Images are not placed inline: their references are returned separately
    /// so the caller can append the ones missing from the text.
    pub(super) fn paragraph_inline(&mut self, p: NodeId) -> (String, Vec<String>) {
        let mut text = String::new();
        let mut images = Vec::new();
        self.paragraph_children(p, &mut text, &mut images);
        (text, images)
    }

    fn paragraph_children(&mut self, parent: NodeId, out: &mut String, images: &mut Vec<String>) {
        let dom = self.dom;
        for child in dom.children(parent) {
            if let Some(text) = dom.text(child) {
                out.push_str(text);
                continue;
            }
            match NodeKind::of(dom, child) {
                NodeKind::Link => {
                    let href = dom.attr(child, "href");
                    let raw = dom.text_content(child);
                    let label = collapse_whitespace(&raw);
                    if self.ctx.filter().allows(href) && !label.is_empty() {
                        let fragment = self.link_fragment(href.unwrap_or_default(), &label);
                        push_wrapped(out, &raw, &fragment);
                        self.emitted.push(fragment);
                        // Images nested in the link still belong to the paragraph.
                        images.extend(
                            dom.find_all(child, &["img"])
                                .filter_map(|img| self.image_fragment(img)),
                        );
                    } else {
                        self.paragraph_children(child, out, images);
                    }
                }
                NodeKind::Image => images.extend(self.image_fragment(child)),
                NodeKind::LineBreak => out.push('\n'),
                _ => self.paragraph_children(child, out, images),
            }
        }
    }

    /// Render a table cell to a single Markdown line.
    pub(super) fn cell_inline(&mut self, cell: NodeId) -> String {
        let raw = self.cell_children(cell);
        let cleaned = clean_text(&raw).replace('\n', CELL_BREAK);
        collapse_repeated(&cleaned, CELL_BREAK, 2)
    }

    fn cell_children(&mut self, parent: NodeId) -> String {
        let dom = self.dom;
        let mut out = String::new();
        for child in dom.children(parent) {
            if let Some(text) = dom.text(child) {
                out.push_str(text);
                continue;
            }
            let kind = NodeKind::of(dom, child);
            match kind {
                NodeKind::Link => {
                    let href = dom.attr(child, "href");
                    let raw = dom.text_content(child);
                    let label = collapse_whitespace(&raw);
                    if !dom.contains_tag(child, LINK_BLOCKERS)
                        && self.ctx.filter().allows(href)
                        && !label.is_empty()
                    {
                        let fragment = self.link_fragment(href.unwrap_or_default(), &label);
                        push_wrapped(&mut out, &raw, &fragment);
                        self.emitted.push(fragment);
                    } else {
                        out.push_str(&self.cell_children(child));
                    }
                }
                NodeKind::Image => {
                    if let Some(fragment) = self.image_fragment(child) {
                        out.push_str(&fragment);
                        self.emitted.push(fragment);
                    }
                }
                NodeKind::LineBreak => out.push('\n'),
                _ => {
                    let inner = self.cell_children(child);
                    match kind.cell_delimiters() {
                        Some((open, close)) if !inner.trim().is_empty() => {
                            let wrapped = format!("{open}{}{close}", inner.trim());
                            push_wrapped(&mut out, &inner, &wrapped);
                        }
                        _ => out.push_str(&inner),
                    }
                }
            }
        }
        out
    }
}

/// Push `replacement` in place of `original`, keeping the whitespace that
/// surrounded `original`.
fn push_wrapped(out: &mut String, original: &str, replacement: &str) {
    let leading = original.len() - original.trim_start().len();
    let trailing = original.len() - original.trim_end().len();
    if leading == original.len() {
        out.push_str(replacement);
        return;
    }
    out.push_str(&original[..leading]);
    out.push_str(replacement);
    out.push_str(&original[original.len() - trailing..]);
}
