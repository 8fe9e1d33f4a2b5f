//! Page → MyST Markdown transcoding.
//!
//! A page is walked once in document order. Each element kind has one
//! handler that turns it into a [`Block`]; blocks are joined into text only
//! at the end, by [`MarkdownDocument::to_markdown`].

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::{Dom, NodeId, NodeKind, parse_html, strip_boilerplate};
use crate::rename::RenameTable;
use crate::util::{collapse_blank_lines, collapse_spaces, collapse_whitespace};

use super::filter::UrlFilter;
use super::table::ListTable;

/// `id` of the heading holding the page title in exported pages.
pub const TITLE_HEADING_ID: &str = "title-heading";

/// Paragraph text of the inline table-of-contents macro placeholder.
const TOC_PLACEHOLDER: &str = "TOC";

/// Exported titles read `Space name : Page title`; only the page title is kept.
static TITLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^:]+:\s(.*?)$").expect("title pattern is valid"));

/// One unit of converted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    /// Emphasis, strong, link or image found outside a paragraph.
    Inline(String),
    List(Vec<String>),
    Table(ListTable),
}

impl Block {
    fn write(&self, out: &mut String) {
        match self {
            Block::Heading { level, text } => {
                out.push_str("\n\n");
                out.extend(std::iter::repeat_n('#', *level as usize));
                out.push(' ');
                out.push_str(text);
                out.push_str("\n\n");
            }
            Block::Paragraph(text) => {
                out.push('\n');
                out.push_str(text);
                out.push_str("\n\n");
            }
            Block::Inline(fragment) => {
                out.push_str(fragment);
                out.push(' ');
            }
            Block::List(items) => {
                for item in items {
                    out.push_str("  - ");
                    out.push_str(item);
                    out.push('\n');
                }
            }
            Block::Table(table) => table.write(out),
        }
    }
}

/// Converted page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownDocument {
    pub blocks: Vec<Block>,
    /// Every link and image reference emitted, in order.
    pub emitted: Vec<String>,
}

impl MarkdownDocument {
    /// Join the blocks, trim the result and collapse blank-line runs.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            block.write(&mut out);
        }
        collapse_blank_lines(out.trim())
    }
}

/// Read-only context shared by every page of a run.
#[derive(Debug, Clone, Copy)]
pub struct Transcoder<'a> {
    table: &'a RenameTable,
    filter: &'a UrlFilter,
}

impl<'a> Transcoder<'a> {
    pub fn new(table: &'a RenameTable, filter: &'a UrlFilter) -> Self {
        Self { table, filter }
    }

    pub fn table(&self) -> &'a RenameTable {
        self.table
    }

    pub fn filter(&self) -> &'a UrlFilter {
        self.filter
    }

    /// Parse a page, drop its boilerplate and convert it.
    pub fn convert(&self, html: &str) -> MarkdownDocument {
        let mut dom = parse_html(html);
        let removed = strip_boilerplate(&mut dom);
        tracing::trace!(removed, "stripped boilerplate regions");
        self.convert_dom(&dom)
    }

    /// Convert an already parsed (and cleaned) page.
    pub fn convert_dom(&self, dom: &Dom) -> MarkdownDocument {
        PageRenderer::new(*self, dom).render()
    }
}

/// Ancestry facts that change how a node is handled.
#[derive(Debug, Clone, Copy, Default)]
struct Scope {
    /// Inside a `<p>`: links and images were absorbed by the paragraph.
    in_paragraph: bool,
}

impl Scope {
    fn enter(self, kind: NodeKind) -> Self {
        Self {
            in_paragraph: self.in_paragraph || kind == NodeKind::Paragraph,
        }
    }
}

/// Mutable state of one page conversion.
pub(super) struct PageRenderer<'a> {
    pub(super) ctx: Transcoder<'a>,
    pub(super) dom: &'a Dom,
    blocks: Vec<Block>,
    pub(super) emitted: Vec<String>,
    has_title: bool,
}

impl<'a> PageRenderer<'a> {
    pub(super) fn new(ctx: Transcoder<'a>, dom: &'a Dom) -> Self {
        Self {
            ctx,
            dom,
            blocks: Vec::new(),
            emitted: Vec::new(),
            has_title: false,
        }
    }

    fn render(mut self) -> MarkdownDocument {
        self.walk(self.dom.document(), Scope::default());
        MarkdownDocument {
            blocks: self.blocks,
            emitted: self.emitted,
        }
    }

    fn walk(&mut self, parent: NodeId, scope: Scope) {
        let dom = self.dom;
        for child in dom.children(parent) {
            if !dom.is_element(child) {
                continue;
            }
            let kind = NodeKind::of(dom, child);
            if self.visit(child, kind, scope) {
                self.walk(child, scope.enter(kind));
            }
        }
    }

    /// Handle one element. Returns whether its children should be visited.
    fn visit(&mut self, id: NodeId, kind: NodeKind, scope: Scope) -> bool {
        match kind {
            NodeKind::Heading(level) => self.heading(id, level),
            NodeKind::Paragraph => return self.paragraph(id),
            NodeKind::Emphasis => self.emphasis(id),
            NodeKind::Strong => self.strong(id),
            NodeKind::Link if !scope.in_paragraph => self.link(id),
            NodeKind::Image if !scope.in_paragraph => self.image(id),
            NodeKind::List => self.list(id),
            NodeKind::Table => {
                if let Some(table) = self.table(id) {
                    self.blocks.push(Block::Table(table));
                }
                return false;
            }
            NodeKind::Link
            | NodeKind::Image
            | NodeKind::Strikethrough
            | NodeKind::Code
            | NodeKind::LineBreak
            | NodeKind::Other => {}
        }
        true
    }

    fn heading(&mut self, id: NodeId, level: u8) {
        let text = collapse_whitespace(&self.dom.text_content(id));

        let (level, text) = if !self.has_title
            && self.dom.element_id(id) == Some(TITLE_HEADING_ID)
        {
            self.has_title = true;
            (level, strip_title_prefix(&text).to_string())
        } else if self.has_title {
            (level + 1, text)
        } else {
            (level, text)
        };

        self.blocks.push(Block::Heading { level, text });
    }

    /// Returns whether the paragraph's children should still be visited.
    fn paragraph(&mut self, id: NodeId) -> bool {
        if self.dom.text_content(id).trim() == TOC_PLACEHOLDER {
            return false;
        }

        let (text, images) = self.paragraph_inline(id);
        let mut text = text.trim().to_string();
        for image in images {
            if !text.contains(&image) {
                text.push(' ');
                text.push_str(&image);
                self.emitted.push(image);
            }
        }

        let text = collapse_blank_lines(&collapse_spaces(text.trim()));
        if !text.is_empty() {
            self.blocks.push(Block::Paragraph(text));
        }
        true
    }

    fn emphasis(&mut self, id: NodeId) {
        let text = self.dom.text_content(id);
        let text = text.trim();
        if !text.is_empty() {
            self.blocks.push(Block::Inline(format!("*{text}*")));
        }
    }

    fn strong(&mut self, id: NodeId) {
        let text = self.dom.text_content(id);
        let text = text.trim();
        if !text.is_empty() {
            self.blocks.push(Block::Inline(format!("**{text}**")));
        }
    }

    fn link(&mut self, id: NodeId) {
        let href = self.dom.attr(id, "href");
        if !self.ctx.filter.allows(href) {
            return;
        }
        let text = collapse_whitespace(&self.dom.text_content(id));
        let text = if text.is_empty() { "link" } else { &text };
        let fragment = self.link_fragment(href.unwrap_or_default(), text);
        self.emitted.push(fragment.clone());
        self.blocks.push(Block::Inline(fragment));
    }

    fn image(&mut self, id: NodeId) {
        if let Some(fragment) = self.image_fragment(id) {
            self.emitted.push(fragment.clone());
            self.blocks.push(Block::Inline(fragment));
        }
    }

    /// Every `li` under the list, flattened to one level.
    fn list(&mut self, id: NodeId) {
        let items = self
            .dom
            .find_all(id, &["li"])
            .map(|li| self.dom.text_content(li).trim().to_string())
            .collect();
        self.blocks.push(Block::List(items));
    }

    /// `[text](target)` with the target rewritten through the rename table.
    pub(super) fn link_fragment(&self, href: &str, text: &str) -> String {
        format!("[{text}]({})", self.ctx.table.resolve(href))
    }

    /// `![alt](src)` for an image that passes the filters.
    pub(super) fn image_fragment(&self, id: NodeId) -> Option<String> {
        let src = self.dom.attr(id, "src");
        if !self.ctx.filter.allows_image(src) {
            return None;
        }
        let src = src.unwrap_or_default().trim();
        let alt = match self.dom.attr(id, "alt").map(str::trim) {
            None => "Image",
            Some("") => src,
            Some(alt) => alt,
        };
        Some(format!("![{alt}]({src})"))
    }
}

/// Keep only what follows the first `prefix: ` of an exported title.
fn strip_title_prefix(title: &str) -> &str {
    TITLE_PREFIX
        .captures(title)
        .and_then(|c| c.get(1))
        .map_or(title, |m| m.as_str())
}
