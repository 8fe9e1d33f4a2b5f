//! Maps HTML elements to the node kinds the transcoder dispatches on.

use super::arena::{Dom, NodeId};

/// Closed set of element kinds with a dedicated handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `h1`..`h3`. Deeper headings are treated as [`NodeKind::Other`].
    Heading(u8),
    Paragraph,
    Emphasis,
    Strong,
    Strikethrough,
    Code,
    Link,
    Image,
    /// `ul` or `ol`.
    List,
    Table,
    /// `br`.
    LineBreak,
    Other,
}

impl NodeKind {
    /// Map an element tag name to its kind.
    pub fn from_tag(tag: &str) -> NodeKind {
        match tag {
            "h1" => NodeKind::Heading(1),
            "h2" => NodeKind::Heading(2),
            "h3" => NodeKind::Heading(3),
            "p" => NodeKind::Paragraph,
            "em" => NodeKind::Emphasis,
            "strong" => NodeKind::Strong,
            "s" => NodeKind::Strikethrough,
            "code" => NodeKind::Code,
            "a" => NodeKind::Link,
            "img" => NodeKind::Image,
            "ul" | "ol" => NodeKind::List,
            "table" => NodeKind::Table,
            "br" => NodeKind::LineBreak,
            _ => NodeKind::Other,
        }
    }

    /// Kind of a node; text, comments and the document root are [`NodeKind::Other`].
    pub fn of(dom: &Dom, id: NodeId) -> NodeKind {
        dom.tag(id).map(NodeKind::from_tag).unwrap_or(NodeKind::Other)
    }

    /// Markdown delimiters wrapped around inline spans inside table cells.
    pub fn cell_delimiters(self) -> Option<(&'static str, &'static str)> {
        match self {
            NodeKind::Emphasis => Some(("*", "*")),
            NodeKind::Strong => Some(("**", "** ")),
            NodeKind::Strikethrough => Some(("~~", "~~ ")),
            NodeKind::Code => Some(("`", "`")),
            _ => None,
        }
    }
}
