//! HTML parsing into an arena DOM.
//!
//! Pages are parsed with html5ever, which recovers from malformed markup the
//! way browsers do, into a [`Dom`] that the transcoder walks in document
//! order.
//!
//! ```
//! use wikimyst::dom::parse_html;
//!
//! let dom = parse_html("<p>Hello <a href=\"Other_1.html\">Other</a></p>");
//! let link = dom.find_all(dom.document(), &["a"]).next().unwrap();
//! assert_eq!(dom.attr(link, "href"), Some("Other_1.html"));
//! ```

mod arena;
mod kind;
mod tree_sink;

pub use arena::{Attribute, Dom, Node, NodeData, NodeId};
pub use kind::NodeKind;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::DomSink;

/// Parse an HTML document.
pub fn parse_html(html: &str) -> Dom {
    parse_document(DomSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// A region of exported pages that carries no content.
#[derive(Debug, Clone, Copy)]
enum Boilerplate {
    /// First element of `tag` with the given id.
    Id(&'static str, &'static str),
    /// Every element of `tag` with the given class.
    Class(&'static str, &'static str),
}

/// Breadcrumbs, page metadata, attachment lists, the footer and inline
/// "table of contents" macros.
const BOILERPLATE: &[Boilerplate] = &[
    Boilerplate::Id("div", "breadcrumb-section"),
    Boilerplate::Class("div", "pageSection"),
    Boilerplate::Class("div", "plugin_attachments_container"),
    Boilerplate::Id("div", "footer"),
    Boilerplate::Class("ul", "toc-indentation"),
];

/// Remove boilerplate regions in place. Returns how many subtrees were dropped.
///
/// Missing regions are not an error.
pub fn strip_boilerplate(dom: &mut Dom) -> usize {
    let mut removed = 0;

    for region in BOILERPLATE {
        let targets: Vec<NodeId> = match *region {
            Boilerplate::Id(tag, id) => dom.find_by_id(tag, id).into_iter().collect(),
            Boilerplate::Class(tag, class) => dom
                .find_all(dom.document(), &[tag])
                .filter(|&node| dom.has_class(node, class))
                .collect(),
        };

        for node in targets {
            // A region nested inside one removed earlier is already gone.
            if dom.is_attached(node) {
                dom.detach(node);
                removed += 1;
            }
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_boilerplate() {
        let html = r##"
            <div id="breadcrumb-section"><a href="index.html">Home</a></div>
            <div id="main-content">
                <p>Keep me</p>
                <ul class="toc-indentation"><li><a href="#x">x</a></li></ul>
            </div>
            <div class="pageSection group"><h2>Attachments:</h2></div>
            <div class="plugin_attachments_container">files</div>
            <div class="pageSection">more</div>
            <div id="footer">Generated</div>
        "##;
        let mut dom = parse_html(html);
        let removed = strip_boilerplate(&mut dom);

        assert_eq!(removed, 6);
        let text = dom.text_content(dom.document());
        assert!(text.contains("Keep me"));
        assert!(!text.contains("Home"));
        assert!(!text.contains("Attachments"));
        assert!(!text.contains("files"));
        assert!(!text.contains("Generated"));
        assert!(dom.find_all(dom.document(), &["ul"]).next().is_none());
    }

    #[test]
    fn test_strip_boilerplate_absent_regions() {
        let mut dom = parse_html("<p>Plain page</p>");
        assert_eq!(strip_boilerplate(&mut dom), 0);
        assert_eq!(dom.text_content(dom.document()), "Plain page");
    }

    #[test]
    fn test_id_must_match_tag() {
        let mut dom = parse_html(r#"<span id="footer">inline footer</span>"#);
        assert_eq!(strip_boilerplate(&mut dom), 0);
    }

    #[test]
    fn test_id_region_found_after_other_tag() {
        let mut dom = parse_html(
            r#"<span id="footer">inline footer</span><p>Body</p><div id="footer">Generated</div>"#,
        );
        assert_eq!(strip_boilerplate(&mut dom), 1);
        let text = dom.text_content(dom.document());
        assert!(text.contains("inline footer"));
        assert!(!text.contains("Generated"));
    }
}
