//! Page transcoding tests.
//!
//! Whole pages go through `convert_page` and the Markdown text is checked,
//! covering the interaction between handlers that unit tests see in isolation.

use wikimyst::RenameTable;
use wikimyst::markdown::{Transcoder, UrlFilter, convert_page};

fn convert(html: &str) -> String {
    convert_page(html, &RenameTable::new(), &UrlFilter::default())
}

fn convert_with(html: &str, pages: &[(&str, &str)]) -> String {
    let mut table = RenameTable::new();
    for (href, title) in pages {
        table.insert(href, title);
    }
    convert_page(html, &table, &UrlFilter::default())
}

// ============================================================================
// Page Structure
// ============================================================================

#[test]
fn test_full_page() {
    let html = r##"<html><head><title>DOCS : Overview</title></head><body>
        <div id="breadcrumb-section"><ol><li><a href="index.html">DOCS</a></li></ol></div>
        <h1 id="title-heading">DOCS : Overview</h1>
        <div class="pageSection"><span>Created by someone</span></div>
        <div id="main-content">
          <p>TOC</p>
          <ul class="toc-indentation"><li><a href="#intro">Intro</a></li></ul>
          <h1>Intro</h1>
          <p>The platform has two parts.</p>
          <h2>Parts</h2>
          <ul><li>Server</li><li>Client</li></ul>
        </div>
        <div class="pageSection plugin_attachments_container"><a href="attachments/1/a.png">a.png</a></div>
        <div id="footer">Powered by wiki</div>
        </body></html>"##;

    assert_eq!(
        convert(html),
        "# Overview\n\n## Intro\n\nThe platform has two parts.\n\n### Parts\n\n  - Server\n  - Client"
    );
}

#[test]
fn test_boilerplate_never_rendered() {
    let md = convert(
        r#"<div id="breadcrumb-section">Crumbs</div>
           <div class="pageSection">Metadata</div>
           <div class="plugin_attachments_container">Attachments</div>
           <ul class="toc-indentation"><li>Contents</li></ul>
           <p>Body</p>
           <div id="footer">Footer</div>"#,
    );
    assert_eq!(md, "Body");
}

#[test]
fn test_toc_paragraph_dropped() {
    assert_eq!(convert("<p>  TOC\n</p>"), "");
    assert_eq!(convert("<p>TOC and more</p>"), "TOC and more");
}

#[test]
fn test_idempotent() {
    let html = r#"<h1 id="title-heading">S : T</h1><p>A <a href="X_1.html">X</a></p>
                  <table><tr><th>K</th></tr><tr><td>v</td></tr></table>"#;
    assert_eq!(convert(html), convert(html));
}

// ============================================================================
// Links and Images
// ============================================================================

#[test]
fn test_link_rendered_once() {
    let md = convert_with(
        r#"<p>Setup is easy. Read <a href="Setup_1.html">Setup</a>. Setup twice.</p>"#,
        &[("Setup_1.html", "Setup Guide")],
    );
    assert_eq!(md, "Setup is easy. Read [Setup](Setup_Guide.md). Setup twice.");
    assert_eq!(md.matches("[Setup]").count(), 1);
}

#[test]
fn test_fragment_and_empty_links_never_rendered() {
    let md = convert(
        r##"<p>Back to <a href="#">top</a> or <a href="">here</a>.</p>
            <div><a href="#">top</a><a href=" ">blank</a></div>
            <table><tr><td><a href="#">cell</a></td></tr></table>
            <img src="#"><img src="">"##,
    );
    assert!(!md.contains("](#)"), "{md}");
    assert!(!md.contains("]()"), "{md}");
    assert!(!md.contains("]( )"), "{md}");
    assert!(md.contains("Back to top or here."));
}

#[test]
fn test_blocked_prefixes() {
    let md = convert(
        r#"<div><a href="/wiki/x">abs</a><a href="rest/api">api</a>
           <img src="images/icons/bullet.png"><img src="attachments/1/a.png"></div>"#,
    );
    assert_eq!(md, "");
}

#[test]
fn test_unknown_page_link_gets_md_extension() {
    let md = convert(r#"<p>See <a href="Other_Page_99.html">other</a>.</p>"#);
    assert_eq!(md, "See [other](Other_Page_99.md).");
}

#[test]
fn test_paragraph_images_appended() {
    let md = convert(
        r#"<p>Overview <img src="https://w.example/download/arch.png" alt=" Architecture "> end</p>"#,
    );
    assert_eq!(md, "Overview end ![Architecture](https://w.example/download/arch.png)");
}

#[test]
fn test_custom_filter() {
    let table = RenameTable::new();
    let filter = UrlFilter::with_prefixes(["https://internal."]);
    let doc = Transcoder::new(&table, &filter).convert(
        r#"<p><a href="https://internal.example/x">internal</a> <a href="/abs">abs</a></p>"#,
    );
    assert_eq!(doc.to_markdown(), "internal [abs](/abs)");
    assert_eq!(doc.emitted, vec!["[abs](/abs)"]);
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn test_table_basic() {
    let md = convert("<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>");
    assert_eq!(
        md,
        ":::{list-table}\n:header-rows: 1\n\n*   - A\n    - B\n*   - 1\n    - 2\n:::"
    );
}

#[test]
fn test_table_jagged_rows_padded() {
    let md = convert(
        "<table><tr><td>a</td><td>b</td></tr>\
         <tr><td>1</td><td>2</td><td>3</td></tr>\
         <tr><td>x</td></tr></table>",
    );
    assert_eq!(
        md,
        ":::{list-table}\n:header-rows: 1\n\n\
         *   - a\n    - b\n    - \n\
         *   - 1\n    - 2\n    - 3\n\
         *   - x\n    - \n    - \n:::"
    );
}

#[test]
fn test_table_single_row() {
    let md = convert("<table><tr><td>Only</td><td>Row</td></tr></table>");
    assert_eq!(
        md,
        ":::{list-table}\n:header-rows: 1\n\n*   - Only\n    - Row\n*   - \n    - \n:::"
    );
}

#[test]
fn test_table_caption_widths_header_rows() {
    let md = convert(
        "<table data-column-widths=\"30, 70\" data-header-rows=\"2\">\
         <caption> Port\n  map </caption>\
         <tr><th>Time-out\nvalue</th><th>Port</th></tr>\
         <tr><td>30s</td><td>8080</td></tr></table>",
    );
    assert!(
        md.starts_with(":::{list-table} Port map\n:widths: 30 70\n:header-rows: 2\n\n"),
        "{md}"
    );
    assert!(md.contains("*   - Time out <br> value\n    - Port\n"), "{md}");
}

#[test]
fn test_table_non_numeric_widths_dropped() {
    let md = convert(
        r#"<table data-column-widths="30%,70%" data-header-rows="x"><tr><td>a</td></tr><tr><td>b</td></tr></table>"#,
    );
    assert!(!md.contains(":widths:"));
    assert!(md.contains(":header-rows: 1\n"));
}

#[test]
fn test_table_without_rows() {
    assert_eq!(convert("<table><caption>Nothing</caption></table><p>after</p>"), "after");
}

#[test]
fn test_table_cell_inline_markup() {
    let md = convert_with(
        r#"<table><tr><th>Name</th><th>Notes</th></tr>
           <tr><td><s>old</s> new</td>
               <td>See <a href="Setup_1.html">Setup</a><br>and <em>more</em></td></tr></table>"#,
        &[("Setup_1.html", "Setup")],
    );
    assert!(md.contains("*   - ~~old~~ new\n"), "{md}");
    assert!(md.contains("    - See [Setup](Setup.md)<br>and *more*\n"), "{md}");
}

#[test]
fn test_line_breaks_kept() {
    let md = convert(
        "<p>first<br>second</p>\
         <table><tr><th>K</th></tr><tr><td>line one<br>line two</td></tr></table>",
    );
    assert!(md.starts_with("first\nsecond\n\n"), "{md}");
    assert!(md.contains("*   - line one<br>line two\n"), "{md}");
}

#[test]
fn test_table_contents_not_repeated() {
    let md = convert("<table><tr><td><p>Cell <strong>text</strong></p></td></tr></table>");
    assert_eq!(md.matches("text").count(), 1, "{md}");
}
