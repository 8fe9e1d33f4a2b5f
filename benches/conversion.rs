//! Benchmarks for the page conversion pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use wikimyst::dom::parse_html;
use wikimyst::markdown::{Transcoder, UrlFilter};
use wikimyst::{RenameTable, TocTree};

/// Build an index listing `pages` pages, three per nested list.
fn sample_index(pages: usize) -> String {
    let mut html = String::from("<html><body><div id=\"main-content\"><ul>");
    for i in 0..pages {
        html.push_str(&format!(
            "<li><a href=\"Page_{i}_{}.html\">Page {i}</a><ul><li><a href=\"Child_{i}.html\">Child {i}</a></li></ul></li>",
            1000 + i
        ));
    }
    html.push_str("</ul></div></body></html>");
    html
}

/// A page with the usual mix of headings, prose, links and tables.
fn sample_page(sections: usize) -> String {
    let mut html = String::from(
        "<html><body><div id=\"breadcrumb-section\"><a href=\"index.html\">Home</a></div>\
         <h1 id=\"title-heading\">DOCS : Sample Page</h1><div id=\"main-content\">",
    );
    for i in 0..sections {
        html.push_str(&format!(
            "<h2>Section {i}</h2>\
             <p>Paragraph {i} links to <a href=\"Page_{i}_{}.html\">Page {i}</a> and shows \
             <strong>bold</strong> text. <img src=\"https://wiki.example.com/download/d{i}.png\" alt=\"D{i}\"></p>\
             <ul><li>First</li><li>Second <em>item</em></li></ul>\
             <table data-column-widths=\"30,70\"><tr><th>Key</th><th>Value</th></tr>\
             <tr><td>name-{i}</td><td><code>value</code> with <a href=\"Child_{i}.html\">child</a></td></tr></table>",
            1000 + i
        ));
    }
    html.push_str("</div><div id=\"footer\">Powered by wiki</div></body></html>");
    html
}

// ============================================================================
// Index Benchmarks
// ============================================================================

fn bench_index(c: &mut Criterion) {
    let index = sample_index(500);

    c.bench_function("parse_index", |b| {
        b.iter(|| parse_html(&index));
    });

    let dom = parse_html(&index);
    c.bench_function("rename_table", |b| {
        b.iter(|| RenameTable::from_index(&dom));
    });
    c.bench_function("toc_tree", |b| {
        b.iter(|| TocTree::from_index(&dom));
    });
}

// ============================================================================
// Page Benchmarks
// ============================================================================

fn bench_page(c: &mut Criterion) {
    let table = RenameTable::from_index(&parse_html(&sample_index(100)));
    let filter = UrlFilter::default();
    let transcoder = Transcoder::new(&table, &filter);
    let page = sample_page(50);

    c.bench_function("convert_page", |b| {
        b.iter(|| transcoder.convert(&page).to_markdown());
    });

    let dom = parse_html(&page);
    c.bench_function("transcode_parsed_page", |b| {
        b.iter(|| transcoder.convert_dom(&dom));
    });
}

criterion_group!(benches, bench_index, bench_page);
criterion_main!(benches);
