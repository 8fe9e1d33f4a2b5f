//! HTML tables → MyST `list-table` directives.

use crate::dom::NodeId;
use crate::util::collapse_whitespace;

use super::render::PageRenderer;

const WIDTHS_ATTR: &str = "data-column-widths";
const HEADER_ROWS_ATTR: &str = "data-header-rows";
const DEFAULT_HEADER_ROWS: usize = 1;

/// A `:::{list-table}` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTable {
    /// Caption text, possibly empty.
    pub title: String,
    /// Column widths, present only when every token is numeric.
    pub widths: Option<Vec<String>>,
    pub header_rows: usize,
    /// Rows in output order, each padded to the same width.
    pub rows: Vec<Vec<String>>,
}

impl ListTable {
    pub(super) fn write(&self, out: &mut String) {
        out.push_str("\n\n:::{list-table}");
        if !self.title.is_empty() {
            out.push(' ');
            out.push_str(&self.title);
        }
        out.push('\n');
        if let Some(widths) = &self.widths {
            out.push_str(":widths: ");
            out.push_str(&widths.join(" "));
            out.push('\n');
        }
        out.push_str(&format!(":header-rows: {}\n\n", self.header_rows));
        for row in &self.rows {
            write_row(out, row);
        }
        out.push_str(":::\n\n");
    }
}

/// `*   - a` followed by `    - b` for every further cell.
fn write_row(out: &mut String, cells: &[String]) {
    out.push_str("*   - ");
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("\n    - ");
        }
        out.push_str(cell);
    }
    out.push('\n');
}

/// Widths attribute tokens, kept only when all of them are numbers.
fn parse_widths(attr: Option<&str>) -> Option<Vec<String>> {
    let tokens: Vec<String> = attr?.split(',').map(|t| t.trim().to_string()).collect();
    let numeric = tokens
        .iter()
        .all(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()));
    numeric.then_some(tokens)
}

fn parse_header_rows(attr: Option<&str>) -> usize {
    attr.and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_HEADER_ROWS)
}

/// Header cell text: trimmed, newlines spelled as breaks, hyphens as spaces.
fn header_cell(text: &str) -> String {
    text.trim()
        .replace('\n', " <br> ")
        .replace('-', " ")
        .trim()
        .to_string()
}

fn pad(mut cells: Vec<String>, width: usize) -> Vec<String> {
    if cells.len() < width {
        cells.resize(width, String::new());
    }
    cells
}

impl PageRenderer<'_> {
    /// Build the directive for a `<table>`. Tables without rows give nothing.
    pub(super) fn table(&mut self, table: NodeId) -> Option<ListTable> {
        let dom = self.dom;
        let rows: Vec<Vec<NodeId>> = dom
            .find_all(table, &["tr"])
            .map(|tr| dom.find_all(tr, &["th", "td"]).collect())
            .collect();
        if rows.is_empty() {
            return None;
        }

        let title = dom
            .find_all(table, &["caption"])
            .next()
            .map(|caption| collapse_whitespace(&dom.text_content(caption)))
            .unwrap_or_default();
        let widths = parse_widths(dom.attr(table, WIDTHS_ATTR));
        let header_rows = parse_header_rows(dom.attr(table, HEADER_ROWS_ATTR));
        let max_columns = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut out_rows = Vec::with_capacity(rows.len().max(2));
        if let [only] = rows.as_slice() {
            let cells: Vec<String> = only.iter().map(|&c| self.cell_inline(c)).collect();
            let blank = vec![String::new(); cells.len()];
            out_rows.push(cells);
            if !blank.is_empty() {
                out_rows.push(blank);
            }
        } else {
            let header = rows[0]
                .iter()
                .map(|&c| header_cell(&dom.text_content(c)))
                .collect();
            out_rows.push(pad(header, max_columns));
            for row in &rows[1..] {
                let cells = row.iter().map(|&c| self.cell_inline(c)).collect();
                out_rows.push(pad(cells, max_columns));
            }
        }

        tracing::trace!(rows = out_rows.len(), columns = max_columns, "list-table");
        Some(ListTable {
            title,
            widths,
            header_rows,
            rows: out_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::markdown::{Block, Transcoder, UrlFilter};
    use crate::rename::RenameTable;

    use super::*;

    fn tables(html: &str) -> Vec<ListTable> {
        let table = RenameTable::new();
        let filter = UrlFilter::default();
        Transcoder::new(&table, &filter)
            .convert(html)
            .blocks
            .into_iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_widths() {
        assert_eq!(
            parse_widths(Some("30, 70")),
            Some(vec!["30".to_string(), "70".to_string()])
        );
        assert_eq!(parse_widths(Some("30%,70%")), None);
        assert_eq!(parse_widths(Some("")), None);
        assert_eq!(parse_widths(None), None);
    }

    #[test]
    fn test_parse_header_rows() {
        assert_eq!(parse_header_rows(Some("2")), 2);
        assert_eq!(parse_header_rows(Some("two")), 1);
        assert_eq!(parse_header_rows(None), 1);
    }

    #[test]
    fn test_header_cell() {
        assert_eq!(header_cell("  Time-out\nvalue "), "Time out <br> value");
    }

    #[test]
    fn test_jagged_rows_padded() {
        let t = &tables(
            "<table><tr><td>a</td><td>b</td></tr>\
             <tr><td>1</td><td>2</td><td>3</td></tr>\
             <tr><td>x</td></tr></table>",
        )[0];
        assert!(t.rows.iter().all(|r| r.len() == 3));
        assert_eq!(t.rows[2], vec!["x", "", ""]);
    }

    #[test]
    fn test_single_row() {
        let t = &tables("<table><tr><td><em>only</em></td><td>row</td></tr></table>")[0];
        assert_eq!(t.rows, vec![vec!["*only*", "row"], vec!["", ""]]);
    }

    #[test]
    fn test_no_rows_no_table() {
        assert!(tables("<table><caption>Empty</caption></table>").is_empty());
    }

    #[test]
    fn test_write() {
        let t = ListTable {
            title: "Limits".to_string(),
            widths: Some(vec!["1".to_string(), "2".to_string()]),
            header_rows: 1,
            rows: vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["1".to_string(), String::new()],
            ],
        };
        let mut out = String::new();
        t.write(&mut out);
        assert_eq!(
            out,
            "\n\n:::{list-table} Limits\n:widths: 1 2\n:header-rows: 1\n\n\
             *   - A\n    - B\n*   - 1\n    - \n:::\n\n"
        );
    }
}
