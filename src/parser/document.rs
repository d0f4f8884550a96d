//! Tolerant extraction of tables from raw statement markup.
//!
//! Broker exports are HTML of wildly varying quality: unclosed cells,
//! stray tags, inline styling, nested layout tables. The extractor walks
//! the tag stream and collects a generic table/row/cell model with trimmed
//! text content. It never fails — malformed or truncated markup produces a
//! partial (possibly empty) document, not an error.

/// A single table row: the trimmed text of each cell, in order.
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    /// Cell text at `index`, or None past the end.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Combined text of all cells, space-joined. Used for marker scans.
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// Combined text of the whole table. Used for marker scans.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            for cell in &row.cells {
                out.push_str(cell);
                out.push(' ');
            }
        }
        out
    }

    /// Index of the first row whose combined text contains `marker`.
    pub fn find_row(&self, marker: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.text().contains(marker))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub tables: Vec<Table>,
}

impl Document {
    /// First table whose combined text contains every marker.
    pub fn find_table(&self, markers: &[&str]) -> Option<&Table> {
        self.tables.iter().find(|t| {
            let text = t.text();
            markers.iter().all(|m| text.contains(m))
        })
    }
}

/// Extract all tables from raw markup.
pub fn extract(raw: &str) -> Document {
    let mut doc = Document::default();
    // Nested tables are flattened: an inner <table> finishes the outer
    // one's current row and starts collecting into a new table.
    let mut table: Option<Table> = None;
    let mut row: Option<Row> = None;
    let mut cell: Option<String> = None;

    let mut rest = raw;
    while let Some(lt) = rest.find('<') {
        // Text before the tag belongs to the open cell, if any.
        if let Some(buf) = cell.as_mut() {
            buf.push_str(&rest[..lt]);
        }
        rest = &rest[lt..];

        let Some(gt) = rest.find('>') else {
            // Truncated tag: drop the remainder.
            break;
        };
        let tag = &rest[1..gt];
        rest = &rest[gt + 1..];

        let (name, closing) = tag_name(tag);
        match name.as_str() {
            "table" if !closing => {
                finish_cell(&mut cell, &mut row);
                finish_row(&mut row, &mut table);
                finish_table(&mut table, &mut doc);
                table = Some(Table::default());
            }
            "table" => {
                finish_cell(&mut cell, &mut row);
                finish_row(&mut row, &mut table);
                finish_table(&mut table, &mut doc);
            }
            "tr" if !closing => {
                finish_cell(&mut cell, &mut row);
                finish_row(&mut row, &mut table);
                if table.is_none() {
                    // Row outside any <table>: tolerate it as its own table.
                    table = Some(Table::default());
                }
                row = Some(Row::default());
            }
            "tr" => {
                finish_cell(&mut cell, &mut row);
                finish_row(&mut row, &mut table);
            }
            "td" | "th" if !closing => {
                finish_cell(&mut cell, &mut row);
                if row.is_none() {
                    row = Some(Row::default());
                }
                cell = Some(String::new());
            }
            "td" | "th" => {
                finish_cell(&mut cell, &mut row);
            }
            "br" => {
                if let Some(buf) = cell.as_mut() {
                    buf.push(' ');
                }
            }
            // Any other tag (spans, styling, comments) is transparent.
            _ => {}
        }
    }

    // Tolerate missing closing tags at end of input.
    if let Some(buf) = cell.as_mut() {
        buf.push_str(rest);
    }
    finish_cell(&mut cell, &mut row);
    finish_row(&mut row, &mut table);
    finish_table(&mut table, &mut doc);

    doc
}

/// Lowercased tag name and whether it is a closing tag.
fn tag_name(tag: &str) -> (String, bool) {
    let tag = tag.trim();
    let (closing, tag) = match tag.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, tag),
    };
    let name: String = tag
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    (name, closing)
}

fn finish_cell(cell: &mut Option<String>, row: &mut Option<Row>) {
    if let Some(text) = cell.take() {
        let decoded = decode_entities(&text);
        if let Some(r) = row.as_mut() {
            r.cells.push(decoded.trim().to_string());
        }
    }
}

fn finish_row(row: &mut Option<Row>, table: &mut Option<Table>) {
    if let Some(r) = row.take() {
        if let Some(t) = table.as_mut() {
            t.rows.push(r);
        }
    }
}

fn finish_table(table: &mut Option<Table>, doc: &mut Document) {
    if let Some(t) = table.take() {
        if !t.rows.is_empty() {
            doc.tables.push(t);
        }
    }
}

/// Decode the handful of entities that show up in statement exports.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", "\u{00A0}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_table() {
        let doc = extract(
            "<html><body><table>\
             <tr><td>a</td><td>b</td></tr>\
             <tr><td> c </td><td>d</td></tr>\
             </table></body></html>",
        );
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(doc.tables[0].rows.len(), 2);
        assert_eq!(doc.tables[0].rows[0].cells, vec!["a", "b"]);
        assert_eq!(doc.tables[0].rows[1].cells, vec!["c", "d"]);
    }

    #[test]
    fn test_extract_unclosed_cells_and_rows() {
        let doc = extract("<table><tr><td>a<td>b<tr><td>c</table>");
        assert_eq!(doc.tables.len(), 1);
        assert_eq!(doc.tables[0].rows[0].cells, vec!["a", "b"]);
        assert_eq!(doc.tables[0].rows[1].cells, vec!["c"]);
    }

    #[test]
    fn test_extract_ignores_inline_markup() {
        let doc = extract("<table><tr><td><b>bold</b> text</td></tr></table>");
        assert_eq!(doc.tables[0].rows[0].cells, vec!["bold text"]);
    }

    #[test]
    fn test_extract_decodes_entities() {
        let doc = extract("<table><tr><td>1&nbsp;234,56</td><td>a &amp; b</td></tr></table>");
        assert_eq!(doc.tables[0].rows[0].cells[0], "1\u{00A0}234,56");
        assert_eq!(doc.tables[0].rows[0].cells[1], "a & b");
    }

    #[test]
    fn test_extract_malformed_input_never_fails() {
        assert!(extract("").tables.is_empty());
        assert!(extract("no markup at all").tables.is_empty());
        assert!(extract("<table><tr><td>truncated").tables[0].rows[0].cells[0] == "truncated");
        assert!(extract("<<<>>>").tables.is_empty());
        assert!(extract("<table></table>").tables.is_empty());
    }

    #[test]
    fn test_find_table_and_row_markers() {
        let doc = extract(
            "<table><tr><td>Other</td></tr></table>\
             <table><tr><td>Closed Transactions:</td></tr>\
             <tr><td>Open Trades:</td></tr></table>",
        );
        let t = doc
            .find_table(&["Closed Transactions:", "Open Trades:"])
            .unwrap();
        assert_eq!(t.find_row("Closed Transactions:"), Some(0));
        assert_eq!(t.find_row("Open Trades:"), Some(1));
        assert!(doc.find_table(&["Summary:"]).is_none());
    }
}
