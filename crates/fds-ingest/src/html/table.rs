//! Row extraction for a single identified table.
//!
//! The extractor is an explicit state machine driven by tokenizer events:
//!
//! ```text
//! Outside --<table id=target>--> InTable --<tr>--> InRow --<td|th>--> InCell
//!    ^                             |  ^              |  ^               |
//!    +------ </table> at depth 0 --+  +--- </tr> ----+  +--- </td|th> --+
//! ```
//!
//! A depth counter tracks tables nested inside the target's cells so the
//! target's own `</table>` is recognised. Row and cell tags of nested tables
//! are ignored; their text still belongs to the enclosing cell. Only rows
//! closed inside `<tbody>` are kept.

use std::sync::LazyLock;

use regex::Regex;

use super::tokenizer::{Token, Tokenizer};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InTable,
    InRow,
    InCell,
}

/// Collects the body rows of the table whose `id` matches the target.
#[derive(Debug)]
pub struct TableExtractor {
    table_id: String,
    state: State,
    depth: usize,
    in_tbody: bool,
    cell: String,
    row: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableExtractor {
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            state: State::Outside,
            depth: 0,
            in_tbody: false,
            cell: String::new(),
            row: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Run the whole document through the state machine.
    pub fn feed(&mut self, markup: &str) {
        for token in Tokenizer::new(markup) {
            self.handle(&token);
        }
    }

    /// Rows collected so far.
    pub fn finish(self) -> Vec<Vec<String>> {
        self.rows
    }

    fn handle(&mut self, token: &Token<'_>) {
        match token {
            Token::Start { name, .. } => self.start_tag(name, token.attr("id")),
            Token::End { name } => self.end_tag(name),
            Token::Text(text) => {
                if self.state == State::InCell {
                    self.cell.push_str(text);
                }
            }
        }
    }

    fn start_tag(&mut self, name: &str, id: Option<&str>) {
        if self.state == State::Outside {
            if name == "table" && id == Some(self.table_id.as_str()) {
                self.state = State::InTable;
                self.depth = 1;
                self.in_tbody = false;
            }
            return;
        }

        if name == "table" {
            self.depth += 1;
            return;
        }
        if self.depth > 1 {
            return;
        }

        match name {
            "tbody" => self.in_tbody = true,
            "tr" => {
                // An unclosed previous row is closed implicitly.
                self.close_row();
                self.row.clear();
                self.state = State::InRow;
            }
            "td" | "th" => {
                self.close_cell();
                self.cell.clear();
                self.state = State::InCell;
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, name: &str) {
        if self.state == State::Outside {
            return;
        }

        if name == "table" {
            self.depth -= 1;
            if self.depth == 0 {
                self.reset();
            }
            return;
        }
        if self.depth > 1 {
            return;
        }

        match name {
            "td" | "th" => self.close_cell(),
            "tr" => self.close_row(),
            "tbody" => self.in_tbody = false,
            _ => {}
        }
    }

    fn close_cell(&mut self) {
        if self.state != State::InCell {
            return;
        }
        self.row.push(normalize_cell_text(&self.cell));
        self.cell.clear();
        self.state = State::InRow;
    }

    fn close_row(&mut self) {
        self.close_cell();
        if self.state != State::InRow {
            return;
        }
        if self.in_tbody && !self.row.is_empty() {
            self.rows.push(std::mem::take(&mut self.row));
        }
        self.row.clear();
        self.state = State::InTable;
    }

    fn reset(&mut self) {
        self.state = State::Outside;
        self.depth = 0;
        self.in_tbody = false;
        self.cell.clear();
        self.row.clear();
    }
}

/// Collapse whitespace runs to a single space and trim.
pub fn normalize_cell_text(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Extract the body rows of the table with the given `id`.
///
/// Returns an empty list when no such table exists; callers decide whether
/// that is fatal.
pub fn extract_table_rows(markup: &str, table_id: &str) -> Vec<Vec<String>> {
    let mut extractor = TableExtractor::new(table_id);
    extractor.feed(markup);
    extractor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <table id="tablepress-795"><tbody><tr><td>Other</td><td>1%</td></tr></tbody></table>
        <table id="tablepress-796" class="tablepress">
          <thead><tr><th>State</th><th>State Tax Rate</th></tr></thead>
          <tbody class="row-hover">
            <tr><td>Alabama</td><td>4.00%</td></tr>
            <tr>
              <td>California  (a)</td>
              <td>
                7.25%
              </td>
            </tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn extracts_only_target_body_rows() {
        let rows = extract_table_rows(PAGE, "tablepress-796");
        assert_eq!(
            rows,
            vec![
                vec!["Alabama".to_string(), "4.00%".to_string()],
                vec!["California (a)".to_string(), "7.25%".to_string()],
            ]
        );
    }

    #[test]
    fn missing_table_yields_no_rows() {
        assert!(extract_table_rows(PAGE, "tablepress-1").is_empty());
    }

    #[test]
    fn nested_table_does_not_close_target() {
        let markup = r#"
            <table id="t"><tbody>
              <tr><td>Outer <table><tr><td>inner</td></tr></table> text</td><td>2</td></tr>
              <tr><td>After</td><td>3</td></tr>
            </tbody></table>
            <table><tbody><tr><td>ignored</td></tr></tbody></table>
        "#;
        let rows = extract_table_rows(markup, "t");
        assert_eq!(
            rows,
            vec![
                vec!["Outer inner text".to_string(), "2".to_string()],
                vec!["After".to_string(), "3".to_string()],
            ]
        );
    }

    #[test]
    fn concatenates_inline_fragments() {
        let markup = r#"<table id="t"><tbody><tr><td><b>New</b>&nbsp;<i>York</i></td></tr></tbody></table>"#;
        assert_eq!(extract_table_rows(markup, "t"), vec![vec!["New York".to_string()]]);
    }

    #[test]
    fn unclosed_cells_and_rows_are_closed_implicitly() {
        let markup = r#"<table id="t"><tbody><tr><td>a<td>b<tr><td>c</td></tr></tbody></table>"#;
        assert_eq!(
            extract_table_rows(markup, "t"),
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string()],
            ]
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_cell_text("  9.427%\n\t "), "9.427%");
        assert_eq!(normalize_cell_text("New \n  Mexico"), "New Mexico");
    }
}
